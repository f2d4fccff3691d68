//! `folio check-url` command implementation.

use std::io::Write;

use clap::Args;
use folio_renderer::{sanitize_url, to_embed_url};

use crate::error::CliError;

/// Arguments for the check-url command.
#[derive(Args)]
pub(crate) struct CheckUrlArgs {
    /// URL to check, as it would appear in a document attribute.
    url: String,
}

impl CheckUrlArgs {
    /// Execute the check-url command.
    ///
    /// Prints the sanitized URL, followed by the embed URL when the address
    /// names a video.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Validation` if the URL is rejected.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let lines = describe(&self.url)?;
        let mut stdout = std::io::stdout().lock();
        for line in lines {
            writeln!(stdout, "{line}")?;
        }
        Ok(())
    }
}

fn describe(raw: &str) -> Result<Vec<String>, CliError> {
    let sanitized = sanitize_url(raw)
        .ok_or_else(|| CliError::Validation(format!("URL rejected: {raw:?}")))?;

    let mut lines = vec![format!("url: {sanitized}")];
    if let Some(embed) = to_embed_url(raw) {
        lines.push(format!("embed: {embed}"));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_plain_url() {
        assert_eq!(
            describe(" https://example.com/a b ").unwrap(),
            vec!["url: https://example.com/a%20b".to_owned()]
        );
    }

    #[test]
    fn test_describe_video_url() {
        assert_eq!(
            describe("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            vec![
                "url: https://youtu.be/dQw4w9WgXcQ".to_owned(),
                "embed: https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ".to_owned(),
            ]
        );
    }

    #[test]
    fn test_describe_rejected_url() {
        let err = describe("javascript:alert(1)").unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
        assert!(err.to_string().contains("javascript:alert(1)"));
    }
}
