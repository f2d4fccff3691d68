//! `folio render` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_renderer::{DocumentRenderer, HtmlBackend, Node, RenderResult};
use serde_json::Value;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Path to the JSON document (reads stdin when omitted or `-`).
    input: Option<PathBuf>,

    /// Write output to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum nesting depth to render (overrides config).
    #[arg(long, env = "FOLIO_MAX_DEPTH")]
    max_depth: Option<usize>,

    /// Do not add a target attribute to links.
    #[arg(long)]
    no_link_target: bool,

    /// Write the HTML and the list of omissions as JSON.
    #[arg(long)]
    json: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, the input cannot be read or
    /// parsed, or the output cannot be written.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            max_depth: self.max_depth,
            link_target: self.no_link_target.then(String::new),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        let source = read_input(self.input.as_deref())?;
        let value: Value = serde_json::from_str(&source)?;
        let document = Node::from_json(&value);

        let renderer = DocumentRenderer::<HtmlBackend>::new().with_options(config.render_options());
        let result = renderer.render(&document);

        for omission in &result.omissions {
            output.warning(&format!("Warning: omitted {omission}"));
        }

        let rendered = format_result(&result, self.json)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Read the whole input document from a file or stdin.
fn read_input(path: Option<&Path>) -> Result<String, CliError> {
    match path {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut source = String::new();
            std::io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn format_result(result: &RenderResult, json: bool) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string(result)?)
    } else {
        Ok(result.html.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_renderer::{Omission, OmissionReason};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_result_html() {
        let result = RenderResult {
            html: "<p>Hi</p>".to_owned(),
            omissions: Vec::new(),
        };
        assert_eq!(format_result(&result, false).unwrap(), "<p>Hi</p>");
    }

    #[test]
    fn test_format_result_json() {
        let result = RenderResult {
            html: String::new(),
            omissions: vec![Omission {
                node: "image".to_owned(),
                reason: OmissionReason::MissingUrl,
            }],
        };

        let value: Value = serde_json::from_str(&format_result(&result, true).unwrap()).unwrap();

        assert_eq!(value["html"], "");
        assert_eq!(value["omissions"][0]["node"], "image");
        assert_eq!(value["omissions"][0]["reason"], "missing_url");
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"type":"doc"}"#).unwrap();

        assert_eq!(read_input(Some(&path)).unwrap(), r#"{"type":"doc"}"#);
    }

    #[test]
    fn test_read_input_missing_file() {
        let err = read_input(Some(Path::new("/nonexistent/doc.json"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
