//! URL sanitization for every `href`/`src` written to the output.
//!
//! [`sanitize_url`] is the only way a URL reaches rendered markup. It accepts
//! absolute `http`/`https` URLs and nothing else.

use url::Url;

/// Schemes allowed in rendered links and media sources.
const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Host serving embeddable video frames without tracking cookies.
pub const EMBED_BASE_URL: &str = "https://www.youtube-nocookie.com/embed/";

/// Validate an untrusted URL.
///
/// Returns the parsed, normalized URL when it is absolute and uses `http` or
/// `https`. Relative URLs, unparseable input and every other scheme
/// (`javascript:`, `data:`, `vbscript:`, `file:` ...) are rejected.
///
/// # Examples
///
/// ```
/// use folio_renderer::sanitize_url;
///
/// assert!(sanitize_url("javascript:alert(1)").is_none());
/// assert_eq!(
///     sanitize_url("https://example.com/x").map(|u| u.to_string()),
///     Some("https://example.com/x".to_owned())
/// );
/// ```
#[must_use]
pub fn sanitize_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    ALLOWED_SCHEMES
        .contains(&url.scheme())
        .then_some(url)
}

/// Resolve a video link to its privacy-respecting embed URL.
///
/// Recognized shapes (a leading `www.` or `m.` on the host is ignored):
/// - `https://youtu.be/<id>`
/// - `https://youtube.com/watch?v=<id>`
/// - `https://youtube.com/embed/<id>` and `https://youtube.com/shorts/<id>`
///
/// Returns `None` when the URL fails [`sanitize_url`] or no valid id can be
/// extracted. The raw link is never used as a frame source.
///
/// # Examples
///
/// ```
/// use folio_renderer::to_embed_url;
///
/// assert_eq!(
///     to_embed_url("https://youtu.be/abc123").as_deref(),
///     Some("https://www.youtube-nocookie.com/embed/abc123")
/// );
/// assert_eq!(to_embed_url("https://example.com/video"), None);
/// ```
#[must_use]
pub fn to_embed_url(raw: &str) -> Option<String> {
    let url = sanitize_url(raw)?;
    let id = video_id(&url)?;
    Some(format!("{EMBED_BASE_URL}{id}"))
}

/// Extract the video id from a sanitized URL.
fn video_id(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.strip_prefix("m.").unwrap_or(host);

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = match host {
        "youtu.be" => segments.next()?.to_owned(),
        "youtube.com" => match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            "embed" | "shorts" => segments.next()?.to_owned(),
            _ => return None,
        },
        _ => return None,
    };

    is_valid_video_id(&id).then_some(id)
}

/// Video ids are URL-safe base64: ASCII alphanumerics, `-` and `_`.
fn is_valid_video_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sanitized(raw: &str) -> Option<String> {
        sanitize_url(raw).map(|u| u.to_string())
    }

    #[test]
    fn test_sanitize_accepts_http_and_https() {
        assert_eq!(
            sanitized("https://example.com/x"),
            Some("https://example.com/x".to_owned())
        );
        assert_eq!(
            sanitized("http://example.com/a?b=c#d"),
            Some("http://example.com/a?b=c#d".to_owned())
        );
    }

    #[test]
    fn test_sanitize_normalizes() {
        assert_eq!(
            sanitized("  HTTPS://Example.COM  "),
            Some("https://example.com/".to_owned())
        );
    }

    #[test]
    fn test_sanitize_rejects_script_schemes() {
        assert_eq!(sanitized("javascript:alert(1)"), None);
        assert_eq!(sanitized("JavaScript:alert(1)"), None);
        assert_eq!(sanitized("java\tscript:alert(1)"), None);
        assert_eq!(sanitized("vbscript:msgbox(1)"), None);
        assert_eq!(sanitized("data:text/html,<script>alert(1)</script>"), None);
    }

    #[test]
    fn test_sanitize_rejects_other_schemes() {
        assert_eq!(sanitized("mailto:someone@example.com"), None);
        assert_eq!(sanitized("ftp://example.com/file"), None);
        assert_eq!(sanitized("file:///etc/passwd"), None);
    }

    #[test]
    fn test_sanitize_rejects_relative_and_garbage() {
        assert_eq!(sanitized("/relative/path"), None);
        assert_eq!(sanitized("//example.com/protocol-relative"), None);
        assert_eq!(sanitized("not a url"), None);
        assert_eq!(sanitized(""), None);
        assert_eq!(sanitized("https://"), None);
    }

    #[test]
    fn test_sanitize_percent_encodes_quotes() {
        let url = sanitized(r#"https://example.com/"onmouseover="x"#).unwrap();
        assert!(!url.contains('"'));
    }

    #[test]
    fn test_embed_all_shapes_agree() {
        let expected = Some("https://www.youtube-nocookie.com/embed/abc123".to_owned());
        assert_eq!(to_embed_url("https://youtu.be/abc123"), expected);
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v=abc123"),
            expected
        );
        assert_eq!(to_embed_url("https://www.youtube.com/embed/abc123"), expected);
        assert_eq!(to_embed_url("https://youtube.com/shorts/abc123"), expected);
        assert_eq!(to_embed_url("https://m.youtube.com/watch?v=abc123"), expected);
    }

    #[test]
    fn test_embed_ignores_extra_query() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?feature=share&v=dQw4w9WgXcQ&t=42"),
            Some("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ".to_owned())
        );
        assert_eq!(
            to_embed_url("https://youtu.be/dQw4w9WgXcQ?t=42"),
            Some("https://www.youtube-nocookie.com/embed/dQw4w9WgXcQ".to_owned())
        );
    }

    #[test]
    fn test_embed_rejects_unknown_hosts() {
        assert_eq!(to_embed_url("https://example.com/video"), None);
        assert_eq!(to_embed_url("https://notyoutube.com/watch?v=abc123"), None);
        assert_eq!(to_embed_url("https://youtube.com.evil.com/watch?v=abc123"), None);
    }

    #[test]
    fn test_embed_rejects_missing_id() {
        assert_eq!(to_embed_url("https://youtu.be/"), None);
        assert_eq!(to_embed_url("https://www.youtube.com/watch"), None);
        assert_eq!(to_embed_url("https://www.youtube.com/watch?v="), None);
        assert_eq!(to_embed_url("https://www.youtube.com/embed/"), None);
        assert_eq!(to_embed_url("https://www.youtube.com/channel/abc123"), None);
    }

    #[test]
    fn test_embed_rejects_unsafe_id() {
        assert_eq!(
            to_embed_url("https://www.youtube.com/watch?v=%22%3E%3Cscript%3E"),
            None
        );
    }

    #[test]
    fn test_embed_requires_sanitized_url() {
        assert_eq!(to_embed_url("javascript:alert('youtu.be/abc123')"), None);
        assert_eq!(to_embed_url("youtu.be/abc123"), None);
    }
}
