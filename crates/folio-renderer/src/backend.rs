//! Render backend trait for format-specific output.
//!
//! The generic [`DocumentRenderer`](crate::DocumentRenderer) owns dispatch,
//! depth limiting and URL sanitization. Backends only decide how the
//! already-validated pieces are written.

use crate::options::RenderOptions;

/// Backend trait for format-specific rendering operations.
///
/// Implementations provide format-specific rendering for:
/// - Code blocks
/// - Blockquotes
/// - Images and video embeds (URLs arrive sanitized)
/// - Links (href arrives sanitized)
/// - Task list items
///
/// Text and URL arguments arrive unescaped; the backend escapes them.
pub trait RenderBackend {
    /// Render a code block from its raw text content.
    ///
    /// # Arguments
    ///
    /// * `lang` - Optional language identifier (e.g., "rust", "python")
    /// * `content` - The code content, unescaped
    /// * `out` - Output buffer to write to
    fn code_block(lang: Option<&str>, content: &str, out: &mut String);

    /// Render blockquote start tag.
    fn blockquote_start(out: &mut String);

    /// Render blockquote end tag.
    fn blockquote_end(out: &mut String);

    /// Render an image.
    ///
    /// # Arguments
    ///
    /// * `src` - Sanitized image source URL
    /// * `alt` - Alt text for the image
    /// * `title` - Optional title attribute
    /// * `options` - Rendering options
    /// * `out` - Output buffer to write to
    fn image(
        src: &str,
        alt: &str,
        title: Option<&str>,
        options: &RenderOptions,
        out: &mut String,
    );

    /// Render an embedded video frame.
    ///
    /// `embed_url` comes from [`to_embed_url`](crate::to_embed_url).
    fn video_embed(
        embed_url: &str,
        width: u32,
        height: u32,
        options: &RenderOptions,
        out: &mut String,
    );

    /// Render link start tag for a sanitized `href`.
    fn link_start(href: &str, options: &RenderOptions, out: &mut String);

    /// Render link end tag.
    fn link_end(out: &mut String) {
        out.push_str("</a>");
    }

    /// Render task list start tag.
    fn task_list_start(out: &mut String);

    /// Render task list end tag.
    fn task_list_end(out: &mut String);

    /// Render task item start, including its checkbox and label opening.
    fn task_item_start(checked: bool, out: &mut String);

    /// Render task item end, closing the label.
    fn task_item_end(out: &mut String);

    /// Render a hard break.
    ///
    /// Default uses `<br>`. Override for format-specific rendering (e.g., `<br />`).
    fn hard_break(out: &mut String) {
        out.push_str("<br>");
    }

    /// Render a horizontal rule.
    ///
    /// Default uses `<hr>`. Override for format-specific rendering (e.g., `<hr />`).
    fn horizontal_rule(out: &mut String) {
        out.push_str("<hr>");
    }
}
