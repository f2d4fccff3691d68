//! Shared helpers: escaping, attribute coercion and plain-text extraction.

use serde_json::Value;

use crate::node::{Node, NodeKind};
use crate::options::DEFAULT_MAX_DEPTH;

/// Heading level used when the `level` attribute is absent or not an integer.
pub(crate) const DEFAULT_HEADING_LEVEL: u8 = 2;

/// Escape text for HTML element content.
///
/// Escapes `&`, `<`, `>` and `"`. Use [`escape_attr`] for attribute values.
///
/// # Examples
///
/// ```
/// use folio_renderer::escape_html;
///
/// assert_eq!(escape_html("a < b && \"q\""), "a &lt; b &amp;&amp; &quot;q&quot;");
/// ```
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(s, false, &mut out);
    out
}

/// Escape text for a quoted HTML attribute value.
///
/// Same as [`escape_html`], plus `'` → `&#39;`.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    push_escaped(s, true, &mut out);
    out
}

/// Append `s` to `out` with HTML escaping applied.
pub(crate) fn push_escaped(s: &str, attr: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' if attr => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

/// Read an integral JSON number, accepting `3` and `3.0` but not `3.5` or `"3"`.
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub(crate) fn as_integer(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.trunc() == f && f.abs() < 1e15 {
        Some(f as i64)
    } else {
        None
    }
}

/// Resolve a heading `level` attribute to 1-6.
///
/// Integers are clamped into range; anything else falls back to
/// [`DEFAULT_HEADING_LEVEL`].
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn heading_level(value: Option<&Value>) -> u8 {
    match as_integer(value) {
        Some(n) => n.clamp(1, 6) as u8,
        None => DEFAULT_HEADING_LEVEL,
    }
}

/// Concatenate the raw text under `nodes`, ignoring marks.
///
/// Line breaks become `\n`. Returns `false` when a subtree was cut off
/// because it sat deeper than `depth_budget`.
pub(crate) fn collect_plain_text(nodes: &[Node], depth_budget: usize, out: &mut String) -> bool {
    let mut complete = true;
    for node in nodes {
        match &node.kind {
            NodeKind::Text => {
                if let Some(text) = &node.text {
                    out.push_str(text);
                }
            }
            NodeKind::LineBreak => out.push('\n'),
            _ if node.children.is_empty() => {}
            _ if depth_budget == 0 => complete = false,
            _ => complete &= collect_plain_text(&node.children, depth_budget - 1, out),
        }
    }
    complete
}

/// Extract the text content of `nodes` as escaped HTML, ignoring all marks.
///
/// Used for code blocks, where decoration is meaningless. The result is
/// escaped exactly once.
///
/// # Examples
///
/// ```
/// use folio_renderer::{Mark, MarkKind, Node, extract_plain_text};
///
/// let nodes = [
///     Node::text("x < 1").with_marks(vec![Mark::new(MarkKind::Bold)]),
///     Node::line_break(),
///     Node::text("done"),
/// ];
/// assert_eq!(extract_plain_text(&nodes), "x &lt; 1\ndone");
/// ```
#[must_use]
pub fn extract_plain_text(nodes: &[Node]) -> String {
    let mut raw = String::new();
    collect_plain_text(nodes, DEFAULT_MAX_DEPTH, &mut raw);
    escape_html(&raw)
}
