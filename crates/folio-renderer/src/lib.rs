//! Sanitizing HTML renderer for rich-text editor documents.
//!
//! This crate converts the JSON document tree produced by a block/inline
//! rich-text editor into an HTML fragment that is safe to embed in a page.
//!
//! # Architecture
//!
//! - [`Node`]: the document tree, loaded tolerantly from JSON with
//!   [`Node::from_json`] (or `serde`)
//! - [`DocumentRenderer`]: recursive block and inline dispatch, mark
//!   ordering, depth limiting
//! - [`RenderBackend`]: format-specific output; [`HtmlBackend`] produces HTML5
//! - [`sanitize_url`] / [`to_embed_url`]: the only path by which a URL from
//!   the document reaches the output
//!
//! Rendering is total. Content that cannot be rendered safely (unsafe URLs,
//! unresolvable embeds, over-deep subtrees) is left out and reported as an
//! [`Omission`]; unknown node kinds render their children.
//!
//! # Example
//!
//! ```
//! use folio_renderer::render_json;
//! use serde_json::json;
//!
//! let html = render_json(&json!({
//!     "type": "doc",
//!     "content": [{
//!         "type": "heading",
//!         "attrs": {"level": 1},
//!         "content": [{"type": "text", "text": "Hi <all>"}]
//!     }]
//! }));
//! assert_eq!(html, "<h1>Hi &lt;all&gt;</h1>");
//! ```

mod backend;
mod html;
mod node;
mod options;
mod renderer;
mod sanitize;
mod util;

use serde_json::Value;

pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use node::{Attrs, MAX_NESTING, Mark, MarkKind, Node, NodeKind};
pub use options::{DEFAULT_MAX_DEPTH, RenderOptions};
pub use renderer::{DocumentRenderer, MARK_PRIORITY, Omission, OmissionReason, RenderResult};
pub use sanitize::{EMBED_BASE_URL, sanitize_url, to_embed_url};
pub use util::{escape_attr, escape_html, extract_plain_text};

/// Render a document tree to HTML with default options.
#[must_use]
pub fn render(root: &Node) -> String {
    DocumentRenderer::<HtmlBackend>::new().render_html(root)
}

/// Render an editor JSON document to HTML with default options.
#[must_use]
pub fn render_json(value: &Value) -> String {
    render(&Node::from_json(value))
}
