//! Generic document renderer with pluggable backend.

use std::fmt::{self, Write};
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;

use crate::backend::RenderBackend;
use crate::node::{Mark, MarkKind, Node, NodeKind};
use crate::options::RenderOptions;
use crate::sanitize::{sanitize_url, to_embed_url};
use crate::util::{as_integer, collect_plain_text, heading_level, push_escaped};

/// Order in which marks wrap a text run, innermost first.
///
/// Marks are applied in this order regardless of how the editor listed them,
/// so a given mark set always produces the same nesting: bold text inside a
/// link renders as `<a ...><strong>text</strong></a>`.
pub const MARK_PRIORITY: [MarkKind; 6] = [
    MarkKind::Bold,
    MarkKind::Italic,
    MarkKind::Strike,
    MarkKind::Code,
    MarkKind::Underline,
    MarkKind::Link,
];

/// Result of rendering a document.
#[derive(Clone, Debug, Serialize)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Content left out of `html` because it could not be rendered safely.
    pub omissions: Vec<Omission>,
}

/// A piece of content dropped during rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Omission {
    /// Kind name of the dropped node or mark (e.g. `image`, `link`).
    pub node: String,
    /// Why it was dropped.
    #[serde(flatten)]
    pub reason: OmissionReason,
}

/// Why a piece of content was omitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum OmissionReason {
    /// URL attribute failed sanitization.
    UnsafeUrl { url: String },
    /// Required URL attribute was absent or not a string.
    MissingUrl,
    /// URL is safe but names no embeddable video.
    UnresolvableEmbed { url: String },
    /// Subtree sat deeper than the configured limit.
    DepthLimit { max_depth: usize },
}

impl fmt::Display for OmissionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsafeUrl { url } => write!(f, "unsafe or invalid URL {url:?}"),
            Self::MissingUrl => f.write_str("missing URL"),
            Self::UnresolvableEmbed { url } => write!(f, "no embeddable video in {url:?}"),
            Self::DepthLimit { max_depth } => {
                write!(f, "nested deeper than {max_depth} levels")
            }
        }
    }
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.node, self.reason)
    }
}

/// Document renderer with pluggable backend.
///
/// Holds only options, so one renderer can serve any number of documents,
/// concurrently if shared. Rendering never fails: content that cannot be
/// rendered safely is left out and reported in [`RenderResult::omissions`].
///
/// # Example
///
/// ```
/// use folio_renderer::{DocumentRenderer, HtmlBackend, Node};
/// use serde_json::json;
///
/// let doc = Node::from_json(&json!({
///     "type": "doc",
///     "content": [{"type": "paragraph", "content": [{"type": "text", "text": "Hi"}]}]
/// }));
/// let result = DocumentRenderer::<HtmlBackend>::new().render(&doc);
/// assert_eq!(result.html, "<p>Hi</p>");
/// ```
pub struct DocumentRenderer<B: RenderBackend> {
    options: RenderOptions,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> DocumentRenderer<B> {
    /// Create a renderer with default options.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: RenderOptions::default(),
            _backend: PhantomData,
        }
    }

    /// Replace all options.
    #[must_use]
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.options.max_depth = max_depth;
        self
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a document tree.
    pub fn render(&self, root: &Node) -> RenderResult {
        let mut pass = RenderPass::<B>::new(&self.options);
        pass.block(root, 0);
        RenderResult {
            html: pass.output,
            omissions: pass.omissions,
        }
    }

    /// Render a document tree, discarding omission details.
    pub fn render_html(&self, root: &Node) -> String {
        self.render(root).html
    }
}

impl<B: RenderBackend> Default for DocumentRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// A mark resolved for output.
enum AppliedMark {
    Tag(&'static str),
    Link(String),
}

/// State for a single render call.
struct RenderPass<'a, B: RenderBackend> {
    options: &'a RenderOptions,
    output: String,
    omissions: Vec<Omission>,
    _backend: PhantomData<B>,
}

impl<'a, B: RenderBackend> RenderPass<'a, B> {
    fn new(options: &'a RenderOptions) -> Self {
        Self {
            options,
            output: String::with_capacity(4096),
            omissions: Vec::new(),
            _backend: PhantomData,
        }
    }

    fn omit(&mut self, node: &str, reason: OmissionReason) {
        tracing::debug!(node, %reason, "Omitted content from rendered document");
        self.omissions.push(Omission {
            node: node.to_owned(),
            reason,
        });
    }

    /// Check the depth limit, recording an omission when it is exceeded.
    fn within_limit(&mut self, node: &Node, depth: usize) -> bool {
        if depth <= self.options.max_depth {
            return true;
        }
        tracing::trace!(node = node.kind.name(), depth, "Depth limit reached");
        self.omit(
            node.kind.name(),
            OmissionReason::DepthLimit {
                max_depth: self.options.max_depth,
            },
        );
        false
    }

    fn blocks(&mut self, nodes: &[Node], depth: usize) {
        for node in nodes {
            self.block(node, depth);
        }
    }

    fn block(&mut self, node: &Node, depth: usize) {
        if !self.within_limit(node, depth) {
            return;
        }
        let children = &node.children;
        let inner = depth + 1;

        match &node.kind {
            NodeKind::Document | NodeKind::Unknown(_) => self.blocks(children, inner),
            NodeKind::Paragraph => {
                self.output.push_str("<p>");
                self.inlines(children, inner);
                self.output.push_str("</p>");
            }
            NodeKind::Heading => {
                let level = heading_level(node.attr("level"));
                write!(self.output, "<h{level}>").unwrap();
                self.inlines(children, inner);
                write!(self.output, "</h{level}>").unwrap();
            }
            NodeKind::BulletList => {
                self.output.push_str("<ul>");
                self.blocks(children, inner);
                self.output.push_str("</ul>");
            }
            NodeKind::OrderedList => {
                match as_integer(node.attr("start")) {
                    Some(start) if start != 1 => {
                        write!(self.output, r#"<ol start="{start}">"#).unwrap();
                    }
                    _ => self.output.push_str("<ol>"),
                }
                self.blocks(children, inner);
                self.output.push_str("</ol>");
            }
            NodeKind::ListItem => {
                self.output.push_str("<li>");
                self.blocks(children, inner);
                self.output.push_str("</li>");
            }
            NodeKind::TaskList => {
                B::task_list_start(&mut self.output);
                self.blocks(children, inner);
                B::task_list_end(&mut self.output);
            }
            NodeKind::TaskItem => {
                let checked = node.attr("checked") == Some(&Value::Bool(true));
                B::task_item_start(checked, &mut self.output);
                self.task_label(children, inner);
                B::task_item_end(&mut self.output);
            }
            NodeKind::Blockquote => {
                B::blockquote_start(&mut self.output);
                self.blocks(children, inner);
                B::blockquote_end(&mut self.output);
            }
            NodeKind::CodeBlock => self.code_block(node, depth),
            NodeKind::HorizontalRule => B::horizontal_rule(&mut self.output),
            NodeKind::Image => self.image(node),
            NodeKind::YoutubeEmbed => self.video_embed(node),
            // Inline content in block position is rendered rather than lost.
            NodeKind::Text | NodeKind::LineBreak => self.inline(node, depth),
        }
    }

    fn code_block(&mut self, node: &Node, depth: usize) {
        let lang = node.attr_str("language").filter(|l| !l.is_empty());
        let budget = self.options.max_depth.saturating_sub(depth + 1);
        let mut content = String::new();
        if !collect_plain_text(&node.children, budget, &mut content) {
            self.omit(
                node.kind.name(),
                OmissionReason::DepthLimit {
                    max_depth: self.options.max_depth,
                },
            );
        }
        B::code_block(lang, &content, &mut self.output);
    }

    fn image(&mut self, node: &Node) {
        let Some(src) = node.attr_str("src") else {
            self.omit(node.kind.name(), OmissionReason::MissingUrl);
            return;
        };
        let Some(url) = sanitize_url(src) else {
            self.omit(
                node.kind.name(),
                OmissionReason::UnsafeUrl {
                    url: src.to_owned(),
                },
            );
            return;
        };
        let alt = node.attr_str("alt").unwrap_or_default();
        let title = node.attr_str("title");
        B::image(url.as_str(), alt, title, self.options, &mut self.output);
    }

    fn video_embed(&mut self, node: &Node) {
        let Some(src) = node.attr_str("src") else {
            self.omit(node.kind.name(), OmissionReason::MissingUrl);
            return;
        };
        if sanitize_url(src).is_none() {
            self.omit(
                node.kind.name(),
                OmissionReason::UnsafeUrl {
                    url: src.to_owned(),
                },
            );
            return;
        }
        let Some(embed_url) = to_embed_url(src) else {
            self.omit(
                node.kind.name(),
                OmissionReason::UnresolvableEmbed {
                    url: src.to_owned(),
                },
            );
            return;
        };
        let width = dimension(node.attr("width")).unwrap_or(self.options.embed_width);
        let height = dimension(node.attr("height")).unwrap_or(self.options.embed_height);
        B::video_embed(&embed_url, width, height, self.options, &mut self.output);
    }

    fn inlines(&mut self, nodes: &[Node], depth: usize) {
        for node in nodes {
            self.inline(node, depth);
        }
    }

    fn inline(&mut self, node: &Node, depth: usize) {
        if !self.within_limit(node, depth) {
            return;
        }
        match node.kind {
            NodeKind::Text => self.text(node),
            NodeKind::LineBreak => B::hard_break(&mut self.output),
            _ => self.inlines(&node.children, depth + 1),
        }
    }

    /// Render a task item label: paragraphs, text and breaks only.
    fn task_label(&mut self, nodes: &[Node], depth: usize) {
        for node in nodes {
            match node.kind {
                NodeKind::Paragraph | NodeKind::Text | NodeKind::LineBreak
                    if !self.within_limit(node, depth) => {}
                NodeKind::Paragraph => self.task_label(&node.children, depth + 1),
                NodeKind::Text => self.text(node),
                NodeKind::LineBreak => B::hard_break(&mut self.output),
                _ => {}
            }
        }
    }

    fn text(&mut self, node: &Node) {
        let marks = self.resolve_marks(&node.marks);
        for mark in marks.iter().rev() {
            match mark {
                AppliedMark::Tag(tag) => write!(self.output, "<{tag}>").unwrap(),
                AppliedMark::Link(href) => B::link_start(href, self.options, &mut self.output),
            }
        }
        push_escaped(
            node.text.as_deref().unwrap_or_default(),
            false,
            &mut self.output,
        );
        for mark in &marks {
            match mark {
                AppliedMark::Tag(tag) => write!(self.output, "</{tag}>").unwrap(),
                AppliedMark::Link(_) => B::link_end(&mut self.output),
            }
        }
    }

    /// Resolve a node's marks in [`MARK_PRIORITY`] order, innermost first.
    ///
    /// Each kind applies at most once. A link whose href fails sanitization
    /// is dropped; the remaining marks still apply.
    fn resolve_marks(&mut self, marks: &[Mark]) -> Vec<AppliedMark> {
        let mut applied = Vec::new();
        for kind in &MARK_PRIORITY {
            let Some(mark) = marks.iter().find(|m| &m.kind == kind) else {
                continue;
            };
            let resolved = match kind {
                MarkKind::Bold => AppliedMark::Tag("strong"),
                MarkKind::Italic => AppliedMark::Tag("em"),
                MarkKind::Strike => AppliedMark::Tag("s"),
                MarkKind::Code => AppliedMark::Tag("code"),
                MarkKind::Underline => AppliedMark::Tag("u"),
                MarkKind::Link => match mark.attr_str("href") {
                    Some(href) => match sanitize_url(href) {
                        Some(url) => AppliedMark::Link(url.into()),
                        None => {
                            self.omit(
                                "link",
                                OmissionReason::UnsafeUrl {
                                    url: href.to_owned(),
                                },
                            );
                            continue;
                        }
                    },
                    None => {
                        self.omit("link", OmissionReason::MissingUrl);
                        continue;
                    }
                },
                MarkKind::Unknown(_) => continue,
            };
            applied.push(resolved);
        }
        applied
    }
}

/// Read a positive pixel dimension attribute.
fn dimension(value: Option<&Value>) -> Option<u32> {
    as_integer(value)
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
}
