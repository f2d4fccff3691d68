//! Document tree model and tolerant JSON loading.
//!
//! Documents arrive as editor JSON (`type`/`attrs`/`content`/`text`/`marks`).
//! Loading never fails: malformed fields degrade to their empty form and
//! unrecognized kinds are kept as [`NodeKind::Unknown`] so the renderer can
//! fall back to their children.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Node attributes as supplied by the editor.
pub type Attrs = Map<String, Value>;

/// Conversion stops descending below this depth.
pub const MAX_NESTING: usize = 512;

/// Kind of a document node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Paragraph,
    Heading,
    BulletList,
    OrderedList,
    ListItem,
    TaskList,
    TaskItem,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    Image,
    YoutubeEmbed,
    Text,
    LineBreak,
    /// A kind this renderer does not know, with its original name.
    Unknown(String),
}

impl NodeKind {
    /// Map an editor type name to a kind.
    ///
    /// Both the editor spelling (`doc`, `hardBreak`, `youtube`) and the
    /// descriptive spelling (`document`, `lineBreak`, `youtubeEmbed`) are
    /// recognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "doc" | "document" => Self::Document,
            "paragraph" => Self::Paragraph,
            "heading" => Self::Heading,
            "bulletList" => Self::BulletList,
            "orderedList" => Self::OrderedList,
            "listItem" => Self::ListItem,
            "taskList" => Self::TaskList,
            "taskItem" => Self::TaskItem,
            "blockquote" => Self::Blockquote,
            "codeBlock" => Self::CodeBlock,
            "horizontalRule" => Self::HorizontalRule,
            "image" => Self::Image,
            "youtube" | "youtubeEmbed" => Self::YoutubeEmbed,
            "text" => Self::Text,
            "hardBreak" | "lineBreak" => Self::LineBreak,
            other => Self::Unknown(other.to_owned()),
        }
    }

    /// Canonical name, used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Document => "document",
            Self::Paragraph => "paragraph",
            Self::Heading => "heading",
            Self::BulletList => "bulletList",
            Self::OrderedList => "orderedList",
            Self::ListItem => "listItem",
            Self::TaskList => "taskList",
            Self::TaskItem => "taskItem",
            Self::Blockquote => "blockquote",
            Self::CodeBlock => "codeBlock",
            Self::HorizontalRule => "horizontalRule",
            Self::Image => "image",
            Self::YoutubeEmbed => "youtubeEmbed",
            Self::Text => "text",
            Self::LineBreak => "lineBreak",
            Self::Unknown(name) => name,
        }
    }
}

/// Kind of an inline text decoration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkKind {
    Bold,
    Italic,
    Strike,
    Code,
    Underline,
    Link,
    /// Unrecognized mark; ignored when rendering.
    Unknown(String),
}

impl MarkKind {
    /// Map an editor mark name to a kind.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "bold" | "strong" => Self::Bold,
            "italic" | "em" => Self::Italic,
            "strike" | "strikethrough" | "s" => Self::Strike,
            "code" => Self::Code,
            "underline" => Self::Underline,
            "link" => Self::Link,
            other => Self::Unknown(other.to_owned()),
        }
    }
}

/// Inline decoration attached to a text node.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    pub kind: MarkKind,
    pub attrs: Attrs,
}

impl Mark {
    /// Create a mark without attributes.
    #[must_use]
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
        }
    }

    /// Create a link mark pointing at `href`.
    #[must_use]
    pub fn link(href: impl Into<String>) -> Self {
        let mut attrs = Attrs::new();
        attrs.insert("href".to_owned(), Value::String(href.into()));
        Self {
            kind: MarkKind::Link,
            attrs,
        }
    }

    /// String value of attribute `name`, if present and a string.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).and_then(Value::as_str)
    }

    fn from_json(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let kind = match type_name(obj) {
            Some(name) => MarkKind::from_name(name),
            None => MarkKind::Unknown(String::new()),
        };
        Some(Self {
            kind,
            attrs: attrs_of(obj),
        })
    }
}

/// One node of a document tree.
///
/// The tree is plain owned data: the renderer borrows it and never mutates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub attrs: Attrs,
    pub children: Vec<Node>,
    /// Raw text; only meaningful on [`NodeKind::Text`].
    pub text: Option<String>,
    /// Decorations; only meaningful on [`NodeKind::Text`].
    pub marks: Vec<Mark>,
}

impl Node {
    /// Create an empty node of the given kind.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attrs: Attrs::new(),
            children: Vec::new(),
            text: None,
            marks: Vec::new(),
        }
    }

    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(NodeKind::Text)
        }
    }

    /// Create a line break node.
    #[must_use]
    pub fn line_break() -> Self {
        Self::new(NodeKind::LineBreak)
    }

    /// Replace the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Set one attribute.
    #[must_use]
    pub fn with_attr(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.attrs.insert(name.to_owned(), value.into());
        self
    }

    /// Replace the marks.
    #[must_use]
    pub fn with_marks(mut self, marks: Vec<Mark>) -> Self {
        self.marks = marks;
        self
    }

    /// Attribute `name`, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// String value of attribute `name`, if present and a string.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// Convert an editor JSON value into a node tree.
    ///
    /// Total over all JSON values: see the module docs for how malformed
    /// input degrades. Subtrees nested deeper than [`MAX_NESTING`] are dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use folio_renderer::{Node, NodeKind};
    /// use serde_json::json;
    ///
    /// let doc = Node::from_json(&json!({
    ///     "type": "doc",
    ///     "content": [{"type": "paragraph", "content": "not an array"}]
    /// }));
    /// assert_eq!(doc.kind, NodeKind::Document);
    /// assert!(doc.children[0].children.is_empty());
    /// ```
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        Self::from_json_at(value, 0)
    }

    fn from_json_at(value: &Value, depth: usize) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::new(NodeKind::Unknown(String::new()));
        };

        let kind = match type_name(obj) {
            Some(name) => NodeKind::from_name(name),
            None => NodeKind::Unknown(String::new()),
        };

        let children = match field(obj, "content", "children").and_then(Value::as_array) {
            Some(items) if depth < MAX_NESTING => items
                .iter()
                .map(|item| Self::from_json_at(item, depth + 1))
                .collect(),
            _ => Vec::new(),
        };

        let marks = obj
            .get("marks")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Mark::from_json).collect())
            .unwrap_or_default();

        Self {
            kind,
            attrs: attrs_of(obj),
            children,
            text: obj.get("text").and_then(Value::as_str).map(str::to_owned),
            marks,
        }
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Look up a field under its editor name, falling back to the descriptive name.
fn field<'a>(obj: &'a Map<String, Value>, editor: &str, descriptive: &str) -> Option<&'a Value> {
    obj.get(editor).or_else(|| obj.get(descriptive))
}

fn type_name(obj: &Map<String, Value>) -> Option<&str> {
    field(obj, "type", "kind").and_then(Value::as_str)
}

fn attrs_of(obj: &Map<String, Value>) -> Attrs {
    field(obj, "attrs", "attributes")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}
