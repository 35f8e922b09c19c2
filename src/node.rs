//! Node types for the rendered output tree.
//!
//! The node tree is the output of the render contract: a retained structure
//! describing what a diff view looks like, independent of any terminal or
//! paint backend. Consumers walk the tree and draw it however they like;
//! tests walk it to assert on content and styling.

use crate::style::{Color, FlexDirection, TextStyle};
use smallvec::SmallVec;
use smartstring::alias::String as SmartString;
use std::sync::atomic::{AtomicU64, Ordering};
use unicode_width::UnicodeWidthStr;

/// Type alias for node children collections.
///
/// Uses SmallVec with boxed nodes - the Box provides necessary indirection
/// for the recursive Node type while SmallVec keeps small child counts
/// inline.
pub type NodeChildren = SmallVec<[Box<Node>; 8]>;

/// Unique identifier for nodes in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

impl NodeId {
    /// Generate a new unique node ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        NodeId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// A node in the rendered output tree.
#[derive(Debug, Clone)]
pub enum Node {
    /// Container node stacking children in a row or column.
    Box(BoxNode),
    /// Text content node.
    Text(TextNode),
}

impl Node {
    /// Get the node's unique ID.
    #[inline]
    pub fn id(&self) -> NodeId {
        match self {
            Node::Box(n) => n.id,
            Node::Text(n) => n.id,
        }
    }

    /// Get the node's children (empty for text nodes).
    pub fn children(&self) -> &[Box<Node>] {
        match self {
            Node::Box(n) => &n.children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenate all text content in the subtree, in tree order.
    pub fn collect_text(&self) -> String {
        match self {
            Node::Text(t) => t.content.to_string(),
            Node::Box(b) => {
                let mut out = String::new();
                for child in &b.children {
                    out.push_str(&child.collect_text());
                }
                out
            }
        }
    }
}

// === Box Node ===

/// Container node stacking children along one axis.
///
/// # Example
///
/// ```
/// use diffpane::node::{BoxNode, TextNode};
/// use diffpane::style::FlexDirection;
///
/// let row = BoxNode::new()
///     .flex_direction(FlexDirection::Row)
///     .child(TextNode::new("left"))
///     .child(TextNode::new("right"));
/// ```
#[derive(Debug, Clone)]
pub struct BoxNode {
    /// Unique identifier.
    pub id: NodeId,
    /// Child nodes.
    pub children: NodeChildren,
    /// Stacking direction of children.
    pub direction: FlexDirection,
    /// Explicit height in terminal rows, if fixed.
    ///
    /// Virtualized containers and spacers carry fixed heights so that
    /// scrollbar sizing is independent of how many rows materialized.
    pub height: Option<usize>,
}

impl BoxNode {
    /// Create a new box node.
    pub fn new() -> Self {
        Self {
            id: NodeId::new(),
            children: SmallVec::new(),
            direction: FlexDirection::Row,
            height: None,
        }
    }

    /// Set the stacking direction.
    pub fn flex_direction(mut self, direction: FlexDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Set an explicit height in terminal rows.
    pub fn height(mut self, rows: usize) -> Self {
        self.height = Some(rows);
        self
    }

    /// Add a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(Box::new(node.into()));
        self
    }

    /// Add multiple children.
    pub fn children(mut self, nodes: impl IntoIterator<Item = impl Into<Node>>) -> Self {
        self.children
            .extend(nodes.into_iter().map(|n| Box::new(n.into())));
        self
    }
}

impl Default for BoxNode {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BoxNode> for Node {
    fn from(node: BoxNode) -> Self {
        Node::Box(node)
    }
}

// === Text Node ===

/// Text content node with styling.
#[derive(Debug, Clone)]
pub struct TextNode {
    /// Unique identifier.
    pub id: NodeId,
    /// The text content.
    pub content: SmartString,
    /// Text appearance.
    pub text_style: TextStyle,
}

impl TextNode {
    /// Create a new text node.
    pub fn new(content: impl AsRef<str>) -> Self {
        Self {
            id: NodeId::new(),
            content: SmartString::from(content.as_ref()),
            text_style: TextStyle::new(),
        }
    }

    /// Set the foreground color.
    pub fn color(mut self, color: Color) -> Self {
        self.text_style.color = Some(color);
        self
    }

    /// Set the background color.
    pub fn bg(mut self, color: Color) -> Self {
        self.text_style.background_color = Some(color);
        self
    }

    /// Set bold.
    pub fn bold(mut self) -> Self {
        self.text_style.bold = true;
        self
    }

    /// Set dim.
    pub fn dim(mut self) -> Self {
        self.text_style.dim = true;
        self
    }

    /// Set inverse.
    pub fn inverse(mut self) -> Self {
        self.text_style.inverse = true;
        self
    }

    /// Display width of the content in terminal columns.
    ///
    /// Uses Unicode width rules, so CJK and other wide characters count as
    /// two columns.
    pub fn display_width(&self) -> usize {
        UnicodeWidthStr::width(self.content.as_str())
    }
}

impl From<TextNode> for Node {
    fn from(node: TextNode) -> Self {
        Node::Text(node)
    }
}
