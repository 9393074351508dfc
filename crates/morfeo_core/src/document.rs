//! Host document boundary
//!
//! Everything the engine needs from the design tool goes through the traits in
//! this module. Production hosts bridge them to the editor's scene graph; tests
//! and the CLI use [`MemoryDocument`](crate::MemoryDocument).
//!
//! - [`Document`]: scene-graph reads and mutations
//! - [`PluginData`]: string storage scoped to a node
//! - [`Notifier`]: transient user notifications
//! - [`UiBridge`]: messages back to the plugin UI

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::styles::{PaintStyle, TextStyle};

/// Identifier of a node inside the host document
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Closed set of node kinds the plugin interacts with
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Page,
    Frame,
    Rectangle,
    Line,
    Text,
    Component,
    ComponentSet,
}

impl NodeKind {
    /// Host-side type tag
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Page => "PAGE",
            Self::Frame => "FRAME",
            Self::Rectangle => "RECTANGLE",
            Self::Line => "LINE",
            Self::Text => "TEXT",
            Self::Component => "COMPONENT",
            Self::ComponentSet => "COMPONENT_SET",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric node attribute driven by a slice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleKey {
    CornerRadius,
    StrokeWeight,
}

impl StyleKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CornerRadius => "cornerRadius",
            Self::StrokeWeight => "strokeWeight",
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A style value as read from the host
///
/// Composite shapes report `Mixed` when their parts disagree (e.g. a rectangle
/// with four different corner radii).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Measure {
    Value(f32),
    Mixed,
}

impl Measure {
    pub fn value(self) -> Option<f32> {
        match self {
            Self::Value(v) => Some(v),
            Self::Mixed => None,
        }
    }
}

/// Presentation options for [`Notifier::notify`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyOptions {
    pub error: bool,
    pub timeout: Option<Duration>,
}

impl NotifyOptions {
    pub fn error() -> Self {
        Self {
            error: true,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, millis: u64) -> Self {
        self.timeout = Some(Duration::from_millis(millis));
        self
    }
}

/// Scene-graph access
pub trait Document {
    /// Top-level pages in document order
    fn pages(&self) -> Vec<NodeId>;

    fn create_page(&mut self, name: &str) -> NodeId;

    fn set_current_page(&mut self, page: &NodeId) -> Result<(), DocumentError>;

    /// Create a detached node on the current page
    fn create_node(&mut self, kind: NodeKind, name: &str) -> NodeId;

    /// `None` when the id does not resolve to a live node
    fn node_kind(&self, id: &NodeId) -> Option<NodeKind>;

    fn node_name(&self, id: &NodeId) -> Option<String>;

    fn set_node_name(&mut self, id: &NodeId, name: &str) -> Result<(), DocumentError>;

    /// Direct children in order; empty for unknown ids
    fn children(&self, id: &NodeId) -> Vec<NodeId>;

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DocumentError>;

    /// Combine components into a component set appended to `parent`
    fn combine_as_variants(
        &mut self,
        components: &[NodeId],
        parent: &NodeId,
    ) -> Result<NodeId, DocumentError>;

    /// `None` when the node is missing or does not carry `key`
    fn style_value(&self, id: &NodeId, key: StyleKey) -> Option<Measure>;

    fn set_style_value(&mut self, id: &NodeId, key: StyleKey, value: f32)
        -> Result<(), DocumentError>;

    fn resize(&mut self, id: &NodeId, width: f32, height: f32) -> Result<(), DocumentError>;

    /// Remove a node and its subtree. Returns `false` if it was already gone.
    fn remove_node(&mut self, id: &NodeId) -> bool;

    fn local_paint_styles(&self) -> Vec<PaintStyle>;

    fn local_text_styles(&self) -> Vec<TextStyle>;

    /// First page with the given name
    fn find_page(&self, name: &str) -> Option<NodeId> {
        self.pages()
            .into_iter()
            .find(|page| self.node_name(page).as_deref() == Some(name))
    }

    /// Depth-first search below `root` for a node of `kind` named `name`
    fn find_one(&self, root: &NodeId, kind: NodeKind, name: &str) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            if self.node_kind(&id) == Some(kind) && self.node_name(&id).as_deref() == Some(name) {
                return Some(id);
            }
            stack.extend(self.children(&id).into_iter().rev());
        }
        None
    }
}

/// Per-node string storage. Missing entries read as the empty string.
pub trait PluginData {
    fn plugin_data(&self, node: &NodeId, namespace: &str, key: &str) -> String;

    fn set_plugin_data(
        &mut self,
        node: &NodeId,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<(), DocumentError>;
}

/// Transient user notifications
pub trait Notifier {
    fn notify(&mut self, message: &str, options: NotifyOptions);
}

/// Channel back to the plugin UI
pub trait UiBridge {
    fn post_message(&mut self, message: serde_json::Value);

    fn close_plugin(&mut self);
}

/// Everything a plugin action needs from its host
pub trait Host: Document + PluginData + Notifier + UiBridge {}

impl<T: Document + PluginData + Notifier + UiBridge> Host for T {}
