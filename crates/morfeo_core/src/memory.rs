//! In-memory host document
//!
//! A serializable stand-in for the design tool. The CLI persists it as JSON
//! between runs and the test suites use it as the injected host.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::{
    Document, Measure, NodeId, NodeKind, Notifier, NotifyOptions, PluginData, StyleKey, UiBridge,
};
use crate::error::DocumentError;
use crate::styles::{PaintStyle, TextStyle};

/// A single scene-graph node
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryNode {
    pub kind: NodeKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<NodeId>,
    #[serde(default)]
    pub children: Vec<NodeId>,
    #[serde(default)]
    pub styles: IndexMap<StyleKey, Measure>,
    #[serde(default)]
    pub width: f32,
    #[serde(default)]
    pub height: f32,
    /// namespace -> key -> value
    #[serde(default)]
    pub plugin_data: IndexMap<String, IndexMap<String, String>>,
}

impl MemoryNode {
    fn new(kind: NodeKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            parent: None,
            children: Vec::new(),
            styles: IndexMap::new(),
            width: 100.0,
            height: 100.0,
            plugin_data: IndexMap::new(),
        }
    }

    fn supports(&self, key: StyleKey) -> bool {
        match self.kind {
            NodeKind::Rectangle | NodeKind::Frame | NodeKind::Component | NodeKind::ComponentSet => {
                true
            }
            NodeKind::Line => key == StyleKey::StrokeWeight,
            NodeKind::Page | NodeKind::Text => false,
        }
    }
}

/// A notification shown through [`Notifier`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub options: NotifyOptions,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryDocument {
    #[serde(default)]
    pages: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_page: Option<NodeId>,
    #[serde(default)]
    nodes: IndexMap<NodeId, MemoryNode>,
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    paint_styles: Vec<PaintStyle>,
    #[serde(default)]
    text_styles: Vec<TextStyle>,

    #[serde(skip)]
    notifications: Vec<Notification>,
    #[serde(skip)]
    outbox: Vec<serde_json::Value>,
    #[serde(skip)]
    closed: bool,
    #[serde(skip)]
    removed: Vec<NodeId>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: &NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Make a style read back as `Mixed`
    pub fn set_mixed(&mut self, id: &NodeId, key: StyleKey) -> Result<(), DocumentError> {
        let node = self.node_mut(id)?;
        node.styles.insert(key, Measure::Mixed);
        Ok(())
    }

    pub fn add_paint_style(&mut self, style: PaintStyle) {
        self.paint_styles.push(style);
    }

    pub fn add_text_style(&mut self, style: TextStyle) {
        self.text_styles.push(style);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn outbox(&self) -> &[serde_json::Value] {
        &self.outbox
    }

    pub fn take_outbox(&mut self) -> Vec<serde_json::Value> {
        std::mem::take(&mut self.outbox)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Ids passed to successful [`Document::remove_node`] calls, in order
    pub fn removed(&self) -> &[NodeId] {
        &self.removed
    }

    fn allocate_id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId::new(format!("1:{}", self.next_id))
    }

    fn node_mut(&mut self, id: &NodeId) -> Result<&mut MemoryNode, DocumentError> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| DocumentError::NodeNotFound(id.clone()))
    }

    fn detach(&mut self, id: &NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|node| node.parent.take());
        if let Some(parent) = parent {
            if let Some(parent) = self.nodes.get_mut(&parent) {
                parent.children.retain(|child| child != id);
            }
        }
    }

    fn is_ancestor(&self, ancestor: &NodeId, of: &NodeId) -> bool {
        let mut cursor = self.nodes.get(of).and_then(|node| node.parent.clone());
        while let Some(id) = cursor {
            if &id == ancestor {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|node| node.parent.clone());
        }
        false
    }

    fn attach(&mut self, parent: &NodeId, child: &NodeId) {
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent.clone());
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child.clone());
        }
    }
}

impl Document for MemoryDocument {
    fn pages(&self) -> Vec<NodeId> {
        self.pages.clone()
    }

    fn create_page(&mut self, name: &str) -> NodeId {
        let id = self.allocate_id();
        self.nodes
            .insert(id.clone(), MemoryNode::new(NodeKind::Page, name));
        self.pages.push(id.clone());
        id
    }

    fn set_current_page(&mut self, page: &NodeId) -> Result<(), DocumentError> {
        match self.node_kind(page) {
            Some(NodeKind::Page) => {
                self.current_page = Some(page.clone());
                Ok(())
            }
            Some(found) => Err(DocumentError::UnexpectedKind {
                id: page.clone(),
                found,
                expected: NodeKind::Page,
            }),
            None => Err(DocumentError::NodeNotFound(page.clone())),
        }
    }

    fn create_node(&mut self, kind: NodeKind, name: &str) -> NodeId {
        let id = self.allocate_id();
        self.nodes.insert(id.clone(), MemoryNode::new(kind, name));
        if let Some(page) = self.current_page.clone() {
            self.attach(&page, &id);
        }
        id
    }

    fn node_kind(&self, id: &NodeId) -> Option<NodeKind> {
        self.nodes.get(id).map(|node| node.kind)
    }

    fn node_name(&self, id: &NodeId) -> Option<String> {
        self.nodes.get(id).map(|node| node.name.clone())
    }

    fn set_node_name(&mut self, id: &NodeId, name: &str) -> Result<(), DocumentError> {
        self.node_mut(id)?.name = name.to_string();
        Ok(())
    }

    fn children(&self, id: &NodeId) -> Vec<NodeId> {
        self.nodes
            .get(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DocumentError> {
        let parent_kind = self
            .node_kind(parent)
            .ok_or_else(|| DocumentError::NodeNotFound(parent.clone()))?;
        let child_kind = self
            .node_kind(child)
            .ok_or_else(|| DocumentError::NodeNotFound(child.clone()))?;

        let reason = if parent == child || self.is_ancestor(child, parent) {
            Some("the child contains the parent")
        } else if child_kind == NodeKind::Page {
            Some("pages cannot be nested")
        } else if parent_kind == NodeKind::ComponentSet && child_kind != NodeKind::Component {
            Some("component sets only hold components")
        } else if matches!(parent_kind, NodeKind::Rectangle | NodeKind::Line | NodeKind::Text) {
            Some("shapes cannot hold children")
        } else {
            None
        };

        if let Some(reason) = reason {
            return Err(DocumentError::InvalidHierarchy {
                parent: parent.clone(),
                child: child.clone(),
                reason: reason.to_string(),
            });
        }

        self.attach(parent, child);
        Ok(())
    }

    fn combine_as_variants(
        &mut self,
        components: &[NodeId],
        parent: &NodeId,
    ) -> Result<NodeId, DocumentError> {
        for id in components {
            match self.node_kind(id) {
                Some(NodeKind::Component) => {}
                Some(found) => {
                    return Err(DocumentError::UnexpectedKind {
                        id: id.clone(),
                        found,
                        expected: NodeKind::Component,
                    })
                }
                None => return Err(DocumentError::NodeNotFound(id.clone())),
            }
        }

        let set = self.allocate_id();
        self.nodes.insert(
            set.clone(),
            MemoryNode::new(NodeKind::ComponentSet, "Component set"),
        );
        self.append_child(parent, &set)?;
        for id in components {
            self.attach(&set, id);
        }
        Ok(set)
    }

    fn style_value(&self, id: &NodeId, key: StyleKey) -> Option<Measure> {
        let node = self.nodes.get(id)?;
        if !node.supports(key) {
            return None;
        }
        Some(
            node.styles
                .get(&key)
                .copied()
                .unwrap_or(Measure::Value(0.0)),
        )
    }

    fn set_style_value(
        &mut self,
        id: &NodeId,
        key: StyleKey,
        value: f32,
    ) -> Result<(), DocumentError> {
        let node = self.node_mut(id)?;
        if !node.supports(key) {
            return Err(DocumentError::UnexpectedKind {
                id: id.clone(),
                found: node.kind,
                expected: NodeKind::Rectangle,
            });
        }
        node.styles.insert(key, Measure::Value(value));
        Ok(())
    }

    fn resize(&mut self, id: &NodeId, width: f32, height: f32) -> Result<(), DocumentError> {
        let node = self.node_mut(id)?;
        node.width = width;
        node.height = height;
        Ok(())
    }

    fn remove_node(&mut self, id: &NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.detach(id);
        self.pages.retain(|page| page != id);
        if self.current_page.as_ref() == Some(id) {
            self.current_page = None;
        }

        let mut stack = vec![id.clone()];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.shift_remove(&next) {
                stack.extend(node.children);
            }
        }
        self.removed.push(id.clone());
        true
    }

    fn local_paint_styles(&self) -> Vec<PaintStyle> {
        self.paint_styles.clone()
    }

    fn local_text_styles(&self) -> Vec<TextStyle> {
        self.text_styles.clone()
    }
}

impl PluginData for MemoryDocument {
    fn plugin_data(&self, node: &NodeId, namespace: &str, key: &str) -> String {
        self.nodes
            .get(node)
            .and_then(|node| node.plugin_data.get(namespace))
            .and_then(|entries| entries.get(key))
            .cloned()
            .unwrap_or_default()
    }

    fn set_plugin_data(
        &mut self,
        node: &NodeId,
        namespace: &str,
        key: &str,
        value: &str,
    ) -> Result<(), DocumentError> {
        self.node_mut(node)?
            .plugin_data
            .entry(namespace.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl Notifier for MemoryDocument {
    fn notify(&mut self, message: &str, options: NotifyOptions) {
        if options.error {
            tracing::warn!("notify: {message}");
        } else {
            tracing::info!("notify: {message}");
        }
        self.notifications.push(Notification {
            message: message.to_string(),
            options,
        });
    }
}

impl UiBridge for MemoryDocument {
    fn post_message(&mut self, message: serde_json::Value) {
        self.outbox.push(message);
    }

    fn close_plugin(&mut self) {
        self.closed = true;
    }
}
