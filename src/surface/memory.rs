//! In-memory surface.
//!
//! Nodes live in a flat arena indexed by [`NodeId`]. Every mutation is also
//! appended to an operation log so callers can check exactly what happened,
//! and in which order. The log is on by default and can be switched off for
//! long-lived surfaces.

use crate::error::SurfaceError;
use crate::types::{AttrValue, Attributes, NODE_VALUE};
use super::{NodeId, Surface};

// =============================================================================
// Nodes
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum MemoryNodeKind {
    Element(String),
    Text,
}

/// One node of a [`MemorySurface`].
#[derive(Debug, Clone)]
pub struct MemoryNode {
    kind: MemoryNodeKind,
    attributes: Attributes,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl MemoryNode {
    pub fn kind(&self) -> &MemoryNodeKind {
        &self.kind
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            MemoryNodeKind::Element(tag) => Some(tag),
            MemoryNodeKind::Text => None,
        }
    }
}

/// A recorded surface mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceOp {
    CreateElement { node: NodeId, tag: String },
    CreateText { node: NodeId },
    SetAttribute { node: NodeId, name: String },
    Append { parent: NodeId, child: NodeId },
}

// =============================================================================
// Memory Surface
// =============================================================================

/// Headless surface backed by a node arena.
#[derive(Debug)]
pub struct MemorySurface {
    nodes: Vec<MemoryNode>,
    ops: Vec<SurfaceOp>,
    log_ops: bool,
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySurface {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            ops: Vec::new(),
            log_ops: true,
        }
    }

    /// New surface with one detached element to render into.
    pub fn with_container(tag: &str) -> Result<(Self, NodeId), SurfaceError> {
        let mut surface = Self::new();
        let container = surface.create_element(tag)?;
        Ok((surface, container))
    }

    pub fn node(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Children of a node, empty for unknown nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|n| n.parent)
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&AttrValue> {
        self.node(id).and_then(|n| n.attributes.get(name))
    }

    /// Operations applied so far, oldest first.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Turn the operation log on or off. Turning it off also clears it.
    pub fn set_op_log(&mut self, enabled: bool) {
        self.log_ops = enabled;
        if !enabled {
            self.ops = Vec::new();
        }
    }

    pub fn logs_ops(&self) -> bool {
        self.log_ops
    }

    fn record(&mut self, op: SurfaceOp) {
        if self.log_ops {
            self.ops.push(op);
        }
    }

    /// Whether `node` sits somewhere below `ancestor`.
    pub fn is_attached(&self, node: NodeId, ancestor: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Concatenated text of every text node below (and including) `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else { continue };
            if node.kind == MemoryNodeKind::Text {
                if let Some(value) = node.attributes.get(NODE_VALUE) {
                    out.push_str(&value.to_string());
                }
            }
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// Render a subtree as markup, e.g. `<div id="foo"><a>bar</a></div>`.
    pub fn to_markup(&self, id: NodeId) -> String {
        enum Step {
            Open(NodeId),
            Close(NodeId),
        }

        let mut out = String::new();
        let mut stack = vec![Step::Open(id)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Open(current) => {
                    let Some(node) = self.node(current) else { continue };
                    match &node.kind {
                        MemoryNodeKind::Text => {
                            if let Some(value) = node.attributes.get(NODE_VALUE) {
                                out.push_str(&value.to_string());
                            }
                        }
                        MemoryNodeKind::Element(tag) => {
                            out.push('<');
                            out.push_str(tag);
                            for (name, value) in &node.attributes {
                                out.push_str(&format!(" {}=\"{}\"", name, value));
                            }
                            out.push('>');
                            stack.push(Step::Close(current));
                            for child in node.children.iter().rev() {
                                stack.push(Step::Open(*child));
                            }
                        }
                    }
                }
                Step::Close(current) => {
                    if let Some(tag) = self.node(current).and_then(|n| n.tag()) {
                        out.push_str(&format!("</{}>", tag));
                    }
                }
            }
        }

        out
    }

    fn push_node(&mut self, kind: MemoryNodeKind) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(MemoryNode {
            kind,
            attributes: Attributes::new(),
            children: Vec::new(),
            parent: None,
        });
        id
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, SurfaceError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(SurfaceError::UnknownNode(id))
    }
}

fn is_valid_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ':')
}

impl Surface for MemorySurface {
    fn create_element(&mut self, tag: &str) -> Result<NodeId, SurfaceError> {
        if !is_valid_tag(tag) {
            return Err(SurfaceError::InvalidTag(tag.to_string()));
        }
        let node = self.push_node(MemoryNodeKind::Element(tag.to_string()));
        self.record(SurfaceOp::CreateElement {
            node,
            tag: tag.to_string(),
        });
        Ok(node)
    }

    fn create_text_node(&mut self) -> Result<NodeId, SurfaceError> {
        let node = self.push_node(MemoryNodeKind::Text);
        self.record(SurfaceOp::CreateText { node });
        Ok(node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        if parent == child {
            return Err(SurfaceError::SelfAppend(child));
        }
        let parent_node = self.node(parent).ok_or(SurfaceError::UnknownNode(parent))?;
        if parent_node.kind == MemoryNodeKind::Text {
            return Err(SurfaceError::TextHasNoChildren(parent));
        }
        let child_node = self.node(child).ok_or(SurfaceError::UnknownNode(child))?;
        if let Some(existing) = child_node.parent {
            return Err(SurfaceError::AlreadyAttached {
                child,
                parent: existing,
            });
        }
        if self.is_attached(parent, child) {
            return Err(SurfaceError::Rejected(format!(
                "appending {} under {} would create a cycle",
                child, parent
            )));
        }

        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.record(SurfaceOp::Append { parent, child });
        Ok(())
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &AttrValue) -> Result<(), SurfaceError> {
        self.node_mut(node)?
            .attributes
            .insert(name.to_string(), value.clone());
        self.record(SurfaceOp::SetAttribute {
            node,
            name: name.to_string(),
        });
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_markup() {
        let (mut surface, root) = MemorySurface::with_container("root").unwrap();
        let div = surface.create_element("div").unwrap();
        let text = surface.create_text_node().unwrap();
        surface.set_attribute(div, "id", &"foo".into()).unwrap();
        surface.set_attribute(text, NODE_VALUE, &"hi".into()).unwrap();

        surface.append_child(div, text).unwrap();
        surface.append_child(root, div).unwrap();

        assert_eq!(surface.to_markup(root), r#"<root><div id="foo">hi</div></root>"#);
        assert_eq!(surface.text_content(root), "hi");
        assert!(surface.is_attached(text, root));
        assert_eq!(surface.parent(div), Some(root));
    }

    #[test]
    fn test_ops_are_logged_in_order() {
        let mut surface = MemorySurface::new();
        let a = surface.create_element("a").unwrap();
        let t = surface.create_text_node().unwrap();
        surface.append_child(a, t).unwrap();

        assert_eq!(
            surface.ops(),
            &[
                SurfaceOp::CreateElement { node: a, tag: "a".into() },
                SurfaceOp::CreateText { node: t },
                SurfaceOp::Append { parent: a, child: t },
            ]
        );

        surface.clear_ops();
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_invalid_appends() {
        let mut surface = MemorySurface::new();
        let a = surface.create_element("a").unwrap();
        let b = surface.create_element("b").unwrap();
        let t = surface.create_text_node().unwrap();

        assert_eq!(surface.append_child(a, a), Err(SurfaceError::SelfAppend(a)));
        assert_eq!(surface.append_child(t, a), Err(SurfaceError::TextHasNoChildren(t)));
        assert_eq!(
            surface.append_child(a, NodeId::new(99)),
            Err(SurfaceError::UnknownNode(NodeId::new(99)))
        );

        surface.append_child(a, b).unwrap();
        assert_eq!(
            surface.append_child(t, b),
            Err(SurfaceError::TextHasNoChildren(t))
        );
        let c = surface.create_element("c").unwrap();
        assert_eq!(
            surface.append_child(c, b),
            Err(SurfaceError::AlreadyAttached { child: b, parent: a })
        );
        assert!(matches!(surface.append_child(b, a), Err(SurfaceError::Rejected(_))));
    }

    #[test]
    fn test_op_log_can_be_switched_off() {
        let mut surface = MemorySurface::new();
        assert!(surface.logs_ops());
        surface.create_element("a").unwrap();
        assert_eq!(surface.ops().len(), 1);

        surface.set_op_log(false);
        assert!(surface.ops().is_empty());
        let b = surface.create_element("b").unwrap();
        let t = surface.create_text_node().unwrap();
        surface.append_child(b, t).unwrap();

        assert!(surface.ops().is_empty());
        assert_eq!(surface.children(b), &[t]);
    }

    #[test]
    fn test_invalid_tag() {
        let mut surface = MemorySurface::new();
        assert_eq!(
            surface.create_element("not a tag"),
            Err(SurfaceError::InvalidTag("not a tag".into()))
        );
        assert!(surface.is_empty());
    }
}
