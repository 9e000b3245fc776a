//! Node arena.
//!
//! Nodes live in a single `Vec` owned by [`LayoutTree`] and address each
//! other by [`NodeId`]. Children are owned index lists; the parent link is a
//! plain index with no ownership, so the parent/child cycle needs no
//! reference counting.

use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::node::{LayoutNode, NodeKind};
use crate::primitives::Rect;

/// Handle to a node inside a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Arena owning every node of one document.
///
/// Structure is append-only: a child is attached once and never moves, so
/// parent/children edges stay fixed for the duration of any layout pass.
#[derive(Debug, Default)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node, validating its insets.
    pub fn insert(&mut self, node: LayoutNode) -> Result<NodeId, LayoutError> {
        node.validate()?;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        Ok(id)
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// Insertion order is paint order and, under a flex parent, main-axis
    /// order.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let child_node = self.get(child).ok_or(LayoutError::UnknownNode { node: child })?;
        if self.get(parent).is_none() {
            return Err(LayoutError::UnknownNode { node: parent });
        }
        if child_node.parent.is_some() {
            return Err(LayoutError::AlreadyAttached { node: child });
        }
        if child == parent || self.ancestors(parent).any(|a| a == child) {
            return Err(LayoutError::CycleDetected { node: child });
        }

        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    /// Insert `node` and attach it under `parent` in one step.
    pub fn add_child(&mut self, parent: NodeId, node: LayoutNode) -> Result<NodeId, LayoutError> {
        if self.get(parent).is_none() {
            return Err(LayoutError::UnknownNode { node: parent });
        }
        let id = self.insert(node)?;
        self.append_child(parent, id)?;
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut LayoutNode> {
        self.nodes.get_mut(id.index())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes without a parent, in insertion order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids().filter(|&id| self[id].parent.is_none())
    }

    /// Every node id in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.nodes.len() as u32).map(NodeId)
    }

    /// Walk parent links upward, starting at the parent of `id`.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(id),
        }
    }

    /// Depth-first pre-order walk of `root` and its subtree.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![root],
        }
    }

    /// The slot a flex parent assigned to `child` on its last distribution.
    ///
    /// `None` if the parent is not a flex container or has not distributed.
    pub fn slot(&self, child: NodeId) -> Option<Rect> {
        let parent = self.parent(child)?;
        match &self[parent].kind {
            NodeKind::Flex(flex) => flex.slot(child),
            _ => None,
        }
    }
}

/// Panics if `id` was minted by a different tree.
impl Index<NodeId> for LayoutTree {
    type Output = LayoutNode;

    fn index(&self, id: NodeId) -> &LayoutNode {
        &self.nodes[id.index()]
    }
}

pub struct Ancestors<'a> {
    tree: &'a LayoutTree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

pub struct Descendants<'a> {
    tree: &'a LayoutTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(current).iter().rev().copied());
        Some(current)
    }
}
