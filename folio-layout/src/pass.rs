//! Whole-tree layout pass.
//!
//! A depth-first pre-order walk that distributes every flex container
//! before any of its descendants is visited, so nested flex containers and
//! proportional flex children always find their parent's cache filled.

use indexmap::IndexMap;

use crate::error::LayoutError;
use crate::flex::distribute;
use crate::primitives::Rect;
use crate::resolve::resolve;
use crate::tree::{LayoutTree, NodeId};

/// Resolved rectangle of every node in a subtree, in pre-order.
pub type LayoutMap = IndexMap<NodeId, Rect>;

/// Run the distribution pass of every flex container under `root`.
///
/// `page` is the page content rect that anchors a proportional root.
pub fn resolve_and_distribute(tree: &mut LayoutTree, root: NodeId, page: Rect) -> Result<(), LayoutError> {
    let order: Vec<NodeId> = tree.descendants(root).collect();
    let mut containers = 0usize;
    for id in order {
        if tree[id].is_flex() {
            distribute(tree, id, Some(page))?;
            containers += 1;
        }
    }
    tracing::debug!(%root, containers, "layout pass complete");
    Ok(())
}

/// Run the layout pass and resolve every node under `root`.
pub fn compute_layout(tree: &mut LayoutTree, root: NodeId, page: Rect) -> Result<LayoutMap, LayoutError> {
    resolve_and_distribute(tree, root, page)?;

    let mut map = LayoutMap::new();
    for id in tree.descendants(root) {
        let rect = resolve(tree, id, Some(page))?;
        if rect.is_degenerate() {
            tracing::warn!(node = %id, ?rect, "node resolved to a negative size");
        }
        map.insert(id, rect);
    }
    Ok(map)
}
