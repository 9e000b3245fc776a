//! Geometry resolution: declared node geometry to an absolute rectangle.
//!
//! Three paths, chosen by the node's parent and then its mode:
//!
//! - any child of a flex container: the cached slot, inset by margin
//! - absolute: literal pixels, inset by margin, parent ignored
//! - proportional otherwise: fractions of the parent's resolved rect,
//!   offset and shrunk by the parent's padding
//!
//! Only the first two paths apply the node's margin.

use crate::error::LayoutError;
use crate::node::{Geometry, MeasurementMode, NodeKind};
use crate::primitives::Rect;
use crate::tree::{LayoutTree, NodeId};

/// A resolved rectangle plus the padding its proportional children inset by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedBox {
    pub rect: Rect,
    pub padding: f32,
}

impl ResolvedBox {
    /// Place fractional `geometry` inside this box.
    fn place(&self, geometry: &Geometry) -> Rect {
        let base = self.rect;
        let position = geometry.position();
        let size = geometry.size();
        Rect {
            x: base.x + base.width * position.x + self.padding,
            y: base.y + base.height * position.y + self.padding,
            width: base.width * size.width - 2.0 * self.padding,
            height: base.height * size.height - 2.0 * self.padding,
        }
    }
}

/// Resolve the absolute rectangle of `id`.
///
/// `page` anchors a proportional node that has no parent. Children of flex
/// containers need their parent's distribution pass to have run first.
pub fn resolve(tree: &LayoutTree, id: NodeId, page: Option<Rect>) -> Result<Rect, LayoutError> {
    resolve_box(tree, id, page).map(|resolved| resolved.rect)
}

/// Like [`resolve`], also carrying the node's own padding.
pub fn resolve_box(tree: &LayoutTree, id: NodeId, page: Option<Rect>) -> Result<ResolvedBox, LayoutError> {
    let node = &tree[id];
    let geometry = node.geometry();

    let flex_parent = node.parent.and_then(|parent| match &tree[parent].kind {
        NodeKind::Flex(flex) => Some((parent, flex)),
        _ => None,
    });

    let rect = match (flex_parent, geometry.mode()) {
        (Some((parent, flex)), _) => flex
            .slot(id)
            .ok_or(LayoutError::LayoutNotComputed {
                node: id,
                container: parent,
            })?
            .inset(node.margin),
        (None, MeasurementMode::Absolute) => {
            Rect::from_origin_size(geometry.position(), geometry.size()).inset(node.margin)
        }
        (None, MeasurementMode::Proportional) => match node.parent {
            None => {
                let page = page.ok_or(LayoutError::MissingAnchor { node: id })?;
                ResolvedBox { rect: page, padding: 0.0 }.place(geometry)
            }
            Some(parent) => resolve_box(tree, parent, page)?.place(geometry),
        },
    };

    tracing::trace!(node = %id, ?rect, "resolved");
    Ok(ResolvedBox {
        rect,
        padding: node.padding,
    })
}
