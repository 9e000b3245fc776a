//! Paint traversal.
//!
//! Per node, in this order:
//! 1. image content (image nodes)
//! 2. children, in insertion order
//! 3. border (when its width is positive)
//! 4. text (text nodes)
//!
//! Text therefore sits above its own border and every descendant, and image
//! content below everything else in the same node.

use folio_layout::{
    LayoutTree, NodeId, NodeKind, Point, Rect, TextContent, VerticalAlign, resolve,
    resolve_and_distribute,
};

use crate::error::RenderError;
use crate::renderer::{Renderer, TextStyle};

/// Lay out the tree under `root` against the renderer's page and paint it.
pub fn paint<R: Renderer + ?Sized>(
    tree: &mut LayoutTree,
    root: NodeId,
    renderer: &mut R,
) -> Result<(), RenderError> {
    let page = renderer.page_content_rect();
    resolve_and_distribute(tree, root, page)?;
    paint_node(tree, root, page, renderer)
}

fn paint_node<R: Renderer + ?Sized>(
    tree: &LayoutTree,
    id: NodeId,
    page: Rect,
    renderer: &mut R,
) -> Result<(), RenderError> {
    let node = &tree[id];
    let rect = resolve(tree, id, Some(page))?;

    match node.kind() {
        NodeKind::Image(image) => renderer.draw_image(image, rect),
        NodeKind::Container | NodeKind::Text(_) | NodeKind::Flex(_) => {}
    }

    for &child in node.children() {
        paint_node(tree, child, page, renderer)?;
    }

    let border = node.border_style();
    if border.width > 0.0 {
        renderer.draw_border(rect, border.width, border.color);
    }

    match node.kind() {
        NodeKind::Text(text) => paint_text(text, rect, node.padding_px(), renderer),
        NodeKind::Container | NodeKind::Image(_) | NodeKind::Flex(_) => {}
    }

    Ok(())
}

fn paint_text<R: Renderer + ?Sized>(text: &TextContent, rect: Rect, padding: f32, renderer: &mut R) {
    let style = TextStyle {
        font_size: text.font_size,
        color: text.color,
        align: text.align,
        width: rect.width - 2.0 * padding,
    };
    let block_height = renderer.measure_text_block_height(&text.content, style.width, &style);
    let origin = anchor_text(rect, padding, text.vertical_align, block_height);
    tracing::trace!(?origin, block_height, "anchored text");
    renderer.draw_text(&text.content, origin, &style);
}

/// Top-left draw origin for a wrapped text block of `block_height`.
///
/// The vertical anchor is the top inset edge, the middle of the rect, or
/// the bottom inset edge; the block is then shifted up by none, half, or
/// all of its height so the renderer can draw from the top-left corner.
pub fn anchor_text(rect: Rect, padding: f32, vertical_align: VerticalAlign, block_height: f32) -> Point {
    let x = rect.x + padding;
    let y = match vertical_align {
        VerticalAlign::Top => rect.y + padding,
        VerticalAlign::Middle => rect.y + rect.height / 2.0 - block_height / 2.0,
        VerticalAlign::Bottom => rect.y + rect.height - padding - block_height,
    };
    Point::new(x, y)
}
