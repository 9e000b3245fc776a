//! The drawing backend seam.

use folio_layout::{Color, ImageContent, Point, Rect, TextAlign};

/// Style handed to a renderer with each text draw or measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    /// Wrapping width in pixels.
    pub width: f32,
}

/// A document canvas that paints pixels and shapes text.
///
/// The layout core never draws on its own: [`paint`](crate::paint) resolves
/// each node and calls into this trait in paint order.
pub trait Renderer {
    /// Drawable rectangle of the current page, after page margins.
    fn page_content_rect(&self) -> Rect;

    /// Height of `text` once wrapped at `width`.
    fn measure_text_block_height(&self, text: &str, width: f32, style: &TextStyle) -> f32;

    /// Paint image content inside `frame`.
    fn draw_image(&mut self, image: &ImageContent, frame: Rect);

    /// Stroke a border of `width` along `rect`.
    fn draw_border(&mut self, rect: Rect, width: f32, color: Color);

    /// Draw wrapped text with its top-left corner at `origin`.
    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle);
}
