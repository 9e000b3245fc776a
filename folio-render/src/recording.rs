//! A renderer that records draw calls into a display list.
//!
//! Used for headless output and tests. Text is measured with a monospace
//! estimate rather than real font shaping.

use std::collections::HashMap;

use folio_layout::{Color, ImageContent, ImageFit, Point, Rect, Size, TextAlign};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::image::place_image;
use crate::page::PageSetup;
use crate::renderer::{Renderer, TextStyle};

/// Advance of one display cell, as a fraction of the font size.
pub const CHAR_WIDTH_EM: f32 = 0.6;
/// Line height as a fraction of the font size.
pub const LINE_HEIGHT_EM: f32 = 1.2;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Image {
        source: String,
        fit: ImageFit,
        /// Resolved node rectangle.
        frame: Rect,
        /// Where the pixels land after fitting.
        placed: Rect,
    },
    Border {
        rect: Rect,
        width: f32,
        color: Color,
    },
    Text {
        content: String,
        origin: Point,
        font_size: f32,
        color: Color,
        align: TextAlign,
        width: f32,
    },
}

/// Records every draw call in paint order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    page: PageSetup,
    image_sizes: HashMap<String, Size>,
    commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new(page: PageSetup) -> Self {
        Self {
            page,
            image_sizes: HashMap::new(),
            commands: Vec::new(),
        }
    }

    /// Register the intrinsic pixel size of an image source.
    pub fn with_image_size(mut self, source: impl Into<String>, size: Size) -> Self {
        self.image_sizes.insert(source.into(), size);
        self
    }

    pub fn set_image_size(&mut self, source: impl Into<String>, size: Size) {
        self.image_sizes.insert(source.into(), size);
    }

    pub fn page(&self) -> &PageSetup {
        &self.page
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl Renderer for RecordingRenderer {
    fn page_content_rect(&self) -> Rect {
        self.page.content_rect()
    }

    fn measure_text_block_height(&self, text: &str, width: f32, style: &TextStyle) -> f32 {
        estimate_text_block_height(text, width, style.font_size)
    }

    fn draw_image(&mut self, image: &ImageContent, frame: Rect) {
        // Unknown images are assumed to match their frame.
        let intrinsic = self
            .image_sizes
            .get(&image.source)
            .copied()
            .unwrap_or_else(|| frame.size());
        let placed = place_image(frame, intrinsic, image.fit, image.h_align, image.v_align);
        self.commands.push(DrawCommand::Image {
            source: image.source.clone(),
            fit: image.fit,
            frame,
            placed,
        });
    }

    fn draw_border(&mut self, rect: Rect, width: f32, color: Color) {
        self.commands.push(DrawCommand::Border { rect, width, color });
    }

    fn draw_text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            origin,
            font_size: style.font_size,
            color: style.color,
            align: style.align,
            width: style.width,
        });
    }
}

/// Number of lines `text` wraps to when each line holds `max_cells`
/// display cells. Words are never split; `\n` starts a new paragraph.
pub fn wrapped_line_count(text: &str, max_cells: f32) -> usize {
    if text.is_empty() {
        return 0;
    }

    text.split('\n')
        .map(|paragraph| {
            let mut lines = 1;
            let mut current: Option<f32> = None;
            for word in paragraph.split_whitespace() {
                let width = word.width() as f32;
                current = match current {
                    None => Some(width),
                    Some(used) if used + 1.0 + width <= max_cells => Some(used + 1.0 + width),
                    Some(_) => {
                        lines += 1;
                        Some(width)
                    }
                };
            }
            lines
        })
        .sum()
}

/// Monospace estimate of a wrapped text block's height.
pub fn estimate_text_block_height(text: &str, width: f32, font_size: f32) -> f32 {
    let cell = CHAR_WIDTH_EM * font_size;
    let max_cells = if cell > 0.0 { (width / cell).floor() } else { 0.0 };
    wrapped_line_count(text, max_cells) as f32 * LINE_HEIGHT_EM * font_size
}
