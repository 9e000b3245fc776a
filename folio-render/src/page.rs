//! Page geometry.

use folio_layout::{Rect, Size};
use serde::{Deserialize, Serialize};

/// Default page margin in points (one inch).
pub const DEFAULT_MARGIN: f32 = 72.0;

/// Margins around the drawable area of a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Margins {
    /// Create margins with explicit values for each side.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform margins on all sides.
    pub fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::all(DEFAULT_MARGIN)
    }
}

/// Size and margins of one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    pub size: Size,
    pub margins: Margins,
}

impl PageSetup {
    /// ISO A4 in points.
    pub const A4: Size = Size::new(595.28, 841.89);
    /// US Letter in points.
    pub const LETTER: Size = Size::new(612.0, 792.0);

    pub fn new(size: Size) -> Self {
        Self {
            size,
            margins: Margins::default(),
        }
    }

    pub fn a4() -> Self {
        Self::new(Self::A4)
    }

    pub fn letter() -> Self {
        Self::new(Self::LETTER)
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// The margin-adjusted drawable rectangle.
    pub fn content_rect(&self) -> Rect {
        Rect::new(
            self.margins.left,
            self.margins.top,
            self.size.width - self.margins.left - self.margins.right,
            self.size.height - self.margins.top - self.margins.bottom,
        )
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_content_rect_uses_inch_margins() {
        let rect = PageSetup::a4().content_rect();
        assert_eq!((rect.x, rect.y), (72.0, 72.0));
        assert!((rect.width - 451.28).abs() < 0.01);
        assert!((rect.height - 697.89).abs() < 0.01);
    }

    #[test]
    fn custom_margins() {
        let rect = PageSetup::letter()
            .margins(Margins::new(10.0, 20.0, 30.0, 40.0))
            .content_rect();
        assert_eq!(rect, Rect::new(40.0, 10.0, 552.0, 752.0));
    }
}
