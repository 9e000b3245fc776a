//! Layout nodes: declared geometry, insets and per-variant content.
//!
//! A node is built fully configured and then handed to a
//! [`LayoutTree`](crate::tree::LayoutTree). Validation of units and
//! fraction ranges happens here, at construction, so resolution never has
//! to reject a malformed node.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::flex::{FlexContainer, FlexStyle};
use crate::primitives::{Color, Point, Size};
use crate::tree::NodeId;

// =========================================================================
// Measurement
// =========================================================================

/// How a node's position and size are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementMode {
    /// Position and size are page pixels.
    #[default]
    Absolute,
    /// Position and size are fractions of the parent's content rect, or of
    /// the slot a flex parent assigned.
    Proportional,
}

/// A length as written at the configuration boundary.
///
/// `Number` takes the meaning of the node's mode: pixels when absolute, a
/// fraction when proportional.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "LengthRepr")]
pub enum Length {
    Number(f32),
    Px(f32),
    Percent(f32),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LengthRepr {
    Number(f32),
    Text(String),
}

impl TryFrom<LengthRepr> for Length {
    type Error = LayoutError;

    fn try_from(repr: LengthRepr) -> Result<Self, LayoutError> {
        match repr {
            LengthRepr::Number(n) => Ok(Length::Number(n)),
            LengthRepr::Text(s) => s.parse(),
        }
    }
}

impl FromStr for Length {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, LayoutError> {
        let s = s.trim();
        let number = |digits: &str| {
            digits
                .trim()
                .parse::<f32>()
                .map_err(|_| LayoutError::Configuration(format!("invalid length: {s:?}")))
        };

        if let Some(digits) = s.strip_suffix('%') {
            Ok(Length::Percent(number(digits)?))
        } else if let Some(digits) = s.strip_suffix("px") {
            Ok(Length::Px(number(digits)?))
        } else {
            number(s).map(Length::Number)
        }
    }
}

impl Length {
    /// Convert to the number the resolver works with under `mode`.
    fn value_for(self, mode: MeasurementMode) -> Result<f32, LayoutError> {
        match (mode, self) {
            (_, Length::Number(n)) => Ok(n),
            (MeasurementMode::Absolute, Length::Px(px)) => Ok(px),
            (MeasurementMode::Proportional, Length::Percent(pct)) => Ok(pct / 100.0),
            (MeasurementMode::Absolute, Length::Percent(pct)) => Err(LayoutError::Configuration(
                format!("percentage {pct}% on an absolute node"),
            )),
            (MeasurementMode::Proportional, Length::Px(px)) => Err(LayoutError::Configuration(
                format!("pixel length {px}px on a proportional node, expected a percentage"),
            )),
        }
    }
}

/// Declared position and size together with the mode that interprets them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    mode: MeasurementMode,
    position: Point,
    size: Size,
}

impl Geometry {
    /// Pixel geometry. Any values are accepted.
    pub fn absolute(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            mode: MeasurementMode::Absolute,
            position: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Fractional geometry. Width and height must lie in `[0, 1]`.
    pub fn proportional(x: f32, y: f32, width: f32, height: f32) -> Result<Self, LayoutError> {
        for (axis, fraction) in [("width", width), ("height", height)] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(LayoutError::Configuration(format!(
                    "proportional {axis} must be a fraction in [0, 1], got {fraction}"
                )));
            }
        }
        Ok(Self {
            mode: MeasurementMode::Proportional,
            position: Point::new(x, y),
            size: Size::new(width, height),
        })
    }

    /// Build from configuration lengths, checking units against `mode`.
    pub fn parse(
        mode: MeasurementMode,
        position: [Length; 2],
        size: [Length; 2],
    ) -> Result<Self, LayoutError> {
        let [x, y] = position;
        let [width, height] = size;
        let (x, y) = (x.value_for(mode)?, y.value_for(mode)?);
        let (width, height) = (width.value_for(mode)?, height.value_for(mode)?);
        match mode {
            MeasurementMode::Absolute => Ok(Self::absolute(x, y, width, height)),
            MeasurementMode::Proportional => Self::proportional(x, y, width, height),
        }
    }

    pub fn mode(&self) -> MeasurementMode {
        self.mode
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }
}

/// What a flex distributor needs to know about an item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequestedSize {
    pub mode: MeasurementMode,
    pub width: f32,
    pub height: f32,
}

/// Capability of reporting a requested size to a flex container.
pub trait Measurable {
    /// `None` for items that have no measurable size; they take no space.
    fn requested_size(&self) -> Option<RequestedSize>;
}

// =========================================================================
// Variant content
// =========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to fit inside the frame, preserving aspect ratio.
    #[default]
    Contain,
    /// Scale to cover the frame, preserving aspect ratio.
    Cover,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

/// Image payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageContent {
    /// Path or URL handed to the renderer.
    pub source: String,
    pub fit: ImageFit,
    pub h_align: Option<HAlign>,
    pub v_align: Option<VAlign>,
}

impl ImageContent {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            fit: ImageFit::default(),
            h_align: None,
            v_align: None,
        }
    }

    pub fn fit(mut self, fit: ImageFit) -> Self {
        self.fit = fit;
        self
    }

    pub fn align(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = Some(h_align);
        self.v_align = Some(v_align);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Middle,
    Bottom,
}

pub const DEFAULT_FONT_SIZE: f32 = 12.0;

/// Text payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextContent {
    pub content: String,
    pub font_size: f32,
    pub color: Color,
    pub align: TextAlign,
    pub vertical_align: VerticalAlign,
}

impl TextContent {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            font_size: DEFAULT_FONT_SIZE,
            color: Color::BLACK,
            align: TextAlign::default(),
            vertical_align: VerticalAlign::default(),
        }
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn vertical_align(mut self, vertical_align: VerticalAlign) -> Self {
        self.vertical_align = vertical_align;
        self
    }
}

/// Per-variant behavior of a node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Container,
    Image(ImageContent),
    Text(TextContent),
    Flex(FlexContainer),
}

/// Visual border. A zero width is never drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            width: 0.0,
            color: Color::BLACK,
        }
    }
}

// =========================================================================
// LayoutNode
// =========================================================================

/// One element of the layout tree.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub(crate) geometry: Geometry,
    pub(crate) padding: f32,
    pub(crate) margin: f32,
    pub(crate) border: Border,
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl LayoutNode {
    fn with_kind(geometry: Geometry, kind: NodeKind) -> Self {
        Self {
            geometry,
            padding: 0.0,
            margin: 0.0,
            border: Border::default(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn container(geometry: Geometry) -> Self {
        Self::with_kind(geometry, NodeKind::Container)
    }

    pub fn image(geometry: Geometry, image: ImageContent) -> Self {
        Self::with_kind(geometry, NodeKind::Image(image))
    }

    pub fn text(geometry: Geometry, text: TextContent) -> Self {
        Self::with_kind(geometry, NodeKind::Text(text))
    }

    pub fn flex(geometry: Geometry, style: FlexStyle) -> Self {
        Self::with_kind(geometry, NodeKind::Flex(FlexContainer::new(style)))
    }

    /// Set padding (uniform on all sides).
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set margin (uniform on all sides).
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set border (width + color).
    pub fn border(mut self, width: f32, color: Color) -> Self {
        self.border = Border { width, color };
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn padding_px(&self) -> f32 {
        self.padding
    }

    pub fn margin_px(&self) -> f32 {
        self.margin
    }

    pub fn border_style(&self) -> Border {
        self.border
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn as_flex(&self) -> Option<&FlexContainer> {
        match &self.kind {
            NodeKind::Flex(flex) => Some(flex),
            _ => None,
        }
    }

    pub fn is_flex(&self) -> bool {
        self.as_flex().is_some()
    }

    /// Reject negative or non-finite insets.
    pub(crate) fn validate(&self) -> Result<(), LayoutError> {
        let gap = self.as_flex().map_or(0.0, |flex| flex.style().gap);
        for (name, value) in [
            ("padding", self.padding),
            ("margin", self.margin),
            ("border width", self.border.width),
            ("gap", gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::Configuration(format!(
                    "{name} must be a non-negative number of pixels, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Measurable for LayoutNode {
    fn requested_size(&self) -> Option<RequestedSize> {
        let size = self.geometry.size;
        let requested = RequestedSize {
            mode: self.geometry.mode,
            width: size.width,
            height: size.height,
        };
        match self.kind {
            NodeKind::Container | NodeKind::Image(_) | NodeKind::Text(_) | NodeKind::Flex(_) => {
                Some(requested)
            }
        }
    }
}
