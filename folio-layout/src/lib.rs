//! folio-layout: box geometry for paginated documents.
//!
//! Lays out a tree of nested rectangular nodes in two sizing modes:
//! - Absolute: position and size are page pixels
//! - Proportional: position and size are fractions of the parent's
//!   content rect, or of the slot a flex parent assigned
//!
//! Flex containers arrange their children along a row or column with
//! CSS-style `justify-content`, `align-items` and `gap`.
//!
//! # Usage
//!
//! ```ignore
//! use folio_layout::{compute_layout, FlexStyle, Geometry, LayoutNode, LayoutTree, Rect};
//!
//! let mut tree = LayoutTree::new();
//! let row = tree.insert(LayoutNode::flex(
//!     Geometry::absolute(0.0, 0.0, 400.0, 100.0),
//!     FlexStyle::row().gap(20.0),
//! ))?;
//! tree.add_child(row, LayoutNode::container(Geometry::absolute(0.0, 0.0, 100.0, 50.0)))?;
//! let rects = compute_layout(&mut tree, row, Rect::new(72.0, 72.0, 451.28, 697.89))?;
//! ```

pub mod config;
pub mod flex;
pub mod node;
pub mod pass;
pub mod primitives;
pub mod resolve;
pub mod tree;

mod error;

pub use config::{KindConfig, NodeConfig};
pub use error::LayoutError;
pub use flex::{
    AlignItems, FlexCache, FlexContainer, FlexDirection, FlexStyle, JustifyContent, distribute,
};
pub use node::{
    Border, Geometry, HAlign, ImageContent, ImageFit, LayoutNode, Length, Measurable,
    MeasurementMode, NodeKind, RequestedSize, TextAlign, TextContent, VAlign, VerticalAlign,
};
pub use pass::{LayoutMap, compute_layout, resolve_and_distribute};
pub use primitives::{Color, Point, Rect, Size};
pub use resolve::{ResolvedBox, resolve, resolve_box};
pub use tree::{LayoutTree, NodeId};
