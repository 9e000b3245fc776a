//! folio-render: the boundary between layout and a drawing backend.
//!
//! [`paint`] runs the layout pass for a tree and walks it in paint order,
//! handing resolved rectangles to a [`Renderer`]. [`RecordingRenderer`]
//! is a headless backend that captures a serializable display list.

mod error;
pub mod image;
pub mod page;
pub mod paint;
pub mod recording;
pub mod renderer;

pub use error::RenderError;
pub use image::place_image;
pub use page::{Margins, PageSetup};
pub use paint::{anchor_text, paint};
pub use recording::{DrawCommand, RecordingRenderer, estimate_text_block_height};
pub use renderer::{Renderer, TextStyle};
