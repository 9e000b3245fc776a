//! Render error types.

use folio_layout::LayoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}
