//! Structured error types for xlmarkup.
//!
//! Only grid construction and the grid source surface errors to callers.
//! Rendering itself never fails; geometry errors raised inside the layout
//! pipeline are caught by the emitter and turned into the fallback table.

/// All errors that can occur while building a grid or rendering it.
#[derive(Debug, thiserror::Error)]
pub enum XlmarkupError {
    /// Invalid cell reference or range descriptor.
    #[error("Invalid cell reference: {0}")]
    CellRef(String),

    /// Requested sheet does not exist in the source.
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// Requested range cannot be resolved against the sheet.
    #[error("Range not found: {0}")]
    RangeNotFound(String),

    /// The grid has no rows to lay out.
    #[error("Grid is empty")]
    EmptyGrid,

    /// Grid bounds are inconsistent (zero index, start after end, cell outside).
    #[error("Invalid grid bounds: {0}")]
    InvalidBounds(String),

    /// Render-space geometry fault inside the layout pipeline.
    #[error("Layout error: {0}")]
    Layout(String),

    /// Failure reported by an external rasterizer.
    #[error("Rasterizer error: {0}")]
    Raster(String),

    /// Snapshot (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, XlmarkupError>;

impl XlmarkupError {
    /// True for errors that describe bad input handed to the engine, as
    /// opposed to faults raised while laying the grid out.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::SheetNotFound(_) | Self::RangeNotFound(_) | Self::EmptyGrid | Self::InvalidBounds(_)
        )
    }
}
