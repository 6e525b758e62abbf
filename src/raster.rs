//! Boundary to the external rasterizer that turns a rendered document into
//! an image.
//!
//! No rasterizer ships with this crate. Implementations own their blocking
//! I/O, timeouts and retries; the engine only prepares the request.

use crate::error::Result;
use crate::render::RenderedSheet;

/// Everything a rasterizer needs to produce an image of one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterRequest {
    /// Full standalone page
    pub document: String,
    pub stylesheet: String,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels; `None` lets the rasterizer fit the content
    pub height: Option<u32>,
}

impl RasterRequest {
    /// Build a request; the width defaults to the sheet's width hint.
    pub fn new(rendered: &RenderedSheet, title: &str, width: Option<u32>, height: Option<u32>) -> Self {
        Self {
            document: rendered.to_document(title),
            stylesheet: rendered.stylesheet.clone(),
            width: width.unwrap_or(rendered.width_hint),
            height,
        }
    }
}

/// Converts a document into image bytes.
pub trait Rasterizer {
    /// # Errors
    /// Implementations report failures as
    /// [`XlmarkupError::Raster`](crate::XlmarkupError::Raster).
    fn rasterize(&self, request: &RasterRequest) -> Result<Vec<u8>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::XlmarkupError;
    use crate::render::render;
    use crate::types::{Cell, CellValue, Grid};

    struct Recording;

    impl Rasterizer for Recording {
        fn rasterize(&self, request: &RasterRequest) -> Result<Vec<u8>> {
            if request.width == 0 {
                return Err(XlmarkupError::Raster("zero width viewport".into()));
            }
            Ok(format!("{}x{:?}", request.width, request.height).into_bytes())
        }
    }

    fn rendered() -> RenderedSheet {
        let grid = Grid::builder("Sheet1")
            .cell(Cell::new(1, 1, CellValue::Text("a".into())))
            .column_width(1, 20.0)
            .build()
            .unwrap();
        render(&grid)
    }

    #[test]
    fn width_defaults_to_hint() {
        let sheet = rendered();
        let request = RasterRequest::new(&sheet, "Sheet1", None, None);
        assert_eq!(request.width, 140 + 40);
        assert!(request.document.contains(&sheet.markup));
        assert_eq!(Recording.rasterize(&request).unwrap(), b"180xNone");
    }

    #[test]
    fn explicit_dimensions_override_hint() {
        let request = RasterRequest::new(&rendered(), "Sheet1", Some(1024), Some(768));
        assert_eq!(Recording.rasterize(&request).unwrap(), b"1024xSome(768)");
    }

    #[test]
    fn failures_are_reported() {
        let request = RasterRequest::new(&rendered(), "Sheet1", Some(0), None);
        assert!(matches!(
            Recording.rasterize(&request),
            Err(XlmarkupError::Raster(_))
        ));
    }
}
