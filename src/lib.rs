//! xlmarkup - lays out spreadsheet grids as styled HTML tables
//!
//! Turns a rectangular region of a sheet into table markup plus a stylesheet
//! ready for screenshotting:
//! - Content-driven column widths with a per-script text width estimate
//! - Merged cells as row/column spans
//! - Fonts, fills, borders, alignment and rotation as per-cell CSS
//! - Rendering never fails; faults degrade to a plain table
//!
//! # Usage
//!
//! ```
//! use xlmarkup::{render, CellValue, Grid};
//!
//! let grid = Grid::builder("Sheet1")
//!     .value("A1", CellValue::Text("Revenue".into()))?
//!     .value("B1", CellValue::Number(0.25))?
//!     .build()?;
//!
//! let (markup, stylesheet) = render(&grid).into_parts();
//! assert!(markup.contains("Revenue"));
//! assert!(stylesheet.contains(".excel-table"));
//! # Ok::<(), xlmarkup::XlmarkupError>(())
//! ```

pub mod cell_ref;
pub mod color;
pub mod config;
pub mod error;
pub mod numfmt;
pub mod persist;
pub mod raster;
pub mod source;
pub mod types;

pub mod layout;
pub mod render;

pub use config::{RenderConfig, TextWidthConfig};
pub use error::{Result, XlmarkupError};
pub use raster::{RasterRequest, Rasterizer};
pub use render::{render, render_with, RenderedSheet};
pub use source::{GridSource, SheetSelector, SheetSnapshot, WorkbookSnapshot};

pub use types::*;

/// Load a sheet region from a source and render it.
///
/// # Errors
/// Only the source's precondition errors; rendering itself cannot fail.
pub fn render_sheet(
    source: &impl GridSource,
    selector: &SheetSelector,
    range: Option<&str>,
    config: &RenderConfig,
) -> Result<RenderedSheet> {
    let grid = source.load(selector, range)?;
    Ok(render_with(&grid, config))
}
