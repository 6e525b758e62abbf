//! Grid sources: where the layout engine gets its [`Grid`] from.
//!
//! The engine itself never reads spreadsheet files. A source hands it a
//! snapshot of one sheet region; [`WorkbookSnapshot`] is the in-crate source,
//! loaded from JSON produced by whatever reader sits upstream.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell_ref::CellRange;
use crate::error::{Result, XlmarkupError};
use crate::types::{Cell, Grid, GridBounds, MergeRange};

/// Which sheet to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelector {
    #[default]
    First,
    Name(String),
    /// 0-based position in the workbook
    Index(usize),
}

impl std::fmt::Display for SheetSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first sheet"),
            Self::Name(name) => write!(f, "'{name}'"),
            Self::Index(index) => write!(f, "sheet #{index}"),
        }
    }
}

/// Supplies grid snapshots for sheet regions.
pub trait GridSource {
    /// Sheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Load a region of one sheet. Without a range the sheet's used range
    /// is taken.
    ///
    /// # Errors
    /// [`XlmarkupError::SheetNotFound`] for an unknown sheet,
    /// [`XlmarkupError::RangeNotFound`] for a range that does not parse and
    /// [`XlmarkupError::EmptyGrid`] when there is nothing to load.
    fn load(&self, selector: &SheetSelector, range: Option<&str>) -> Result<Grid>;
}

/// Serialized contents of one sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SheetSnapshot {
    pub name: String,
    /// Present cells only, in any order
    pub cells: Vec<Cell>,
    /// Range descriptors, e.g. `"B2:D3"`
    pub merges: Vec<MergeRange>,
    pub row_heights: BTreeMap<u32, f64>,
    pub column_widths: BTreeMap<u32, f64>,
}

impl SheetSnapshot {
    /// Smallest rectangle holding every present cell.
    pub fn used_range(&self) -> Option<GridBounds> {
        let first = self.cells.first()?;
        let init = GridBounds::new(first.row, first.col, first.row, first.col);
        Some(self.cells.iter().fold(init, |b, c| {
            GridBounds::new(
                b.start_row.min(c.row),
                b.start_col.min(c.col),
                b.end_row.max(c.row),
                b.end_col.max(c.col),
            )
        }))
    }

    /// Build the grid for `range` (or the used range).
    ///
    /// Every merge of the sheet is passed through; those outside the region
    /// are discarded later, when merges are resolved.
    ///
    /// # Errors
    /// See [`GridSource::load`].
    pub fn to_grid(&self, range: Option<&str>) -> Result<Grid> {
        let bounds = match range {
            Some(descriptor) => CellRange::parse(descriptor)
                .map(GridBounds::from_range)
                .map_err(|_| XlmarkupError::RangeNotFound(descriptor.to_string()))?,
            None => self.used_range().ok_or(XlmarkupError::EmptyGrid)?,
        };

        let cells = self
            .cells
            .iter()
            .filter(|cell| bounds.contains(cell.address()))
            .cloned();

        let builder = self
            .row_heights
            .iter()
            .fold(Grid::builder(&self.name), |b, (&row, &h)| b.row_height(row, h));
        let builder = self
            .column_widths
            .iter()
            .fold(builder, |b, (&col, &w)| b.column_width(col, w));
        let builder = self
            .merges
            .iter()
            .fold(builder, |b, merge| b.merge(merge.clone()));

        builder.bounds(bounds).cells(cells).build()
    }
}

/// A whole workbook as plain data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkbookSnapshot {
    pub sheets: Vec<SheetSnapshot>,
}

impl WorkbookSnapshot {
    /// Parse a snapshot from JSON.
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// # Errors
    /// Returns [`XlmarkupError::SheetNotFound`] when nothing matches.
    pub fn sheet(&self, selector: &SheetSelector) -> Result<&SheetSnapshot> {
        let found = match selector {
            SheetSelector::First => self.sheets.first(),
            SheetSelector::Name(name) => self.sheets.iter().find(|s| &s.name == name),
            SheetSelector::Index(index) => self.sheets.get(*index),
        };
        found.ok_or_else(|| XlmarkupError::SheetNotFound(selector.to_string()))
    }
}

impl GridSource for WorkbookSnapshot {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }

    fn load(&self, selector: &SheetSelector, range: Option<&str>) -> Result<Grid> {
        let sheet = self.sheet(selector)?;
        let grid = sheet.to_grid(range)?;
        log::debug!(
            "Loaded sheet '{}' range {} ({} merges)",
            sheet.name,
            grid.bounds(),
            grid.merges().len()
        );
        Ok(grid)
    }
}
