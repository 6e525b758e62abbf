//! The immutable grid snapshot every layout component reads from.
//!
//! Two coordinate spaces exist side by side:
//! - absolute: 1-based sheet coordinates ([`CellAddress`]), used by cells,
//!   merges, row heights and column widths
//! - render-space: 0-based offsets from the grid's top-left corner
//!   ([`RenderCoord`]), used for emitted geometry and class names
//!
//! [`GridBounds::to_render`] is the only conversion between the two.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Cell, CellValue};
use crate::cell_ref::{CellAddress, CellRange, MAX_COL, MAX_ROW};
use crate::error::{Result, XlmarkupError};

/// Inclusive rectangle (absolute coordinates) a grid covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridBounds {
    pub start_row: u32,
    pub start_col: u32,
    pub end_row: u32,
    pub end_col: u32,
}

impl GridBounds {
    pub const fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Self {
            start_row,
            start_col,
            end_row,
            end_col,
        }
    }

    pub fn from_range(range: CellRange) -> Self {
        Self::new(range.start.row, range.start.col, range.end.row, range.end.col)
    }

    /// Check the bounds are 1-based, not inverted and inside the sheet limits.
    ///
    /// # Errors
    /// Returns [`XlmarkupError::InvalidBounds`] otherwise.
    pub fn check(&self) -> Result<()> {
        if self.start_row == 0 || self.start_col == 0 {
            return Err(XlmarkupError::InvalidBounds(format!(
                "{self}: indices are 1-based"
            )));
        }
        if self.start_row > self.end_row || self.start_col > self.end_col {
            return Err(XlmarkupError::InvalidBounds(format!(
                "{self}: start after end"
            )));
        }
        if self.end_row > MAX_ROW || self.end_col > MAX_COL {
            return Err(XlmarkupError::InvalidBounds(format!(
                "{self}: beyond sheet limits"
            )));
        }
        Ok(())
    }

    pub fn contains(&self, addr: CellAddress) -> bool {
        (self.start_row..=self.end_row).contains(&addr.row)
            && (self.start_col..=self.end_col).contains(&addr.col)
    }

    /// Absolute column indices covered, in ascending order.
    pub fn columns(&self) -> std::ops::RangeInclusive<u32> {
        self.start_col..=self.end_col
    }

    /// Absolute row indices covered, in ascending order.
    pub fn rows(&self) -> std::ops::RangeInclusive<u32> {
        self.start_row..=self.end_row
    }

    /// Convert an absolute address to render-space. `None` when the address
    /// lies outside the bounds.
    pub fn to_render(&self, addr: CellAddress) -> Option<RenderCoord> {
        if !self.contains(addr) {
            return None;
        }
        Some(RenderCoord {
            row: addr.row.checked_sub(self.start_row)?,
            col: addr.col.checked_sub(self.start_col)?,
        })
    }
}

impl fmt::Display for GridBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            CellAddress::new(self.start_row, self.start_col),
            CellAddress::new(self.end_row, self.end_col)
        )
    }
}

/// A 0-based position relative to the grid's top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RenderCoord {
    pub row: u32,
    pub col: u32,
}

impl RenderCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A merged region, kept as the range descriptor the grid source supplied
/// (e.g. `"B2:D3"`).
///
/// The numeric bounds are parsed on demand so a malformed descriptor only
/// affects this merge, never the grid that carries it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergeRange {
    reference: String,
}

impl MergeRange {
    pub fn new(start: CellAddress, end: CellAddress) -> Self {
        Self {
            reference: format!("{start}:{end}"),
        }
    }

    pub fn from_reference(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Parsed inclusive bounds.
    ///
    /// # Errors
    /// Returns [`XlmarkupError::CellRef`] when the descriptor is malformed or
    /// inverted.
    pub fn bounds(&self) -> Result<CellRange> {
        CellRange::parse(&self.reference)
    }

    pub fn start_address(&self) -> Option<String> {
        self.bounds().ok().map(|r| r.start.to_string())
    }

    pub fn end_address(&self) -> Option<String> {
        self.bounds().ok().map(|r| r.end.to_string())
    }
}

/// A rectangular region of one sheet.
///
/// Built through [`GridBuilder`] (validated, dense, row-major). A grid that
/// comes straight from `serde` is an unchecked snapshot; call
/// [`Grid::validate`] before relying on its invariants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    sheet_name: String,
    bounds: GridBounds,
    rows: Vec<Vec<Cell>>,
    #[serde(default)]
    merges: Vec<MergeRange>,
    /// Absolute row -> height in px
    #[serde(default)]
    row_heights: BTreeMap<u32, f64>,
    /// Absolute column -> width in Excel character units
    #[serde(default)]
    column_widths: BTreeMap<u32, f64>,
}

impl Grid {
    pub fn builder(sheet_name: impl Into<String>) -> GridBuilder {
        GridBuilder::new(sheet_name)
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn merges(&self) -> &[MergeRange] {
        &self.merges
    }

    pub fn row_height(&self, row: u32) -> Option<f64> {
        self.row_heights.get(&row).copied()
    }

    pub fn column_width(&self, col: u32) -> Option<f64> {
        self.column_widths.get(&col).copied()
    }

    pub fn row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    pub fn column_widths(&self) -> &BTreeMap<u32, f64> {
        &self.column_widths
    }

    /// Look up the cell at an absolute address.
    pub fn cell(&self, addr: CellAddress) -> Option<&Cell> {
        // Dense grids from the builder index directly.
        let direct = addr
            .row
            .checked_sub(self.bounds.start_row)
            .and_then(|r| self.rows.get(r as usize))
            .zip(addr.col.checked_sub(self.bounds.start_col))
            .and_then(|(row, c)| row.get(c as usize))
            .filter(|cell| cell.address() == addr);

        direct.or_else(|| self.cells().find(|cell| cell.address() == addr))
    }

    /// First merge whose range contains `addr`. Malformed descriptors never
    /// match.
    pub fn merge_at(&self, addr: CellAddress) -> Option<&MergeRange> {
        self.merges
            .iter()
            .find(|merge| merge.bounds().is_ok_and(|range| range.contains(addr)))
    }

    /// Check the invariants a builder-made grid guarantees: one row per
    /// bounded row, each holding every bounded column left to right.
    ///
    /// # Errors
    /// [`XlmarkupError::InvalidBounds`] for bad bounds, a cell outside them or
    /// a sparse row, [`XlmarkupError::EmptyGrid`] when there are no rows.
    pub fn validate(&self) -> Result<()> {
        self.bounds.check()?;
        if self.rows.iter().all(Vec::is_empty) {
            return Err(XlmarkupError::EmptyGrid);
        }
        if let Some(cell) = self.cells().find(|c| !self.bounds.contains(c.address())) {
            return Err(XlmarkupError::InvalidBounds(format!(
                "cell {} outside {}",
                cell.address(),
                self.bounds
            )));
        }

        let bounds = self.bounds;
        if self.rows.len() != bounds.rows().count() {
            return Err(XlmarkupError::InvalidBounds(format!(
                "{} rows for {bounds}",
                self.rows.len()
            )));
        }
        for (row, cells) in bounds.rows().zip(&self.rows) {
            let dense = cells.len() == bounds.columns().count()
                && cells
                    .iter()
                    .zip(bounds.columns())
                    .all(|(cell, col)| cell.row == row && cell.col == col);
            if !dense {
                return Err(XlmarkupError::InvalidBounds(format!(
                    "row {row} does not cover {bounds}"
                )));
            }
        }
        Ok(())
    }
}

/// Collects cells and sheet metadata, then produces a validated [`Grid`].
#[derive(Debug, Default)]
pub struct GridBuilder {
    sheet_name: String,
    bounds: Option<GridBounds>,
    cells: Vec<Cell>,
    merges: Vec<MergeRange>,
    row_heights: BTreeMap<u32, f64>,
    column_widths: BTreeMap<u32, f64>,
}

impl GridBuilder {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            ..Self::default()
        }
    }

    /// Fix the covered rectangle. Without this the bounds are the smallest
    /// rectangle holding every added cell.
    #[must_use]
    pub fn bounds(mut self, bounds: GridBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    #[must_use]
    pub fn cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    /// Convenience for `cell(Cell::new(..))` with an `"A1"`-style address.
    ///
    /// # Errors
    /// Returns [`XlmarkupError::CellRef`] when the address does not parse.
    pub fn value(self, address: &str, value: CellValue) -> Result<Self> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell(Cell::new(addr.row, addr.col, value)))
    }

    #[must_use]
    pub fn cells(mut self, cells: impl IntoIterator<Item = Cell>) -> Self {
        self.cells.extend(cells);
        self
    }

    #[must_use]
    pub fn merge(mut self, merge: MergeRange) -> Self {
        self.merges.push(merge);
        self
    }

    #[must_use]
    pub fn merge_ref(self, reference: &str) -> Self {
        self.merge(MergeRange::from_reference(reference))
    }

    #[must_use]
    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.row_heights.insert(row, height);
        self
    }

    #[must_use]
    pub fn column_width(mut self, col: u32, width: f64) -> Self {
        self.column_widths.insert(col, width);
        self
    }

    /// Validate and assemble the grid.
    ///
    /// Cells may arrive in any order; later duplicates replace earlier ones.
    /// Positions without a cell are filled with empty cells so every row has
    /// the full column range.
    ///
    /// # Errors
    /// [`XlmarkupError::EmptyGrid`] when there are neither bounds nor cells,
    /// [`XlmarkupError::InvalidBounds`] for bad bounds or a cell outside them.
    pub fn build(self) -> Result<Grid> {
        let bounds = match self.bounds {
            Some(bounds) => bounds,
            None => enclosing_bounds(&self.cells).ok_or(XlmarkupError::EmptyGrid)?,
        };
        bounds.check()?;

        let mut by_position: BTreeMap<(u32, u32), Cell> = BTreeMap::new();
        for cell in self.cells {
            if !bounds.contains(cell.address()) {
                return Err(XlmarkupError::InvalidBounds(format!(
                    "cell {} outside {bounds}",
                    cell.address()
                )));
            }
            by_position.insert((cell.row, cell.col), cell);
        }

        let rows = bounds
            .rows()
            .map(|row| {
                bounds
                    .columns()
                    .map(|col| {
                        by_position
                            .remove(&(row, col))
                            .unwrap_or_else(|| Cell::empty(row, col))
                    })
                    .collect()
            })
            .collect();

        Ok(Grid {
            sheet_name: self.sheet_name,
            bounds,
            rows,
            merges: self.merges,
            row_heights: self.row_heights,
            column_widths: self.column_widths,
        })
    }
}

fn enclosing_bounds(cells: &[Cell]) -> Option<GridBounds> {
    let first = cells.first()?;
    let init = GridBounds::new(first.row, first.col, first.row, first.col);
    Some(cells.iter().fold(init, |b, c| {
        GridBounds::new(
            b.start_row.min(c.row),
            b.start_col.min(c.col),
            b.end_row.max(c.row),
            b.end_col.max(c.col),
        )
    }))
}
