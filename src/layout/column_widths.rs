//! Content-driven column widths.
//!
//! Explicit widths recorded on the grid are deliberately ignored here; the
//! emitter prefers them over this map when both exist.

use std::collections::BTreeMap;

use crate::config::TextWidthConfig;
use crate::types::Grid;

/// Estimated pixel width per absolute column index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnWidthMap {
    widths: BTreeMap<u32, u32>,
}

impl ColumnWidthMap {
    pub fn get(&self, col: u32) -> Option<u32> {
        self.widths.get(&col).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.widths.iter().map(|(&col, &width)| (col, width))
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Estimate a width for every column in the grid's column range.
///
/// Each column takes the widest estimate over its cells; columns (or cells)
/// without content contribute the empty-input default. Every width is then
/// floored at the general minimum. The result is a per-column max-reduce and
/// does not depend on the order cells are visited in. Bounds that fail
/// [`GridBounds::check`](crate::types::GridBounds::check) give an empty map.
pub fn resolve_column_widths(grid: &Grid, config: &TextWidthConfig) -> ColumnWidthMap {
    let bounds = grid.bounds();
    if bounds.check().is_err() {
        return ColumnWidthMap::default();
    }
    let mut widths: BTreeMap<u32, u32> = bounds
        .columns()
        .map(|col| (col, config.empty_width_px))
        .collect();

    for cell in grid.cells() {
        if let Some(width) = widths.get_mut(&cell.col) {
            *width = (*width).max(config.estimate(&cell.display_text()));
        }
    }

    for width in widths.values_mut() {
        *width = (*width).max(config.min_width_px);
    }

    ColumnWidthMap { widths }
}
