//! Merge range resolution in render-space.
//!
//! Each merge becomes a [`Span`] on its anchor (top-left) cell; every other
//! covered position goes into the suppressed set and is never emitted.
//! Faults are isolated per merge: a merge that cannot be placed is dropped
//! and its cells render as ordinary, unmerged cells.

use std::collections::{BTreeMap, BTreeSet};

use crate::cell_ref::CellAddress;
use crate::config::TextWidthConfig;
use crate::types::{Grid, GridBounds, RenderCoord};

/// Width hint for a merge anchor derived from its own text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeWidth {
    pub min_px: u32,
    pub max_px: u32,
}

/// Geometry of one merged region, in render-space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub anchor: RenderCoord,
    pub col_span: u32,
    pub row_span: u32,
    /// Present when the anchor has text; overrides the column width.
    pub width: Option<MergeWidth>,
}

/// All resolved merges of a grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeLayout {
    spans: BTreeMap<RenderCoord, Span>,
    suppressed: BTreeSet<RenderCoord>,
}

impl MergeLayout {
    pub fn span_at(&self, coord: RenderCoord) -> Option<&Span> {
        self.spans.get(&coord)
    }

    pub fn is_suppressed(&self, coord: RenderCoord) -> bool {
        self.suppressed.contains(&coord)
    }

    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.values()
    }

    pub fn suppressed(&self) -> &BTreeSet<RenderCoord> {
        &self.suppressed
    }

    fn is_claimed(&self, coord: RenderCoord) -> bool {
        self.spans.contains_key(&coord) || self.suppressed.contains(&coord)
    }
}

/// Resolve every merge on the grid.
///
/// Merges are taken in grid order and the first one to claim a position
/// keeps it. A merge is dropped (with a warning) when its descriptor does
/// not parse, its anchor lies outside the grid, or it covers a position an
/// earlier merge already claimed.
/// A merge that runs past the grid edge is clipped to the grid.
pub fn resolve_merges(grid: &Grid, config: &TextWidthConfig) -> MergeLayout {
    let bounds = grid.bounds();
    let mut layout = MergeLayout::default();

    for merge in grid.merges() {
        let range = match merge.bounds() {
            Ok(range) => range,
            Err(e) => {
                log::warn!("Ignoring merge on sheet '{}': {e}", grid.sheet_name());
                continue;
            }
        };

        let Some(anchor) = bounds.to_render(range.start) else {
            log::warn!(
                "Ignoring merge {} on sheet '{}': anchor outside {bounds}",
                merge.reference(),
                grid.sheet_name()
            );
            continue;
        };

        let Some(end) = clipped_end(bounds, range.end) else {
            continue;
        };

        let covered: Vec<RenderCoord> = (anchor.row..=end.row)
            .flat_map(|row| (anchor.col..=end.col).map(move |col| RenderCoord::new(row, col)))
            .collect();

        if covered.iter().any(|&coord| layout.is_claimed(coord)) {
            log::warn!(
                "Ignoring merge {} on sheet '{}': overlaps an earlier merge",
                merge.reference(),
                grid.sheet_name()
            );
            continue;
        }

        let col_span = end.col - anchor.col + 1;
        let row_span = end.row - anchor.row + 1;
        layout
            .suppressed
            .extend(covered.into_iter().filter(|&coord| coord != anchor));

        let width = grid
            .cell(range.start)
            .map(|cell| cell.display_text())
            .filter(|text| !text.trim().is_empty())
            .map(|text| {
                let estimate = config.estimate(&text);
                MergeWidth {
                    min_px: estimate,
                    max_px: estimate.saturating_mul(2),
                }
            });

        layout.spans.insert(
            anchor,
            Span {
                anchor,
                col_span,
                row_span,
                width,
            },
        );
    }

    layout
}

/// Render-space position of a merge end, clipped to the grid.
fn clipped_end(bounds: GridBounds, end: CellAddress) -> Option<RenderCoord> {
    let clipped = CellAddress::new(end.row.min(bounds.end_row), end.col.min(bounds.end_col));
    bounds.to_render(clipped)
}
