//! Viewport width hint for the rasterizer, and the shared conversion from
//! Excel column widths (character units) to pixels.

use crate::types::Grid;

/// Pixels per Excel character width unit.
pub const PX_PER_CHAR: f64 = 7.0;

/// Floor for an explicit column in the table width hint.
pub const MIN_EXPLICIT_COL_PX: u32 = 80;

/// Width counted for columns without an explicit width.
pub const DEFAULT_COL_PX: u32 = 100;

/// Horizontal page margin added to the hint.
pub const PAGE_MARGIN_PX: u32 = 40;

/// Hint used when no column contributes any width.
pub const FALLBACK_TABLE_PX: u32 = 800;

/// Convert an Excel character-unit width to whole pixels (truncating).
/// Non-finite or non-positive widths become 0.
pub fn char_width_to_px(width: f64) -> u32 {
    let px = width * PX_PER_CHAR;
    if !px.is_finite() || px <= 0.0 {
        return 0;
    }
    // Clamped into u32 range first, so the cast cannot wrap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let px = px.min(f64::from(u32::MAX)) as u32;
    px
}

/// Estimate the total table width from the grid's explicit column widths.
/// Bounds that fail [`GridBounds::check`](crate::types::GridBounds::check)
/// get the fixed fallback width.
pub fn table_width_hint(grid: &Grid) -> u32 {
    let bounds = grid.bounds();
    if bounds.check().is_err() {
        return FALLBACK_TABLE_PX;
    }

    let total = bounds.columns().fold(0u32, |sum, col| {
        let px = grid
            .column_width(col)
            .map_or(DEFAULT_COL_PX, |w| char_width_to_px(w).max(MIN_EXPLICIT_COL_PX));
        sum.saturating_add(px)
    });

    if total == 0 {
        return FALLBACK_TABLE_PX;
    }
    total.saturating_add(PAGE_MARGIN_PX)
}
