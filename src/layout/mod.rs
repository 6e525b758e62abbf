//! Layout engine: text width estimation, column widths and merge geometry.
//!
//! Every resolver here is a read-only function of the [`Grid`](crate::types::Grid)
//! and returns an owned value; none of them mutates the grid.

mod column_widths;
mod merges;
mod table_width;
mod text_width;

pub use column_widths::{resolve_column_widths, ColumnWidthMap};
pub use merges::{resolve_merges, MergeLayout, MergeWidth, Span};
pub use table_width::{
    char_width_to_px, table_width_hint, DEFAULT_COL_PX, FALLBACK_TABLE_PX, MIN_EXPLICIT_COL_PX,
    PAGE_MARGIN_PX, PX_PER_CHAR,
};
pub use text_width::{estimate_text_width, CharClass};
