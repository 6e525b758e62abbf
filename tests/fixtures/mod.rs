//! Test fixtures for building grids in memory.
//!
//! Builders take A1-style references and string colors so tests read like
//! the sheets they describe.
//!
//! # Example
//!
//! ```rust,ignore
//! use fixtures::{SheetBuilder, StyleBuilder};
//!
//! let grid = SheetBuilder::new("Sheet1")
//!     .cell("A1", "Hello")
//!     .styled_cell("B1", 42.0, StyleBuilder::new().bold())
//!     .merge("A2:B2")
//!     .build();
//! ```
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use xlmarkup::cell_ref::CellAddress;
use xlmarkup::{
    Alignment, Border, BorderSide, BorderStyle, Cell, CellValue, Color, Fill, Font, Grid,
    GridBounds, HAlign, Style, VAlign,
};

// ============================================================================
// Style Builder
// ============================================================================

/// Builder for cell styles.
#[derive(Debug, Clone, Default)]
pub struct StyleBuilder {
    style: Style,
}

impl StyleBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn font_mut(&mut self) -> &mut Font {
        self.style.font.get_or_insert_with(Font::default)
    }

    fn alignment_mut(&mut self) -> &mut Alignment {
        self.style.alignment.get_or_insert_with(Alignment::default)
    }

    fn border_mut(&mut self) -> &mut Border {
        self.style.border.get_or_insert_with(Border::default)
    }

    // Font methods

    #[must_use]
    pub fn font_name(mut self, name: &str) -> Self {
        self.font_mut().name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn font_size(mut self, size: f64) -> Self {
        self.font_mut().size = Some(size);
        self
    }

    /// Font color as `RRGGBB` or `AARRGGBB`.
    #[must_use]
    pub fn font_color(mut self, color: &str) -> Self {
        self.font_mut().color = Some(Color::Direct(color.to_string()));
        self
    }

    #[must_use]
    pub fn font_theme_color(mut self, index: u32) -> Self {
        self.font_mut().color = Some(Color::ThemeIndexed(index));
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.font_mut().bold = Some(true);
        self
    }

    #[must_use]
    pub fn italic(mut self) -> Self {
        self.font_mut().italic = Some(true);
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.font_mut().underline = Some(true);
        self
    }

    // Fill methods

    #[must_use]
    pub fn bg_color(mut self, color: &str) -> Self {
        self.style.fill = Some(Fill {
            color: Some(Color::Direct(color.to_string())),
        });
        self
    }

    #[must_use]
    pub fn bg_palette_color(mut self, index: u32) -> Self {
        self.style.fill = Some(Fill {
            color: Some(Color::PaletteIndexed(index)),
        });
        self
    }

    // Border methods

    #[must_use]
    pub fn border_all(mut self, style: BorderStyle, color: Option<&str>) -> Self {
        let side = side(style, color);
        let border = self.border_mut();
        border.left = Some(side.clone());
        border.right = Some(side.clone());
        border.top = Some(side.clone());
        border.bottom = Some(side);
        self
    }

    #[must_use]
    pub fn border_left(mut self, style: BorderStyle, color: Option<&str>) -> Self {
        self.border_mut().left = Some(side(style, color));
        self
    }

    #[must_use]
    pub fn border_bottom(mut self, style: BorderStyle, color: Option<&str>) -> Self {
        self.border_mut().bottom = Some(side(style, color));
        self
    }

    // Alignment methods

    #[must_use]
    pub fn align_horizontal(mut self, align: HAlign) -> Self {
        self.alignment_mut().horizontal = Some(align);
        self
    }

    #[must_use]
    pub fn align_vertical(mut self, align: VAlign) -> Self {
        self.alignment_mut().vertical = Some(align);
        self
    }

    #[must_use]
    pub fn wrap_text(mut self, wrap: bool) -> Self {
        self.alignment_mut().wrap_text = Some(wrap);
        self
    }

    #[must_use]
    pub fn rotation(mut self, degrees: u32) -> Self {
        self.alignment_mut().rotation = Some(degrees);
        self
    }

    #[must_use]
    pub fn build(self) -> Style {
        self.style
    }
}

fn side(style: BorderStyle, color: Option<&str>) -> BorderSide {
    BorderSide {
        style: Some(style),
        color: color.map(|c| Color::Direct(c.to_string())),
    }
}

// ============================================================================
// Value conversions
// ============================================================================

/// Local wrapper so tests can pass plain literals as cell values.
pub struct Value(pub CellValue);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self(CellValue::Text(s.to_string()))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self(CellValue::Number(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self(CellValue::Number(f64::from(n)))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self(CellValue::Boolean(b))
    }
}

impl From<CellValue> for Value {
    fn from(v: CellValue) -> Self {
        Self(v)
    }
}

// ============================================================================
// Sheet Builder
// ============================================================================

/// Builder for a single-sheet grid.
#[derive(Debug, Clone)]
pub struct SheetBuilder {
    name: String,
    bounds: Option<GridBounds>,
    cells: Vec<Cell>,
    merges: Vec<String>,
    row_heights: Vec<(u32, f64)>,
    col_widths: Vec<(u32, f64)>,
}

impl SheetBuilder {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            bounds: None,
            cells: Vec::new(),
            merges: Vec::new(),
            row_heights: Vec::new(),
            col_widths: Vec::new(),
        }
    }

    /// Fix the grid rectangle, e.g. `"A1:D5"`.
    #[must_use]
    pub fn range(mut self, range: &str) -> Self {
        let range = xlmarkup::cell_ref::CellRange::parse(range).expect("valid range");
        self.bounds = Some(GridBounds::from_range(range));
        self
    }

    #[must_use]
    pub fn cell<V: Into<Value>>(mut self, cell_ref: &str, value: V) -> Self {
        let addr = CellAddress::parse(cell_ref).expect("valid cell reference");
        self.cells.push(Cell::new(addr.row, addr.col, value.into().0));
        self
    }

    #[must_use]
    pub fn styled_cell<V: Into<Value>>(mut self, cell_ref: &str, value: V, style: StyleBuilder) -> Self {
        let addr = CellAddress::parse(cell_ref).expect("valid cell reference");
        self.cells
            .push(Cell::new(addr.row, addr.col, value.into().0).with_style(style.build()));
        self
    }

    #[must_use]
    pub fn formatted_cell(mut self, cell_ref: &str, value: f64, format: &str) -> Self {
        let addr = CellAddress::parse(cell_ref).expect("valid cell reference");
        self.cells.push(
            Cell::new(addr.row, addr.col, CellValue::Number(value)).with_number_format(format),
        );
        self
    }

    #[must_use]
    pub fn raw_cell(mut self, cell: Cell) -> Self {
        self.cells.push(cell);
        self
    }

    #[must_use]
    pub fn merge(mut self, range: &str) -> Self {
        self.merges.push(range.to_string());
        self
    }

    /// Column width in Excel character units.
    #[must_use]
    pub fn col_width(mut self, col: u32, width: f64) -> Self {
        self.col_widths.push((col, width));
        self
    }

    /// Row height in pixels.
    #[must_use]
    pub fn row_height(mut self, row: u32, height: f64) -> Self {
        self.row_heights.push((row, height));
        self
    }

    /// Cells in insertion order, for order-independence checks.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[must_use]
    pub fn with_cells(mut self, cells: Vec<Cell>) -> Self {
        self.cells = cells;
        self
    }

    #[must_use]
    pub fn build(self) -> Grid {
        let mut builder = Grid::builder(&self.name).cells(self.cells);
        if let Some(bounds) = self.bounds {
            builder = builder.bounds(bounds);
        }
        for merge in &self.merges {
            builder = builder.merge_ref(merge);
        }
        for (row, height) in self.row_heights {
            builder = builder.row_height(row, height);
        }
        for (col, width) in self.col_widths {
            builder = builder.column_width(col, width);
        }
        builder.build().expect("valid grid")
    }
}
