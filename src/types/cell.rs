use serde::{Deserialize, Serialize};

use super::Style;
use crate::cell_ref::CellAddress;
use crate::numfmt;

/// A raw cell value as supplied by the grid source.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    /// Formula source text, e.g. `=SUM(A1:A3)`
    Formula(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// One grid position.
///
/// The address label is never stored; it is always derived from `row`/`col`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// 1-based row
    pub row: u32,
    /// 1-based column
    pub col: u32,
    #[serde(default)]
    pub value: CellValue,
    /// Pre-computed result for formula cells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached: Option<CellValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
}

impl Cell {
    pub fn new(row: u32, col: u32, value: CellValue) -> Self {
        Self {
            row,
            col,
            value,
            cached: None,
            number_format: None,
            style: None,
        }
    }

    pub fn empty(row: u32, col: u32) -> Self {
        Self::new(row, col, CellValue::Empty)
    }

    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = Some(style);
        self
    }

    #[must_use]
    pub fn with_number_format(mut self, format: impl Into<String>) -> Self {
        self.number_format = Some(format.into());
        self
    }

    #[must_use]
    pub fn with_cached(mut self, cached: CellValue) -> Self {
        self.cached = Some(cached);
        self
    }

    pub fn address(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }

    /// The value to show: a formula's cached result when one exists,
    /// otherwise the raw value (formula text included).
    pub fn display_value(&self) -> &CellValue {
        match (&self.value, &self.cached) {
            (CellValue::Formula(_), Some(cached)) if !cached.is_empty() => cached,
            (value, _) => value,
        }
    }

    /// Unformatted display text, used for width estimation.
    pub fn display_text(&self) -> String {
        numfmt::natural_text(self.display_value())
    }

    /// Display text with the number-format hint applied.
    pub fn formatted_text(&self) -> String {
        numfmt::format_value(self.display_value(), self.number_format.as_deref())
    }
}
