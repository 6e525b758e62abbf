//! Number format hints and value-to-text conversion.
//!
//! Format codes are not interpreted as Excel's mini-language. The hint only
//! picks one of three surface renderings for numbers:
//! - a code containing `0.00` shows two decimals
//! - a code containing `0%` shows a whole-number percentage
//! - anything else (or no code) shows the number's natural form
//!
//! The two-decimal marker is checked first, so `0.00%` renders as two decimals.

use crate::types::CellValue;

/// Marker selecting two-decimal display.
pub const TWO_DECIMAL_MARKER: &str = "0.00";

/// Marker selecting whole-number percentage display.
pub const PERCENT_MARKER: &str = "0%";

/// Surface rendering chosen for a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberRule {
    TwoDecimals,
    Percent,
    General,
}

impl NumberRule {
    /// Pick the rule for a format-code hint.
    pub fn for_hint(hint: Option<&str>) -> Self {
        match hint {
            Some(code) if code.contains(TWO_DECIMAL_MARKER) => Self::TwoDecimals,
            Some(code) if code.contains(PERCENT_MARKER) => Self::Percent,
            _ => Self::General,
        }
    }

    pub fn apply(self, value: f64) -> String {
        if !value.is_finite() {
            return format_general(value);
        }
        match self {
            Self::TwoDecimals => format!("{value:.2}"),
            Self::Percent => format!("{:.0}%", value * 100.0),
            Self::General => format_general(value),
        }
    }
}

/// Format a number according to its hint.
pub fn format_number(value: f64, hint: Option<&str>) -> String {
    NumberRule::for_hint(hint).apply(value)
}

/// Render a value for display, applying the number hint to numbers only.
pub fn format_value(value: &CellValue, hint: Option<&str>) -> String {
    match value {
        CellValue::Number(n) => format_number(*n, hint),
        CellValue::Empty
        | CellValue::Text(_)
        | CellValue::Boolean(_)
        | CellValue::Formula(_) => natural_text(value),
    }
}

/// The value's natural string form, ignoring any format hint.
pub fn natural_text(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Number(n) => format_general(*n),
        CellValue::Text(s) | CellValue::Formula(s) => s.clone(),
        CellValue::Boolean(true) => "TRUE".to_string(),
        CellValue::Boolean(false) => "FALSE".to_string(),
    }
}

/// Magnitudes at or above this use exponent form.
const EXPONENT_ABOVE: f64 = 1e16;

/// Magnitudes below this use exponent form.
const EXPONENT_BELOW: f64 = 1e-4;

/// Shortest round-trip form; integral values drop the fraction and `-0`
/// collapses to `0`. Very large or small magnitudes switch to `1e+300` /
/// `1.5e-05` style.
fn format_general(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if magnitude >= EXPONENT_ABOVE || magnitude < EXPONENT_BELOW {
        return format_exponent(value);
    }
    value.to_string()
}

/// `{:e}` output with a signed exponent of at least two digits.
fn format_exponent(value: f64) -> String {
    let formatted = format!("{value:e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => formatted,
    }
}
