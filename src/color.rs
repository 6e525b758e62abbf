//! Color resolution utilities
//!
//! Resolves a source [`Color`] to a `#RRGGBB` string. No theme or palette
//! table is carried into the engine, so theme- and palette-indexed colors
//! resolve to [`FALLBACK_COLOR`] just like unknown or unparseable values.

use crate::types::Color;

/// Color used whenever a reference cannot be turned into a hex value.
pub const FALLBACK_COLOR: &str = "#000000";

/// Resolve a color reference to a `#RRGGBB` string. Never fails.
pub fn resolve_color(color: &Color) -> String {
    match color {
        Color::Direct(value) => resolve_direct(value).unwrap_or_else(|| FALLBACK_COLOR.to_string()),
        Color::ThemeIndexed(_) | Color::PaletteIndexed(_) | Color::Unknown => {
            FALLBACK_COLOR.to_string()
        }
    }
}

/// Resolve an optional reference, falling back when absent.
pub fn resolve_color_or_fallback(color: Option<&Color>) -> String {
    color.map_or_else(|| FALLBACK_COLOR.to_string(), resolve_color)
}

fn resolve_direct(value: &str) -> Option<String> {
    // ARGB: two alpha characters followed by six hex digits
    if value.len() == 8 && value.is_ascii() {
        let rgb = value.get(2..)?;
        if rgb.chars().all(|c| c.is_ascii_hexdigit()) {
            return Some(format!("#{rgb}"));
        }
        return None;
    }

    if value.len() == 6 && value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Some(format!("#{value}"));
    }

    None
}
