//! Rendering configuration.
//!
//! Defaults reproduce the engine's fixed output exactly; a config only needs
//! to be supplied when a caller deliberately wants different geometry.

use serde::{Deserialize, Serialize};

/// Per-character-class weights and floors for the text width estimator (px).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextWidthConfig {
    /// Hangul, kana and CJK ideographs
    pub wide_px: u32,
    /// ASCII letters
    pub latin_px: u32,
    pub digit_px: u32,
    pub whitespace_px: u32,
    /// Punctuation and every other character
    pub other_px: u32,
    /// Added once per line
    pub padding_px: u32,
    /// Floor for any non-empty estimate
    pub min_width_px: u32,
    /// Floor for vertically stacked single-glyph text
    pub stacked_min_width_px: u32,
    /// Result for empty or blank input
    pub empty_width_px: u32,
}

impl Default for TextWidthConfig {
    fn default() -> Self {
        Self {
            wide_px: 12,
            latin_px: 8,
            digit_px: 8,
            whitespace_px: 4,
            other_px: 6,
            padding_px: 20,
            min_width_px: 120,
            stacked_min_width_px: 160,
            empty_width_px: 80,
        }
    }
}

/// Document-level settings for the markup emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Class attribute of the emitted `<table>`
    pub table_class: String,
    pub font_family: String,
    pub font_size_px: u32,
    pub cell_padding: String,
    pub grid_line_color: String,
    /// `lang` attribute of the full document
    pub language: String,
    pub text_width: TextWidthConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            table_class: "excel-table".to_string(),
            font_family: "'Calibri', 'Arial', sans-serif".to_string(),
            font_size_px: 16,
            cell_padding: "2px 4px".to_string(),
            grid_line_color: "#d0d0d0".to_string(),
            language: "en".to_string(),
            text_width: TextWidthConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Load a config from JSON; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns an error when the JSON is malformed.
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RenderConfig::from_json(r#"{"tableClass":"sheet","textWidth":{"minWidthPx":90}}"#)
            .unwrap();
        assert_eq!(config.table_class, "sheet");
        assert_eq!(config.font_size_px, 16);
        assert_eq!(config.text_width.min_width_px, 90);
        assert_eq!(config.text_width.wide_px, 12);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(RenderConfig::from_json("{tableClass").is_err());
    }
}
