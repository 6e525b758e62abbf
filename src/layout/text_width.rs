//! Pixel width estimation for cell text.
//!
//! Widths are estimates from per-character-class weights, not font metrics.
//! The function is pure and platform independent: integer arithmetic only.

use crate::config::TextWidthConfig;

/// Character classes with distinct width weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Hangul, kana and CJK ideographs
    Wide,
    Latin,
    Digit,
    Whitespace,
    Other,
}

impl CharClass {
    pub fn of(ch: char) -> Self {
        if is_wide(ch) {
            Self::Wide
        } else if ch.is_ascii_alphabetic() {
            Self::Latin
        } else if ch.is_ascii_digit() {
            Self::Digit
        } else if ch.is_whitespace() {
            Self::Whitespace
        } else {
            Self::Other
        }
    }

    fn weight(self, config: &TextWidthConfig) -> u32 {
        match self {
            Self::Wide => config.wide_px,
            Self::Latin => config.latin_px,
            Self::Digit => config.digit_px,
            Self::Whitespace => config.whitespace_px,
            Self::Other => config.other_px,
        }
    }
}

fn is_wide(ch: char) -> bool {
    matches!(ch,
        '\u{1100}'..='\u{11FF}'     // Hangul Jamo
        | '\u{3040}'..='\u{30FF}'   // Hiragana, Katakana
        | '\u{3131}'..='\u{318E}'   // Hangul Compatibility Jamo
        | '\u{4E00}'..='\u{9FFF}'   // CJK Unified Ideographs
        | '\u{AC00}'..='\u{D7A3}'   // Hangul Syllables
    )
}

/// Estimate with the default weights.
pub fn estimate_text_width(text: &str) -> u32 {
    TextWidthConfig::default().estimate(text)
}

impl TextWidthConfig {
    /// Estimate the rendered width of `text` in pixels.
    ///
    /// Multi-line text measures as its widest line. Empty or blank input
    /// yields `empty_width_px`; anything else is at least `min_width_px`.
    pub fn estimate(&self, text: &str) -> u32 {
        let widest = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| self.line_width(line))
            .max();

        match widest {
            Some(width) => width.max(self.min_width_px),
            None => self.empty_width_px,
        }
    }

    fn line_width(&self, line: &str) -> u32 {
        let glyphs = line
            .chars()
            .fold(0u32, |sum, ch| sum.saturating_add(CharClass::of(ch).weight(self)));
        let width = glyphs.saturating_add(self.padding_px);

        if is_stacked(line) {
            width.max(self.stacked_min_width_px)
        } else {
            width
        }
    }
}

/// Text laid out one glyph per token ("가 나 다 라"), usually rendered as a
/// vertical stack.
fn is_stacked(line: &str) -> bool {
    line.chars().count() > 5 && line.split_whitespace().all(|word| word.chars().count() == 1)
}
