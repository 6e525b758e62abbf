//! Utilities for parsing Excel-style cell references and ranges.
//!
//! All indices here are 1-based, matching the grid's absolute coordinates.
//! Grid construction, the grid source and the merge resolver all go through
//! these functions so there is exactly one address scanner in the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, XlmarkupError};

/// Largest column index Excel accepts (`XFD`).
pub const MAX_COL: u32 = 16_384;

/// Largest row index Excel accepts.
pub const MAX_ROW: u32 = 1_048_576;

/// A single absolute cell position (1-based row and column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellAddress {
    pub row: u32,
    pub col: u32,
}

impl CellAddress {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a reference like `"B12"` or `"$B$12"`.
    ///
    /// # Errors
    /// Returns [`XlmarkupError::CellRef`] when letters and digits are not in
    /// `LETTERS DIGITS` order, either part is missing, or an index is out of
    /// Excel's range.
    pub fn parse(reference: &str) -> Result<Self> {
        let invalid = || XlmarkupError::CellRef(reference.to_string());
        let trimmed = reference.trim();

        let mut col: u32 = 0;
        let mut row: u32 = 0;
        let mut saw_col = false;
        let mut saw_row = false;

        for ch in trimmed.chars() {
            if ch == '$' {
                continue;
            }
            if ch.is_ascii_alphabetic() {
                // Letters after digits ("1A") are not an address.
                if saw_row {
                    return Err(invalid());
                }
                let digit = u32::from(ch.to_ascii_uppercase()) - u32::from('A') + 1;
                col = col
                    .checked_mul(26)
                    .and_then(|c| c.checked_add(digit))
                    .ok_or_else(invalid)?;
                saw_col = true;
            } else if let Some(digit) = ch.to_digit(10) {
                row = row
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(digit))
                    .ok_or_else(invalid)?;
                saw_row = true;
            } else {
                return Err(invalid());
            }
        }

        if !saw_col || !saw_row || row == 0 || row > MAX_ROW || col > MAX_COL {
            return Err(invalid());
        }

        Ok(Self { row, col })
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

/// An inclusive rectangle of cells, `start` is top-left and `end` bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    /// Parse a range like `"A1:D10"`. A lone address is a 1x1 range.
    ///
    /// # Errors
    /// Returns [`XlmarkupError::CellRef`] when either endpoint does not parse
    /// or the end lies before the start on either axis.
    pub fn parse(descriptor: &str) -> Result<Self> {
        let (start, end) = match descriptor.split_once(':') {
            Some((start, end)) => (CellAddress::parse(start)?, CellAddress::parse(end)?),
            None => {
                let single = CellAddress::parse(descriptor)?;
                (single, single)
            }
        };

        if start.row > end.row || start.col > end.col {
            return Err(XlmarkupError::CellRef(descriptor.to_string()));
        }

        Ok(Self { start, end })
    }

    /// True when `addr` lies inside the rectangle.
    pub fn contains(&self, addr: CellAddress) -> bool {
        (self.start.row..=self.end.row).contains(&addr.row)
            && (self.start.col..=self.end.col).contains(&addr.col)
    }

    /// Number of rows covered.
    pub fn height(&self) -> u32 {
        self.end.row - self.start.row + 1
    }

    /// Number of columns covered.
    pub fn width(&self) -> u32 {
        self.end.col - self.start.col + 1
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Convert a 1-based column index to its letters (1 -> "A", 27 -> "AA").
///
/// Column 0 has no letters and yields an empty string.
pub fn column_letters(col: u32) -> String {
    let mut letters = Vec::new();
    let mut n = col;
    while n > 0 {
        n -= 1;
        // n % 26 < 26, so the narrowing is lossless.
        #[allow(clippy::cast_possible_truncation)]
        letters.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    letters.iter().rev().collect()
}

/// Convert column letters to a 1-based index ("A" -> 1, "AA" -> 27).
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() {
        return None;
    }
    letters.chars().try_fold(0u32, |acc, ch| {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = u32::from(ch.to_ascii_uppercase()) - u32::from('A') + 1;
        acc.checked_mul(26)?.checked_add(digit)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("A1", 1, 1)]
    #[test_case("B12", 12, 2)]
    #[test_case("$C$3", 3, 3)]
    #[test_case("z9", 9, 26)]
    #[test_case("AA100", 100, 27)]
    #[test_case("XFD1048576", 1_048_576, 16_384)]
    fn parses_addresses(input: &str, row: u32, col: u32) {
        assert_eq!(CellAddress::parse(input).unwrap(), CellAddress::new(row, col));
    }

    #[test_case(""; "empty")]
    #[test_case("A"; "letters only")]
    #[test_case("12"; "digits only")]
    #[test_case("A0"; "row zero")]
    #[test_case("1A"; "digits before letters")]
    #[test_case("A1B"; "letters after digits")]
    #[test_case("A-1"; "punctuation")]
    #[test_case("XFE1"; "column past XFD")]
    #[test_case("A99999999999"; "row overflow")]
    fn rejects_malformed_addresses(input: &str) {
        assert!(matches!(
            CellAddress::parse(input),
            Err(XlmarkupError::CellRef(_))
        ));
    }

    #[test]
    fn address_display_round_trips_labels() {
        assert_eq!(CellAddress::new(1, 1).to_string(), "A1");
        assert_eq!(CellAddress::new(7, 28).to_string(), "AB7");
    }

    #[test]
    fn column_letter_conversions() {
        assert_eq!(column_letters(1), "A");
        assert_eq!(column_letters(26), "Z");
        assert_eq!(column_letters(27), "AA");
        assert_eq!(column_letters(702), "ZZ");
        assert_eq!(column_letters(703), "AAA");
        assert_eq!(column_letters(0), "");

        assert_eq!(column_index("A"), Some(1));
        assert_eq!(column_index("zz"), Some(702));
        assert_eq!(column_index(""), None);
        assert_eq!(column_index("A1"), None);
    }

    #[test]
    fn parses_ranges() {
        let range = CellRange::parse("B2:D3").unwrap();
        assert_eq!(range.start, CellAddress::new(2, 2));
        assert_eq!(range.end, CellAddress::new(3, 4));
        assert_eq!(range.width(), 3);
        assert_eq!(range.height(), 2);
        assert!(range.contains(CellAddress::new(3, 3)));
        assert!(!range.contains(CellAddress::new(4, 3)));
        assert_eq!(range.to_string(), "B2:D3");

        let single = CellRange::parse("C5").unwrap();
        assert_eq!(single.start, single.end);
    }

    #[test]
    fn rejects_inverted_or_broken_ranges() {
        assert!(CellRange::parse("D3:B2").is_err());
        assert!(CellRange::parse("B2:").is_err());
        assert!(CellRange::parse("B2:??").is_err());
    }
}
