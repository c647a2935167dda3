//! A1-notation cell ranges.
//!
//! Attendance templates pin their table to a fixed rectangle such as
//! `B3:L204`. This module parses that notation into 1-based inclusive
//! column and row bounds.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{EngineError, EngineResult};

static RANGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z]{1,3})([1-9][0-9]*)\s*:\s*([A-Za-z]{1,3})([1-9][0-9]*)\s*$")
        .expect("range pattern is a valid regex")
});

/// An inclusive rectangular cell range with 1-based coordinates.
///
/// # Example
///
/// ```
/// use stipend_engine::extraction::CellRange;
///
/// let range: CellRange = "B3:L204".parse().unwrap();
/// assert_eq!(range.first_col, 2);
/// assert_eq!(range.last_col, 12);
/// assert_eq!(range.first_row, 3);
/// assert_eq!(range.last_row, 204);
/// assert_eq!(range.width(), 11);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// First column (A = 1).
    pub first_col: u32,
    /// First row (1-based).
    pub first_row: u32,
    /// Last column, inclusive.
    pub last_col: u32,
    /// Last row, inclusive.
    pub last_row: u32,
}

impl CellRange {
    /// Creates a range from 1-based inclusive bounds.
    ///
    /// Bounds given in reverse order are swapped.
    pub fn new(first_col: u32, first_row: u32, last_col: u32, last_row: u32) -> Self {
        Self {
            first_col: first_col.min(last_col),
            first_row: first_row.min(last_row),
            last_col: first_col.max(last_col),
            last_row: first_row.max(last_row),
        }
    }

    /// Parses an A1-notation range such as `B3:L204`.
    ///
    /// Returns [`EngineError::RangeFormatInvalid`] when the string does not
    /// match the pattern.
    pub fn parse(range: &str) -> EngineResult<Self> {
        let invalid = || EngineError::RangeFormatInvalid {
            range: range.to_string(),
        };

        let caps = RANGE_PATTERN.captures(range).ok_or_else(invalid)?;
        let first_col = column_number(&caps[1]);
        let first_row: u32 = caps[2].parse().map_err(|_| invalid())?;
        let last_col = column_number(&caps[3]);
        let last_row: u32 = caps[4].parse().map_err(|_| invalid())?;

        Ok(Self::new(first_col, first_row, last_col, last_row))
    }

    /// Number of columns in the range.
    pub fn width(&self) -> u32 {
        self.last_col - self.first_col + 1
    }

    /// Number of rows in the range.
    pub fn height(&self) -> u32 {
        self.last_row - self.first_row + 1
    }
}

impl FromStr for CellRange {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}:{}{}",
            column_letters(self.first_col),
            self.first_row,
            column_letters(self.last_col),
            self.last_row
        )
    }
}

/// Converts column letters to a 1-based column number (`A` = 1, `AA` = 27).
pub fn column_number(letters: &str) -> u32 {
    letters
        .chars()
        .map(|c| c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)
        .fold(0, |acc, digit| acc * 26 + digit)
}

/// Converts a 1-based column number to column letters.
pub fn column_letters(mut number: u32) -> String {
    let mut letters = Vec::new();
    while number > 0 {
        let rem = (number - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        number = (number - 1) / 26;
    }
    letters.iter().rev().collect()
}
