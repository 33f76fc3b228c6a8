//! Cell coordinates and column naming.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "B2", "AA100") and one-indexed column/row coordinates.
//!
//! # Examples
//!
//! ```
//! use sexpsheet_engine::engine::Coord;
//!
//! let cell: Coord = "B3".parse().unwrap();
//! assert_eq!(cell.col, 2); // 1-indexed
//! assert_eq!(cell.row, 3);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::EngineError;

/// A cell position by column and row (both 1-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a coordinate. Both components must be at least 1.
    pub fn new(col: usize, row: usize) -> Result<Coord, EngineError> {
        if col == 0 || row == 0 {
            return Err(EngineError::InvalidCoordinate { col, row });
        }
        Ok(Coord { row, col })
    }

    /// Parse a cell reference in `[A-Z]+[0-9]+` form.
    /// Returns None if the text is not a reference or names row/column 0.
    pub fn parse_a1(name: &str) -> Option<Coord> {
        let caps = cell_name_re().captures(name)?;
        let col = Coord::col_name_to_index(&caps["letters"])?;
        let row = caps["numbers"].parse::<usize>().ok()?;
        Coord::new(col, row).ok()
    }

    /// Convert column letters to a 1-based index (A -> 1, Z -> 26, AA -> 27).
    /// Returns None for empty input, non-letters, or overflow.
    pub fn col_name_to_index(name: &str) -> Option<usize> {
        if name.is_empty() {
            return None;
        }
        let mut acc = 0usize;
        for c in name.bytes() {
            if !c.is_ascii_uppercase() {
                return None;
            }
            let digit = (c - b'A') as usize + 1;
            acc = acc.checked_mul(26)?.checked_add(digit)?;
        }
        Some(acc)
    }

    /// Convert a 1-based column index to letters (1 -> A, 26 -> Z, 27 -> AA).
    /// Index 0 has no name and yields an empty string.
    pub fn col_index_to_name(index: usize) -> String {
        let mut result = String::new();
        let mut n = index;
        while n > 0 {
            let digit = (n - 1) % 26;
            result.insert(0, (b'A' + digit as u8) as char);
            n = (n - 1) / 26;
        }
        result
    }

    /// Whether `name` is a bare column name (`[A-Z]+`).
    pub fn is_column_name(name: &str) -> bool {
        !name.is_empty() && name.bytes().all(|c| c.is_ascii_uppercase())
    }
}

fn cell_name_re() -> &'static Regex {
    static CELL_NAME_RE: OnceLock<Regex> = OnceLock::new();
    CELL_NAME_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Z]+)(?<numbers>[0-9]+)$")
            .expect("cell name regex must compile")
    })
}

impl std::str::FromStr for Coord {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| EngineError::InvalidReference(s.to_string()))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Coord::col_index_to_name(self.col), self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::Coord;
    use proptest::prelude::*;

    #[test]
    fn test_new_rejects_zero_components() {
        assert!(Coord::new(0, 1).is_err());
        assert!(Coord::new(1, 0).is_err());
        assert!(Coord::new(1, 1).is_ok());
    }

    #[test]
    fn test_col_names_known_points() {
        assert_eq!(Coord::col_index_to_name(1), "A");
        assert_eq!(Coord::col_index_to_name(26), "Z");
        assert_eq!(Coord::col_index_to_name(27), "AA");
        assert_eq!(Coord::col_index_to_name(52), "AZ");
        assert_eq!(Coord::col_index_to_name(53), "BA");
        assert_eq!(Coord::col_index_to_name(702), "ZZ");
        assert_eq!(Coord::col_index_to_name(703), "AAA");
        assert_eq!(Coord::col_name_to_index("AA"), Some(27));
        assert_eq!(Coord::col_name_to_index("ZZ"), Some(702));
    }

    #[test]
    fn test_parse_a1_overflow_returns_none() {
        let huge = format!("{}1", "Z".repeat(40));
        assert!(Coord::parse_a1(&huge).is_none());
    }

    #[test]
    fn test_parse_a1_is_case_sensitive() {
        assert!(Coord::parse_a1("a1").is_none());
        assert_eq!(Coord::parse_a1("C12"), Some(Coord { col: 3, row: 12 }));
    }

    #[test]
    fn test_parse_a1_rejects_row_zero() {
        assert!(Coord::parse_a1("A0").is_none());
        assert!("A0".parse::<Coord>().is_err());
    }

    proptest! {
        #[test]
        fn col_index_round_trips(index in 1usize..1_000_000) {
            let name = Coord::col_index_to_name(index);
            prop_assert_eq!(Coord::col_name_to_index(&name), Some(index));
        }

        #[test]
        fn col_name_round_trips(name in "[A-Z]{1,5}") {
            let index = Coord::col_name_to_index(&name).unwrap();
            prop_assert_eq!(Coord::col_index_to_name(index), name);
        }
    }
}
