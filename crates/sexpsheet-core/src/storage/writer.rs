//! Writer for the worksheet text format

use crate::error::{Result, SheetError};
use sexpsheet_engine::engine::Grid;
use std::fs;
use std::path::Path;

/// Write a Grid to a worksheet file
pub fn write_sheet(path: &Path, grid: &Grid) -> Result<()> {
    let content = write_sheet_content(grid)?;
    fs::write(path, content)?;
    Ok(())
}

/// Write a Grid to a worksheet format string, one line per populated cell in
/// row-major order.
pub fn write_sheet_content(grid: &Grid) -> Result<String> {
    let mut cells: Vec<_> = grid.iter().filter(|entry| !entry.value().is_empty()).collect();
    cells.sort_by(|a, b| a.key().cmp(b.key()));

    let mut out = String::new();
    for entry in cells {
        let coord = entry.key();
        let raw = entry.value();
        if raw.contains(['\n', '\r']) {
            return Err(SheetError::MultilineContent {
                cell: coord.to_string(),
            });
        }
        out.push_str(&format!("{} {}\n", coord, raw));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::parse_sheet_content;
    use sexpsheet_engine::engine::{Coord, new_grid};

    fn coord(name: &str) -> Coord {
        Coord::parse_a1(name).unwrap()
    }

    #[test]
    fn test_write_value_and_formula() {
        let grid = new_grid();
        grid.insert(coord("A1"), "42".to_string());
        grid.insert(coord("B1"), "=(SUM A1)".to_string());
        let content = write_sheet_content(&grid).unwrap();
        assert_eq!(content, "A1 42\nB1 =(SUM A1)\n");
    }

    #[test]
    fn test_sorted_output() {
        let grid = new_grid();
        grid.insert(coord("B2"), "3".to_string());
        grid.insert(coord("A1"), "1".to_string());
        grid.insert(coord("B1"), "2".to_string());
        grid.insert(coord("A10"), "4".to_string());
        let content = write_sheet_content(&grid).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["A1 1", "B1 2", "B2 3", "A10 4"]);
    }

    #[test]
    fn test_skip_empty_cells() {
        let grid = new_grid();
        grid.insert(coord("A1"), String::new());
        grid.insert(coord("B1"), "42".to_string());
        let content = write_sheet_content(&grid).unwrap();
        assert_eq!(content, "B1 42\n");
    }

    #[test]
    fn test_round_trip_keeps_trailing_spaces() {
        let grid = new_grid();
        grid.insert(coord("C3"), "\"x\"   ".to_string());
        grid.insert(coord("A1"), " leading".to_string());
        let content = write_sheet_content(&grid).unwrap();
        let parsed = parse_sheet_content(&content).unwrap();
        assert_eq!(parsed.get(&coord("C3")).unwrap().value(), "\"x\"   ");
        assert_eq!(parsed.get(&coord("A1")).unwrap().value(), " leading");
    }

    #[test]
    fn test_line_breaks_are_rejected() {
        let grid = new_grid();
        grid.insert(coord("D4"), "\"a\r\nb\"".to_string());
        assert!(matches!(
            write_sheet_content(&grid),
            Err(SheetError::MultilineContent { cell }) if cell == "D4"
        ));
    }
}
