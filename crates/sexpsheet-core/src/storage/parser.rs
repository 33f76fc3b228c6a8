//! Parser for the worksheet text format

use crate::error::{Result, SheetError};
use sexpsheet_engine::engine::{Coord, Grid, new_grid};
use std::fs;
use std::path::Path;

/// Parse a worksheet file and return a Grid
pub fn parse_sheet(path: &Path) -> Result<Grid> {
    let content = fs::read_to_string(path)?;
    parse_sheet_content(&content)
}

/// Parse worksheet content from a string.
///
/// Each line is `<REF> <raw>`: the reference ends at the first space and the
/// raw content runs verbatim to the end of the line.
pub fn parse_sheet_content(content: &str) -> Result<Grid> {
    let grid = new_grid();

    for (line_num, line) in content.lines().enumerate() {
        // Skip empty lines and comments
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((cell_ref_str, raw)) = line.split_once(' ') else {
            return Err(SheetError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF CONTENT' format".to_string(),
            });
        };

        let coord = Coord::parse_a1(cell_ref_str).ok_or_else(|| SheetError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        if raw.is_empty() {
            grid.remove(&coord);
        } else {
            grid.insert(coord, raw.to_string());
        }
    }

    Ok(grid)
}
