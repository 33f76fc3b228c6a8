//! Reference classification for formula symbols.
//!
//! A symbol can name:
//! - a single cell: `A1`, `AA10`
//! - a block: `A1:C3` (corners in any order)
//! - whole columns: `A:C` (rows 1 through the last populated row)
//!
//! Anything else is not a reference.

use super::cell::CellSource;
use super::coord::Coord;

/// What a symbol refers to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reference {
    Cell(Coord),
    Block(Block),
    /// Columns `first..=last`, not yet bounded by the worksheet.
    Columns { first: usize, last: usize },
}

impl Reference {
    /// Classify a symbol. Order matters: block, then column, then single.
    pub fn classify(symbol: &str) -> Option<Reference> {
        if let Some(block) = Block::parse(symbol) {
            return Some(Reference::Block(block));
        }
        if let Some((first, last)) = parse_columns(symbol) {
            return Some(Reference::Columns { first, last });
        }
        Coord::parse_a1(symbol).map(Reference::Cell)
    }

    /// Resolve column references against the worksheet's current extent.
    /// Returns None for single cells.
    pub fn to_block<S: CellSource + ?Sized>(&self, sheet: &S) -> Option<Block> {
        match self {
            Reference::Cell(_) => None,
            Reference::Block(block) => Some(*block),
            Reference::Columns { first, last } => Some(Block {
                min_col: *first,
                max_col: *last,
                min_row: 1,
                max_row: sheet.max_row_in_columns(*first, *last),
            }),
        }
    }
}

/// A rectangle of cells with sorted bounds. `max_row` may be 0 for a column
/// range with no populated rows, which makes the block empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub min_col: usize,
    pub max_col: usize,
    pub min_row: usize,
    pub max_row: usize,
}

impl Block {
    /// Build a block from two corners, sorting each axis independently.
    pub fn from_corners(a: Coord, b: Coord) -> Block {
        Block {
            min_col: a.col.min(b.col),
            max_col: a.col.max(b.col),
            min_row: a.row.min(b.row),
            max_row: a.row.max(b.row),
        }
    }

    /// Parse `<ref>:<ref>` where both sides are single-cell references.
    pub fn parse(symbol: &str) -> Option<Block> {
        let (start, end) = split_pair(symbol)?;
        let start = Coord::parse_a1(start)?;
        let end = Coord::parse_a1(end)?;
        Some(Block::from_corners(start, end))
    }

    /// Number of cells covered, or None on overflow.
    pub fn cell_count(&self) -> Option<usize> {
        if self.max_row < self.min_row {
            return Some(0);
        }
        let rows = self.max_row - self.min_row + 1;
        let cols = self.max_col - self.min_col + 1;
        rows.checked_mul(cols)
    }

    /// Cells in row-major order: columns advance fastest, starting at the
    /// top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.min_row..=self.max_row).flat_map(move |row| {
            (self.min_col..=self.max_col).map(move |col| Coord { row, col })
        })
    }
}

fn parse_columns(symbol: &str) -> Option<(usize, usize)> {
    let (first, last) = split_pair(symbol)?;
    if !Coord::is_column_name(first) || !Coord::is_column_name(last) {
        return None;
    }
    let first = Coord::col_name_to_index(first)?;
    let last = Coord::col_name_to_index(last)?;
    Some((first.min(last), first.max(last)))
}

/// Split on exactly one `:`.
fn split_pair(symbol: &str) -> Option<(&str, &str)> {
    let (left, right) = symbol.split_once(':')?;
    if right.contains(':') {
        return None;
    }
    Some((left, right))
}
