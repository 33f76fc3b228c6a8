//! Worksheet storage as seen by the engine.
//!
//! - [`Grid`] - sparse raw-content storage (backed by `DashMap`)
//! - [`CellSource`] - the read-only view the evaluator and cycle detector use

use dashmap::DashMap;
use std::sync::Arc;

use super::coord::Coord;

/// Sparse map from coordinate to raw cell text. Missing entries are blank.
/// DashMap is internally Arc-based, clones are cheap.
pub type Grid = Arc<DashMap<Coord, String>>;

/// Create an empty grid.
pub fn new_grid() -> Grid {
    Arc::new(DashMap::new())
}

/// Read access to raw cell contents.
pub trait CellSource {
    /// The raw text stored at `coord`, or None for a blank cell.
    fn raw(&self, coord: &Coord) -> Option<String>;

    /// Largest populated row among columns `first_col..=last_col` (0 if none).
    fn max_row_in_columns(&self, first_col: usize, last_col: usize) -> usize;
}

impl CellSource for DashMap<Coord, String> {
    fn raw(&self, coord: &Coord) -> Option<String> {
        self.get(coord)
            .map(|entry| entry.value().clone())
            .filter(|raw| !raw.is_empty())
    }

    fn max_row_in_columns(&self, first_col: usize, last_col: usize) -> usize {
        self.iter()
            .filter(|entry| (first_col..=last_col).contains(&entry.key().col))
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| entry.key().row)
            .max()
            .unwrap_or(0)
    }
}

impl<T: CellSource + ?Sized> CellSource for Arc<T> {
    fn raw(&self, coord: &Coord) -> Option<String> {
        (**self).raw(coord)
    }

    fn max_row_in_columns(&self, first_col: usize, last_col: usize) -> usize {
        (**self).max_row_in_columns(first_col, last_col)
    }
}

impl CellSource for std::collections::HashMap<Coord, String> {
    fn raw(&self, coord: &Coord) -> Option<String> {
        self.get(coord).filter(|raw| !raw.is_empty()).cloned()
    }

    fn max_row_in_columns(&self, first_col: usize, last_col: usize) -> usize {
        self.iter()
            .filter(|(coord, raw)| (first_col..=last_col).contains(&coord.col) && !raw.is_empty())
            .map(|(coord, _)| coord.row)
            .max()
            .unwrap_or(0)
    }
}
