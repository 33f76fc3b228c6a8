use super::Worksheet;
use crate::error::Result;
use sexpsheet_engine::engine::{
    CellSource, Coord, CycleCheck, Evaluator, detect_cycle, is_error, parse,
};
use tracing::debug;

impl Worksheet {
    /// Store raw content at `(col, row)`. `None` or an empty string clears the
    /// cell; anything else is stored verbatim without validation.
    pub fn set(&mut self, col: usize, row: usize, raw: Option<&str>) -> Result<()> {
        let coord = Coord::new(col, row)?;
        self.set_cell(coord, raw);
        Ok(())
    }

    /// Like [`Worksheet::set`], for an already valid coordinate.
    pub fn set_cell(&mut self, coord: Coord, raw: Option<&str>) {
        match raw.filter(|raw| !raw.is_empty()) {
            Some(raw) => {
                debug!(cell = %coord, "set");
                self.grid.insert(coord, raw.to_string());
            }
            None => {
                debug!(cell = %coord, "clear");
                self.grid.remove(&coord);
            }
        }
        self.modified = true;
    }

    pub fn clear(&mut self, col: usize, row: usize) -> Result<()> {
        self.set(col, row, None)
    }

    /// Raw content exactly as stored, or None for a blank cell.
    pub fn get_raw(&self, col: usize, row: usize) -> Result<Option<String>> {
        let coord = Coord::new(col, row)?;
        Ok(self.grid.raw(&coord))
    }

    /// Display string of the cell at `(col, row)`; blank cells are "".
    pub fn get_eval(&self, col: usize, row: usize) -> Result<String> {
        let coord = Coord::new(col, row)?;
        Ok(self.eval_cell(&coord))
    }

    pub fn eval_cell(&self, coord: &Coord) -> String {
        Evaluator::with_limits(&self.grid, self.limits.clone()).evaluate_cell(coord)
    }

    /// Largest populated row (0 for an empty worksheet).
    pub fn max_rows(&self) -> usize {
        self.grid.iter().map(|entry| entry.key().row).max().unwrap_or(0)
    }

    /// Largest populated column (0 for an empty worksheet).
    pub fn max_columns(&self) -> usize {
        self.grid.iter().map(|entry| entry.key().col).max().unwrap_or(0)
    }

    /// Populated coordinates, row-major.
    pub fn active_cells(&self) -> Vec<Coord> {
        let mut cells: Vec<Coord> = self.grid.iter().map(|entry| *entry.key()).collect();
        cells.sort();
        cells
    }

    /// Every populated cell with its display string, row-major.
    pub fn evaluate_all(&self) -> Vec<(Coord, String)> {
        let evaluator = Evaluator::with_limits(&self.grid, self.limits.clone());
        self.active_cells()
            .into_iter()
            .map(|coord| {
                let value = evaluator.evaluate_cell(&coord);
                (coord, value)
            })
            .collect()
    }

    /// Populated cells whose display string is an error, row-major.
    pub fn errors(&self) -> Vec<(Coord, String)> {
        self.evaluate_all()
            .into_iter()
            .filter(|(_, value)| is_error(value))
            .collect()
    }

    /// Whether every cell's content parses (formula body or value literal) and
    /// no populated cell is part of a cycle.
    pub fn is_valid(&self) -> bool {
        self.active_cells().iter().all(|coord| {
            let parses = match self.grid.raw(coord) {
                Some(raw) => parse(raw.strip_prefix('=').unwrap_or(raw.as_str())).is_ok(),
                None => true,
            };
            parses && detect_cycle(coord, &self.grid, &self.limits) == CycleCheck::Acyclic
        })
    }
}
