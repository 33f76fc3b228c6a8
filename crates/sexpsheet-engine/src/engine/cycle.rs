//! Circular reference detection.
//!
//! Before a formula follows a reference, we walk the referenced cell's
//! formula (and everything it references) with depth-first search. The path
//! of cells currently being walked lives on an explicit stack: a cell is
//! pushed before its formula is walked and popped afterwards, so sibling
//! arguments and sibling cells of a block never see each other's visits.
//!
//! Only formulas that parse are walked. A cell holding a value literal or a
//! syntax error is a leaf: evaluation stops at it, so it cannot close a cycle.
//!
//! Nested lists and reference hops share one depth budget (`max_depth`), so a
//! long chain of deeply nested formulas is reported as `TooDeep` instead of
//! exhausting the stack.

use tracing::trace;

use super::cell::CellSource;
use super::coord::Coord;
use super::eval::EvalLimits;
use super::parser::parse;
use super::refs::Reference;
use super::sexp::Sexp;

/// Outcome of a cycle check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleCheck {
    Acyclic,
    Cyclic,
    /// The reference chain is longer than the configured limit.
    TooDeep,
}

/// Check whether following `start` would lead back to a cell already on the
/// resolution path. A fresh path is used for every call.
pub fn detect_cycle<S: CellSource + ?Sized>(
    start: &Coord,
    sheet: &S,
    limits: &EvalLimits,
) -> CycleCheck {
    let mut detector = CycleDetector {
        sheet,
        limits,
        path: Vec::new(),
        depth: 0,
    };
    let result = detector.visit_cell(start);
    trace!(cell = %start, ?result, "cycle check");
    result
}

struct CycleDetector<'a, S: ?Sized> {
    sheet: &'a S,
    limits: &'a EvalLimits,
    path: Vec<Coord>,
    /// Lists entered plus cells pushed on the path.
    depth: usize,
}

impl<S: CellSource + ?Sized> CycleDetector<'_, S> {
    fn visit_cell(&mut self, cell: &Coord) -> CycleCheck {
        if self.path.contains(cell) {
            return CycleCheck::Cyclic;
        }
        if self.depth >= self.limits.max_depth {
            return CycleCheck::TooDeep;
        }

        let Some(formula) = self.sheet.raw(cell).and_then(|raw| parse_formula(&raw)) else {
            return CycleCheck::Acyclic;
        };

        self.path.push(*cell);
        self.depth += 1;
        let result = self.visit(&formula);
        self.depth -= 1;
        self.path.pop();
        result
    }

    fn visit(&mut self, sexp: &Sexp) -> CycleCheck {
        match sexp {
            Sexp::Number(_) | Sexp::Boolean(_) | Sexp::String(_) => CycleCheck::Acyclic,
            Sexp::List(items) => {
                if self.depth >= self.limits.max_depth {
                    return CycleCheck::TooDeep;
                }
                self.depth += 1;
                let result = items
                    .iter()
                    .map(|item| self.visit(item))
                    .find(|result| *result != CycleCheck::Acyclic)
                    .unwrap_or(CycleCheck::Acyclic);
                self.depth -= 1;
                result
            }
            Sexp::Symbol(symbol) => match Reference::classify(symbol) {
                None => CycleCheck::Acyclic,
                Some(Reference::Cell(cell)) => self.visit_cell(&cell),
                Some(reference) => {
                    let Some(block) = reference.to_block(self.sheet) else {
                        return CycleCheck::Acyclic;
                    };
                    match block.cell_count() {
                        Some(count) if count <= self.limits.max_block_cells => {}
                        _ => return CycleCheck::Acyclic,
                    }
                    for cell in block.cells() {
                        let result = self.visit_cell(&cell);
                        if result != CycleCheck::Acyclic {
                            return result;
                        }
                    }
                    CycleCheck::Acyclic
                }
            },
        }
    }
}

/// Parse raw content as a formula. Value literals and unparsable formulas
/// yield None.
fn parse_formula(raw: &str) -> Option<Sexp> {
    let body = raw.strip_prefix('=')?;
    parse(body).ok()
}
