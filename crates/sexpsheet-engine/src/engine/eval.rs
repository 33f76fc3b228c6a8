//! Formula evaluation.
//!
//! [`Evaluator`] turns raw cell content into a display string. Raw content is
//! either a value literal (`4`, `true`, `"bees"`) or a formula (`=` followed by
//! an S-expression). Formulas may reference other cells, which are evaluated
//! on demand from the worksheet; nothing is cached between calls.
//!
//! Failures never escape as panics. Internally they travel as
//! `Err(ErrorReason)` and are rendered as `!#ERROR_<REASON>` at the boundary.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::cell::CellSource;
use super::coord::Coord;
use super::cycle::{CycleCheck, detect_cycle};
use super::error::ErrorReason;
use super::functions::{Arg, Enumerate, Fold, Function, Product, Sum, less_than};
use super::parser::parse;
use super::refs::Reference;
use super::sexp::{Sexp, format_number};

pub type EvalResult<T> = Result<T, ErrorReason>;

/// Resource caps for a single evaluation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalLimits {
    /// Deepest combined nesting of formula lists and reference hops that
    /// evaluation and cycle detection will walk.
    pub max_depth: usize,
    /// Largest block or column range a function will expand.
    pub max_block_cells: usize,
}

impl Default for EvalLimits {
    fn default() -> Self {
        EvalLimits {
            max_depth: 256,
            max_block_cells: 1_000_000,
        }
    }
}

/// Whether block references expand in the current argument position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Blocks {
    Expand,
    Reject,
}

/// Raw cell content after the `=` split.
enum Content {
    /// A resting value: Number, Boolean or String.
    Value(Sexp),
    Formula(Sexp),
}

/// Evaluates cell contents against a worksheet.
pub struct Evaluator<'a, S: ?Sized> {
    sheet: &'a S,
    limits: EvalLimits,
}

impl<'a, S: CellSource + ?Sized> Evaluator<'a, S> {
    pub fn new(sheet: &'a S) -> Self {
        Self::with_limits(sheet, EvalLimits::default())
    }

    pub fn with_limits(sheet: &'a S, limits: EvalLimits) -> Self {
        Evaluator { sheet, limits }
    }

    /// Evaluate raw content (None for a blank cell) to its display string.
    pub fn evaluate(&self, raw: Option<&str>) -> String {
        self.eval_raw(raw, 0).unwrap_or_else(|reason| reason.to_string())
    }

    /// Evaluate the cell at `coord`.
    pub fn evaluate_cell(&self, coord: &Coord) -> String {
        self.evaluate(self.sheet.raw(coord).as_deref())
    }

    /// Evaluate an already-parsed formula.
    pub fn evaluate_sexp(&self, sexp: &Sexp) -> String {
        self.eval_sexp(sexp, 0).unwrap_or_else(|reason| reason.to_string())
    }

    fn eval_raw(&self, raw: Option<&str>, depth: usize) -> EvalResult<String> {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            return Ok(String::new());
        };
        match read_content(raw)? {
            Content::Value(sexp) | Content::Formula(sexp) => self.eval_sexp(&sexp, depth),
        }
    }

    fn eval_sexp(&self, sexp: &Sexp, depth: usize) -> EvalResult<String> {
        match sexp {
            Sexp::Number(n) => Ok(format_number(*n)),
            Sexp::Boolean(b) => Ok(b.to_string()),
            Sexp::String(s) => Ok(format!("\"{}\"", s)),
            Sexp::Symbol(symbol) => match Reference::classify(symbol) {
                Some(Reference::Cell(cell)) => {
                    let depth = self.descend(depth)?;
                    let raw = self.follow(&cell)?;
                    self.eval_raw(raw.as_deref(), depth)
                }
                Some(Reference::Block(_) | Reference::Columns { .. }) => {
                    Err(ErrorReason::InvalidBlockCellRef)
                }
                None => Err(ErrorReason::InvalidSymbol),
            },
            Sexp::List(items) => {
                let Some((head, args)) = items.split_first() else {
                    return Err(ErrorReason::Syntax);
                };
                let function = match head {
                    Sexp::Symbol(name) => Function::lookup(name),
                    _ => None,
                };
                match function {
                    Some(function) => self.call(function, args, self.descend(depth)?),
                    None => Err(ErrorReason::InvalidCommand),
                }
            }
        }
    }

    fn call(&self, function: Function, args: &[Sexp], depth: usize) -> EvalResult<String> {
        debug!(%function, arity = args.len(), depth, "call");
        match function {
            Function::LessThan => {
                let [lhs, rhs] = args else {
                    return Err(ErrorReason::Arity);
                };
                less_than(self.scalar(lhs, depth), self.scalar(rhs, depth))
            }
            Function::Sum => Ok(Sum.apply(self.flatten(args, depth)?)),
            Function::Product => Ok(Product.apply(self.flatten(args, depth)?)),
            Function::Enum => Ok(Enumerate.apply(self.flatten(args, depth)?)),
        }
    }

    /// Resolve every argument, expanding block references, stopping at the
    /// first failure.
    fn flatten(&self, args: &[Sexp], depth: usize) -> EvalResult<Vec<Arg>> {
        let mut out = Vec::with_capacity(args.len());
        for arg in args {
            self.gather(arg, Blocks::Expand, &mut out, depth)
                .map_err(ErrorReason::as_argument_error)?;
        }
        Ok(out)
    }

    /// Resolve an argument that must be a single value.
    fn scalar(&self, arg: &Sexp, depth: usize) -> EvalResult<Arg> {
        let mut out = Vec::with_capacity(1);
        self.gather(arg, Blocks::Reject, &mut out, depth)?;
        Ok(out.pop().unwrap_or(Arg::Blank))
    }

    /// Resolve one argument expression inside a function call.
    ///
    /// Nested lists are evaluated on their own and contribute their display
    /// string. References are followed inside the function's context, so the
    /// function decides what blanks and non-numbers mean.
    fn gather(&self, arg: &Sexp, blocks: Blocks, out: &mut Vec<Arg>, depth: usize) -> EvalResult<()> {
        match arg {
            Sexp::Number(n) => out.push(Arg::Number(*n)),
            Sexp::Boolean(b) => out.push(Arg::Boolean(*b)),
            Sexp::String(s) => out.push(Arg::Text(s.clone())),
            Sexp::List(_) => out.push(Arg::Computed(self.eval_sexp(arg, depth)?)),
            Sexp::Symbol(symbol) => match Reference::classify(symbol) {
                Some(Reference::Cell(cell)) => {
                    let depth = self.descend(depth)?;
                    let raw = self.follow(&cell)?;
                    self.gather_raw(raw.as_deref(), blocks, out, depth)?;
                }
                Some(reference) => {
                    if blocks == Blocks::Reject {
                        return Err(ErrorReason::InvalidBlockCellRef);
                    }
                    let Some(block) = reference.to_block(self.sheet) else {
                        return Err(ErrorReason::InvalidBlockCellRef);
                    };
                    match block.cell_count() {
                        Some(count) if count <= self.limits.max_block_cells => {}
                        _ => return Err(ErrorReason::RangeTooLarge),
                    }
                    let depth = self.descend(depth)?;
                    for cell in block.cells() {
                        let raw = self.follow(&cell)?;
                        self.gather_raw(raw.as_deref(), blocks, out, depth)?;
                    }
                }
                None => return Err(ErrorReason::InvalidSymbol),
            },
        }
        Ok(())
    }

    /// Resolve a referenced cell's raw content inside a function call.
    fn gather_raw(
        &self,
        raw: Option<&str>,
        blocks: Blocks,
        out: &mut Vec<Arg>,
        depth: usize,
    ) -> EvalResult<()> {
        let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
            out.push(Arg::Blank);
            return Ok(());
        };
        if is_list_formula(raw) {
            out.push(Arg::Computed(self.eval_raw(Some(raw), depth)?));
            return Ok(());
        }
        match read_content(raw)? {
            Content::Value(sexp) | Content::Formula(sexp) => self.gather(&sexp, blocks, out, depth),
        }
    }

    /// One more level of list nesting or reference hopping.
    ///
    /// Both count against `max_depth`, so the evaluator's recursion stays
    /// bounded however lists and references are mixed.
    fn descend(&self, depth: usize) -> EvalResult<usize> {
        if depth >= self.limits.max_depth {
            debug!(max_depth = self.limits.max_depth, "evaluation too deep");
            return Err(ErrorReason::Depth);
        }
        Ok(depth + 1)
    }

    /// Check a reference for cycles, then fetch its raw content.
    fn follow(&self, cell: &Coord) -> EvalResult<Option<String>> {
        match detect_cycle(cell, self.sheet, &self.limits) {
            CycleCheck::Acyclic => Ok(self.sheet.raw(cell)),
            CycleCheck::Cyclic => {
                debug!(%cell, "cyclic reference");
                Err(ErrorReason::CyclicRef)
            }
            CycleCheck::TooDeep => {
                debug!(%cell, max_depth = self.limits.max_depth, "reference chain too deep");
                Err(ErrorReason::Depth)
            }
        }
    }
}

/// Split raw content into a value literal or a formula.
fn read_content(raw: &str) -> EvalResult<Content> {
    if let Some(body) = raw.strip_prefix('=') {
        return Ok(Content::Formula(parse(body)?));
    }
    if raw.starts_with('(') {
        return Err(ErrorReason::Syntax);
    }
    match parse(raw)? {
        Sexp::List(_) => Err(ErrorReason::Syntax),
        Sexp::Symbol(_) => Err(ErrorReason::InvalidSymbol),
        value => Ok(Content::Value(value)),
    }
}

/// Whether raw content is a formula whose body is a list, e.g. `= (SUM A1)`.
fn is_list_formula(raw: &str) -> bool {
    raw.strip_prefix('=')
        .is_some_and(|body| body.trim_start().starts_with('('))
}
