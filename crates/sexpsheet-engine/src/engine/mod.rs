//! Spreadsheet formula engine API.
//!
//! This module provides the computation engine for the spreadsheet:
//!
//! - [`Coord`], [`Grid`], [`CellSource`] - Coordinates and cell storage
//! - [`parse`], [`Sexp`] - S-expression parsing
//! - [`Reference`], [`Block`] - Classifying symbols as cell/block/column references
//! - [`detect_cycle`] - Circular reference detection
//! - [`Evaluator`] - Evaluate raw cell content to a display string
//! - [`Function`] - SUM, PRODUCT, < and ENUM
//! - [`ErrorReason`] - The `!#ERROR_<REASON>` values cells evaluate to

mod cell;
mod coord;
mod cycle;
mod error;
mod eval;
mod functions;
mod parser;
mod refs;
mod sexp;

pub use cell::{CellSource, Grid, new_grid};
pub use coord::Coord;
pub use cycle::{CycleCheck, detect_cycle};
pub use error::{ERROR_PREFIX, EngineError, ErrorReason, SyntaxError, is_error};
pub use eval::{EvalLimits, EvalResult, Evaluator};
pub use functions::{Arg, ENUM_BLANK, Enumerate, Fold, Function, Product, Sum, less_than};
pub use parser::{MAX_NESTING_DEPTH, parse};
pub use refs::{Block, Reference};
pub use sexp::{Sexp, format_number, parse_number};
