//! sexpsheet-core - Worksheet model + text storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::Worksheet;
pub use error::{Result, SheetError};

pub use sexpsheet_engine::engine::{Coord, EvalLimits};
