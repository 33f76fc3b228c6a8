//! Error types for sexpsheet core.

use thiserror::Error;

use sexpsheet_engine::engine::EngineError;

/// Errors from worksheet operations and storage.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    InvalidCoordinate(#[from] EngineError),

    #[error("No file path set")]
    NoFilePath,

    #[error("Cell {cell} contains a line break and cannot be saved")]
    MultilineContent { cell: String },
}

pub type Result<T> = std::result::Result<T, SheetError>;
