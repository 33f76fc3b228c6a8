//! Command-line errors for the sexpsheet binary

use thiserror::Error;

/// Problems with the command line itself, reported before any file is read.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0} requires {1}")]
    MissingValue(&'static str, &'static str),

    #[error("Unexpected argument: {0}")]
    UnknownArgument(String),

    #[error("No input file given (use -in <FILE>)")]
    MissingInput,

    #[error("No command given (use -eval, -save or -dump)")]
    MissingCommand,

    #[error("Only one of -eval, -save and -dump may be given")]
    ConflictingCommands,

    #[error("Invalid cell reference: {0}")]
    InvalidCell(String),
}
