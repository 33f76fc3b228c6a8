//! Error types for the formula engine.
//!
//! Two layers:
//!
//! - [`ErrorReason`] - cell-level evaluation failures. These are values, not
//!   failures of the engine: they render as `!#ERROR_<REASON>` and flow through
//!   other formulas like any other result.
//! - [`EngineError`] / [`SyntaxError`] - typed errors for callers that hand the
//!   engine invalid coordinates or want parse diagnostics.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Prefix shared by every tagged error string.
pub const ERROR_PREFIX: &str = "!#ERROR";

/// Why a cell failed to evaluate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorReason {
    Syntax,
    InvalidSymbol,
    InvalidCommand,
    CyclicRef,
    ArgIsError,
    ArgType,
    Arity,
    InvalidBlockCellRef,
    InvalidBlankCellRef,
    /// Reference chain deeper than the configured limit.
    Depth,
    /// Block or column reference covering more cells than the configured limit.
    RangeTooLarge,
}

impl ErrorReason {
    pub const ALL: [ErrorReason; 11] = [
        ErrorReason::Syntax,
        ErrorReason::InvalidSymbol,
        ErrorReason::InvalidCommand,
        ErrorReason::CyclicRef,
        ErrorReason::ArgIsError,
        ErrorReason::ArgType,
        ErrorReason::Arity,
        ErrorReason::InvalidBlockCellRef,
        ErrorReason::InvalidBlankCellRef,
        ErrorReason::Depth,
        ErrorReason::RangeTooLarge,
    ];

    /// The uppercase reason tag that follows `!#ERROR_`.
    pub fn tag(self) -> &'static str {
        match self {
            ErrorReason::Syntax => "SYNTAX",
            ErrorReason::InvalidSymbol => "INVALIDSYMBOL",
            ErrorReason::InvalidCommand => "INVALIDCOMMAND",
            ErrorReason::CyclicRef => "CYCLICREF",
            ErrorReason::ArgIsError => "ARGISERROR",
            ErrorReason::ArgType => "ARGTYPE",
            ErrorReason::Arity => "ARITY",
            ErrorReason::InvalidBlockCellRef => "INVALIDBLOCKCELLREF",
            ErrorReason::InvalidBlankCellRef => "INVALIDBLANKCELLREF",
            ErrorReason::Depth => "DEPTH",
            ErrorReason::RangeTooLarge => "RANGETOOLARGE",
        }
    }

    /// How this error looks once it has passed through a function argument.
    ///
    /// Most reasons collapse into `ARGISERROR`; the ones that say something
    /// more specific than "an argument failed" keep their tag.
    pub fn as_argument_error(self) -> ErrorReason {
        match self {
            ErrorReason::ArgType
            | ErrorReason::CyclicRef
            | ErrorReason::Depth
            | ErrorReason::RangeTooLarge => self,
            _ => ErrorReason::ArgIsError,
        }
    }
}

impl fmt::Display for ErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", ERROR_PREFIX, self.tag())
    }
}

impl FromStr for ErrorReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s
            .strip_prefix(ERROR_PREFIX)
            .and_then(|rest| rest.strip_prefix('_'))
            .ok_or_else(|| format!("Not an error string: {}", s))?;
        ErrorReason::ALL
            .into_iter()
            .find(|reason| reason.tag() == tag)
            .ok_or_else(|| format!("Unknown error reason: {}", tag))
    }
}

/// Whether a display string is a tagged error.
///
/// Detection is a split on `_`: the first segment must be exactly `!#ERROR`.
/// Unknown reason tags still count as errors.
pub fn is_error(display: &str) -> bool {
    display.split('_').next() == Some(ERROR_PREFIX)
}

/// Errors raised for invalid input to the engine API (as opposed to invalid
/// cell contents, which evaluate to an [`ErrorReason`]).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid coordinate ({col}, {row}): coordinates must be strictly positive")]
    InvalidCoordinate { col: usize, row: usize },

    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),
}

/// A parse failure with the byte offset where it was detected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Syntax error at byte {pos}: {message}")]
pub struct SyntaxError {
    pub pos: usize,
    pub message: String,
}

impl SyntaxError {
    pub(crate) fn at(pos: usize, message: impl Into<String>) -> Self {
        SyntaxError {
            pos,
            message: message.into(),
        }
    }
}

impl From<SyntaxError> for ErrorReason {
    fn from(_: SyntaxError) -> Self {
        ErrorReason::Syntax
    }
}
