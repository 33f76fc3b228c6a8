use crate::error::Result;
use sexpsheet_engine::engine::{EvalLimits, Grid, new_grid};
use std::path::PathBuf;

/// A sparse worksheet of raw cell contents.
///
/// Values are never cached: every read re-evaluates from the raw text.
pub struct Worksheet {
    /// Raw cell contents (shared grid, clones are cheap)
    pub grid: Grid,
    /// Resource caps applied to every evaluation
    pub limits: EvalLimits,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified since the last load or save
    pub modified: bool,
}

impl Worksheet {
    /// Create an empty worksheet.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_limits(EvalLimits::default())
    }

    pub fn with_limits(limits: EvalLimits) -> Self {
        Worksheet {
            grid: new_grid(),
            limits,
            file_path: None,
            modified: false,
        }
    }

    /// Create a worksheet and load a file if provided.
    ///
    /// A path that does not exist yet becomes the save target of an empty
    /// worksheet.
    pub fn with_file(path: Option<PathBuf>, limits: EvalLimits) -> Result<Self> {
        let mut sheet = Self::with_limits(limits);
        if let Some(p) = path {
            if p.exists() {
                sheet.load_file(&p)?;
            } else {
                sheet.file_path = Some(p);
            }
        }
        Ok(sheet)
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Self::new()
    }
}
