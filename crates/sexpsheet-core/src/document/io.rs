use super::Worksheet;
use crate::error::{Result, SheetError};
use crate::storage::{parse_sheet, write_sheet};
use std::path::{Path, PathBuf};
use tracing::debug;

impl Worksheet {
    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(SheetError::NoFilePath);
        };

        write_sheet(path, &self.grid)?;
        debug!(path = %path.display(), cells = self.grid.len(), "saved worksheet");
        self.modified = false;
        Ok(path.clone())
    }

    /// Save to `path` and make it the current file path.
    pub fn save_as(&mut self, path: &Path) -> Result<PathBuf> {
        write_sheet(path, &self.grid)?;
        debug!(path = %path.display(), cells = self.grid.len(), "saved worksheet");
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(path.to_path_buf())
    }

    /// Load from file, replacing the current contents.
    ///
    /// The file is parsed completely before anything is replaced, so a parse
    /// error leaves the worksheet untouched.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let grid = parse_sheet(path)?;
        debug!(path = %path.display(), cells = grid.len(), "loaded worksheet");

        self.grid = grid;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}
