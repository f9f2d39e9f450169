use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConvertError;

/// Destination for rendered pages. Paths are relative to the output root,
/// e.g. `Notes.md` or `daily/2024-01-05.md`.
pub trait PageWriter {
    fn write_page(&mut self, path: &Path, contents: &str) -> Result<(), ConvertError>;
}

/// Writes pages below a directory on disk, creating subdirectories as needed.
#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    root: PathBuf,
}

impl DirectoryWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryWriter { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PageWriter for DirectoryWriter {
    fn write_page(&mut self, path: &Path, contents: &str) -> Result<(), ConvertError> {
        let dest = self.root.join(path);
        if let Some(dir) = dest.parent() {
            fs::create_dir_all(dir).map_err(|source| ConvertError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, contents).map_err(|source| ConvertError::Write { path: dest, source })
    }
}

/// Keeps pages in memory, keyed by relative path.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub pages: BTreeMap<PathBuf, String>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.pages.get(path.as_ref()).map(String::as_str)
    }
}

impl PageWriter for MemoryWriter {
    fn write_page(&mut self, path: &Path, contents: &str) -> Result<(), ConvertError> {
        self.pages.insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}
