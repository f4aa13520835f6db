//! File-based expectation repository.
//!
//! Expectations live as `<name>.json` directly under one directory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use trackprobe_application::ports::{ExpectationError, ExpectationStore};
use trackprobe_domain::ExpectationDocument;

/// Loads expectation documents from a directory.
#[derive(Debug, Clone)]
pub struct FileExpectationStore {
    root: PathBuf,
}

impl FileExpectationStore {
    /// Creates a store reading from `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the store reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a logical name to its file path.
    ///
    /// # Errors
    /// Returns `ExpectationError::InvalidName` for empty names and names that
    /// would escape the root directory.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, ExpectationError> {
        let invalid = name.is_empty()
            || name.contains(['/', '\\'])
            || name.contains("..")
            || name.starts_with('.');
        if invalid {
            return Err(ExpectationError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(format!("{name}.json")))
    }
}

impl ExpectationStore for FileExpectationStore {
    fn load(&self, name: &str) -> Result<ExpectationDocument, ExpectationError> {
        let path = self.path_for(name)?;
        tracing::debug!("Reading input data from {}", path.display());

        let contents = std::fs::read(&path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ExpectationError::NotFound(path.clone())
            } else {
                ExpectationError::Io(e)
            }
        })?;

        let document: ExpectationDocument =
            serde_json::from_slice(&contents).map_err(|e| ExpectationError::Parse {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        tracing::debug!(?document, "Content data");
        Ok(document)
    }
}
