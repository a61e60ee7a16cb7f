//! File-based status source.
//!
//! Reads status documents from a JSON file. This is the offline mode:
//! useful against a saved endpoint dump, and as the test path.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::StatusSource;
use crate::data::StatusDocument;

/// A status source that reads a status document from a JSON file.
///
/// The file is re-read on every fetch, mirroring the GET-per-cycle model
/// of the HTTP source.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StatusSource for FileSource {
    async fn fetch(&self) -> Result<StatusDocument> {
        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading {}", self.path.display()))?;

        let document = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", self.path.display()))?;

        Ok(document)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
