//! Newline-delimited JSON corpus, one paper per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::{CandidateFilter, PaperStore, StorageError};
use crate::models::Paper;

/// Paper corpus loaded from a `.jsonl` file
#[derive(Debug, Clone, Default)]
pub struct JsonlStore {
    /// Corpus file path, `None` for in-memory stores
    path: Option<PathBuf>,
    papers: Vec<Paper>,
}

impl JsonlStore {
    /// Load every paper from the corpus file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StorageError::NotFound(path.to_path_buf()));
        }

        let reader = BufReader::new(File::open(path)?);
        let mut papers = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let paper: Paper = serde_json::from_str(&line).map_err(|e| StorageError::Parse {
                line: idx + 1,
                message: e.to_string(),
            })?;
            papers.push(paper);
        }

        tracing::debug!("Loaded {} papers from {}", papers.len(), path.display());

        Ok(Self {
            path: Some(path.to_path_buf()),
            papers,
        })
    }

    /// In-memory store over the given papers
    pub fn from_papers(papers: Vec<Paper>) -> Self {
        Self { path: None, papers }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

impl PaperStore for JsonlStore {
    fn all(&self) -> Result<Vec<Paper>, StorageError> {
        Ok(self.papers.clone())
    }

    fn fetch_candidates(&self, filter: &CandidateFilter<'_>) -> Result<Vec<Paper>, StorageError> {
        Ok(self
            .papers
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    fn missing_abstract(&self) -> Result<Vec<Paper>, StorageError> {
        Ok(self
            .papers
            .iter()
            .filter(|p| p.r#abstract.is_empty())
            .cloned()
            .collect())
    }
}
