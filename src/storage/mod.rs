//! Paper corpus access.
//!
//! Stores answer coarse candidate queries: case-insensitive substring or
//! regexp containment over title and abstract. The results are a superset of
//! the real matches and get refined by the search filters.

mod jsonl;

pub use jsonl::JsonlStore;

use regex::Regex;
use std::path::PathBuf;

use crate::models::{Paper, Query};

/// Coarse predicate understood by the storage layer.
///
/// Terms are ANDed; a term is satisfied by the title, or by the abstract
/// when abstract inclusion is on. No terms selects every paper.
#[derive(Debug, Clone)]
pub enum CandidateFilter<'a> {
    Substrings {
        terms: Vec<String>,
        include_abstract: bool,
    },
    Patterns {
        patterns: &'a [Regex],
        include_abstract: bool,
    },
}

impl<'a> CandidateFilter<'a> {
    pub fn from_query(query: &'a Query) -> Self {
        match query {
            Query::Keyword(q) => CandidateFilter::Substrings {
                terms: q.terms().iter().map(|t| t.to_lowercase()).collect(),
                include_abstract: q.include_abstract(),
            },
            Query::Regexp(q) => CandidateFilter::Patterns {
                patterns: q.groups(),
                include_abstract: q.include_abstract(),
            },
        }
    }

    pub fn matches(&self, paper: &Paper) -> bool {
        match self {
            CandidateFilter::Substrings {
                terms,
                include_abstract,
            } => {
                let title = paper.title.to_lowercase();
                let abstract_text = if *include_abstract {
                    paper.r#abstract.to_lowercase()
                } else {
                    String::new()
                };
                terms.iter().all(|t| {
                    title.contains(t.as_str())
                        || (*include_abstract && abstract_text.contains(t.as_str()))
                })
            }
            CandidateFilter::Patterns {
                patterns,
                include_abstract,
            } => patterns.iter().all(|re| {
                re.is_match(&paper.title) || (*include_abstract && re.is_match(&paper.r#abstract))
            }),
        }
    }
}

/// A source of papers
pub trait PaperStore {
    /// Every paper in the store
    fn all(&self) -> Result<Vec<Paper>, StorageError>;

    /// Papers satisfying the coarse filter
    fn fetch_candidates(&self, filter: &CandidateFilter<'_>) -> Result<Vec<Paper>, StorageError>;

    /// Papers whose abstract is empty
    fn missing_abstract(&self) -> Result<Vec<Paper>, StorageError>;
}

/// Errors that can occur when reading the corpus
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The corpus file does not exist
    #[error("Paper corpus not found at {}; build the corpus first", .0.display())]
    NotFound(PathBuf),

    /// A corpus line is not a valid paper record
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
