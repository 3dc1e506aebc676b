//! # confgrep
//!
//! Grep a corpus of security-conference papers by keyword or regular
//! expression and print the matches highlighted, newest and most
//! prestigious venues first.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Paper, KeywordQuery, RegexpQuery, etc.)
//! - [`storage`]: Corpus access returning coarse candidate sets
//! - [`search`]: Stemming normalizer, precise filters and the search pipeline
//! - [`ranking`]: Conference ranking table and deterministic ordering
//! - [`highlight`]: Styled match spans and their terminal encoding
//! - [`render`]: Line-oriented result rendering
//! - [`config`]: Configuration management
//! - [`ui`]: Colored status messages

pub mod config;
pub mod highlight;
pub mod models;
pub mod ranking;
pub mod render;
pub mod search;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use models::{KeywordQuery, Paper, Query, RegexpQuery};
pub use ranking::ConferenceTable;
pub use search::{Normalizer, SearchError, Searcher};
pub use storage::{JsonlStore, PaperStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
