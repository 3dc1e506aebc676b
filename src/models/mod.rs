//! Core data models for papers and queries.

mod paper;
mod query;

pub use paper::{Paper, PaperBuilder};
pub use query::{KeywordQuery, MatchSpan, Query, RegexpQuery};
