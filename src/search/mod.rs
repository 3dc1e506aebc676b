//! Search pipeline: coarse candidates, precise filtering, then ranking.
//!
//! - [`Normalizer`]: tokenizes and stems text
//! - [`fuzzy_match`]: AND keyword filter over stems
//! - [`regexp_match`]: AND regexp filter over raw text
//! - [`Searcher`]: runs the whole pipeline against a [`PaperStore`]

mod filter;
mod normalize;

pub use filter::{fuzzy_match, regexp_match};
pub use normalize::Normalizer;

use crate::models::{Paper, Query};
use crate::ranking::{rank, ConferenceTable};
use crate::storage::{CandidateFilter, PaperStore, StorageError};

/// Errors that can occur while searching
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// A supplied pattern failed to compile
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A paper's conference is missing from the ranking table
    #[error("Unknown conference '{conference}' for paper '{title}'")]
    UnknownConference { conference: String, title: String },

    /// No stemmer is available for the requested language
    #[error("Unsupported stemming language: {0}")]
    UnsupportedLanguage(String),

    /// Storage layer failure
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Runs queries against a paper store.
#[derive(Debug)]
pub struct Searcher {
    normalizer: Normalizer,
    table: ConferenceTable,
}

impl Searcher {
    pub fn new(normalizer: Normalizer, table: ConferenceTable) -> Self {
        Self { normalizer, table }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn table(&self) -> &ConferenceTable {
        &self.table
    }

    /// Fetch coarse candidates, refine them, and rank the survivors
    pub fn search<S>(&self, store: &S, query: &Query) -> Result<Vec<Paper>, SearchError>
    where
        S: PaperStore + ?Sized,
    {
        tracing::info!("Searching by {}", query.describe());

        let candidates = if query.is_empty() {
            store.all()?
        } else {
            store.fetch_candidates(&CandidateFilter::from_query(query))?
        };
        tracing::debug!("Storage returned {} candidates", candidates.len());

        let matched = self.filter(candidates, query);
        tracing::debug!("{} papers left after filtering", matched.len());

        rank(matched, &self.table)
    }

    /// Keep only the papers that really match the query
    pub fn filter(&self, papers: Vec<Paper>, query: &Query) -> Vec<Paper> {
        match query {
            Query::Keyword(q) => papers
                .into_iter()
                .filter(|p| fuzzy_match(p, q, &self.normalizer))
                .collect(),
            Query::Regexp(q) => papers
                .into_iter()
                .filter(|p| regexp_match(p, q))
                .collect(),
        }
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(Normalizer::new(), ConferenceTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{KeywordQuery, PaperBuilder, RegexpQuery};
    use crate::storage::JsonlStore;

    fn store() -> JsonlStore {
        JsonlStore::from_papers(vec![
            PaperBuilder::new("Exploit Y", 2019, "RAID").build(),
            PaperBuilder::new("Exploiting X", 2019, "CCS").build(),
            PaperBuilder::new("Kernel fuzzing", 2021, "NDSS").build(),
        ])
    }

    #[test]
    fn test_keyword_search_ranks_ccs_first() {
        let searcher = Searcher::default();
        let query = KeywordQuery::new(["exploit"], true).unwrap().into();
        let papers = searcher.search(&store(), &query).unwrap();

        let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Exploiting X", "Exploit Y"]);
    }

    #[test]
    fn test_regexp_search() {
        let searcher = Searcher::default();
        let query = RegexpQuery::new(["^Kernel"], false).unwrap().into();
        let papers = searcher.search(&store(), &query).unwrap();

        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].conference, "NDSS");
    }

    #[test]
    fn test_empty_query_returns_everything_ranked() {
        let searcher = Searcher::default();
        let query = KeywordQuery::new(Vec::<String>::new(), true).unwrap().into();
        let papers = searcher.search(&store(), &query).unwrap();

        assert_eq!(papers.len(), 3);
        assert_eq!(papers[0].year, 2021);
    }

    #[test]
    fn test_unknown_conference_propagates() {
        let store =
            JsonlStore::from_papers(vec![PaperBuilder::new("Exploit", 2020, "Nowhere").build()]);
        let searcher = Searcher::default();
        let query = KeywordQuery::new(["exploit"], true).unwrap().into();

        let err = searcher.search(&store, &query).unwrap_err();
        assert!(matches!(err, SearchError::UnknownConference { .. }));
    }

    #[test]
    fn test_no_match_is_not_an_error() {
        let searcher = Searcher::default();
        let query = KeywordQuery::new(["spectre"], true).unwrap().into();
        assert!(searcher.search(&store(), &query).unwrap().is_empty());
    }
}
