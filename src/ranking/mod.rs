//! Conference ranking table and result ordering.
//!
//! Papers are ordered by year (newest first), ties broken by the position of
//! their conference in the ranking table (later position wins).

use std::cmp::Ordering;

use crate::models::Paper;
use crate::search::SearchError;

/// Default ranking table, lowest prestige first
pub const CONFERENCES: [&str; 11] = [
    "RAID",
    "ESORICS",
    "ACSAC",
    "AsiaCCS",
    "PETS",
    "WWW",
    "IEEE EuroS&P",
    "NDSS",
    "IEEE S&P",
    "USENIX",
    "CCS",
];

/// Ordered list of known conferences; the index is the prestige tie-break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConferenceTable {
    names: Vec<String>,
}

impl ConferenceTable {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Zero-based prestige index of a conference
    pub fn index_of(&self, conference: &str) -> Option<usize> {
        self.names.iter().position(|n| n == conference)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Sort key for a paper, failing on an unknown conference
    pub fn key(&self, paper: &Paper) -> Result<RankKey, SearchError> {
        let prestige =
            self.index_of(&paper.conference)
                .ok_or_else(|| SearchError::UnknownConference {
                    conference: paper.conference.clone(),
                    title: paper.title.clone(),
                })?;

        Ok(RankKey {
            year: paper.year,
            prestige,
        })
    }
}

impl Default for ConferenceTable {
    fn default() -> Self {
        Self::new(CONFERENCES)
    }
}

/// Composite score: year first, prestige index second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RankKey {
    pub year: i32,
    pub prestige: usize,
}

/// Order papers by descending rank key.
///
/// Equal keys fall back to title, url and abstract so the result does not
/// depend on input order.
pub fn rank(papers: Vec<Paper>, table: &ConferenceTable) -> Result<Vec<Paper>, SearchError> {
    let mut keyed = papers
        .into_iter()
        .map(|p| table.key(&p).map(|k| (k, p)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|(ka, a), (kb, b)| kb.cmp(ka).then_with(|| tie_break(a, b)));

    Ok(keyed.into_iter().map(|(_, p)| p).collect())
}

fn tie_break(a: &Paper, b: &Paper) -> Ordering {
    a.title
        .cmp(&b.title)
        .then_with(|| a.url.cmp(&b.url))
        .then_with(|| a.r#abstract.cmp(&b.r#abstract))
}
