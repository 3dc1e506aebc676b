//! Query models for keyword and regexp searches.

use regex::{Regex, RegexBuilder};

use crate::search::SearchError;

/// A half-open byte range `[start, end)` of the original text matched by a query term.
///
/// Both ends always fall on UTF-8 character boundaries since they come from
/// regex matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
}

impl MatchSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// Keyword search: every term must occur (after stemming) in the paper.
///
/// Each term also carries a case-insensitive literal matcher used for
/// highlighting.
#[derive(Debug, Clone)]
pub struct KeywordQuery {
    terms: Vec<String>,
    matchers: Vec<Regex>,
    include_abstract: bool,
}

impl KeywordQuery {
    /// Build a keyword query. Terms are trimmed and empty terms dropped.
    pub fn new<I, S>(terms: I, include_abstract: bool) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        let matchers = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| SearchError::InvalidPattern {
                        pattern: term.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            terms,
            matchers,
            include_abstract,
        })
    }

    /// Parse a comma-separated keyword list, e.g. `"linux,kernel,exploit"`
    pub fn parse(csv: &str, include_abstract: bool) -> Result<Self, SearchError> {
        Self::new(csv.split(','), include_abstract)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Case-insensitive literal matcher per term, in term order
    pub fn matchers(&self) -> &[Regex] {
        &self.matchers
    }

    pub fn include_abstract(&self) -> bool {
        self.include_abstract
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Regexp search: every pattern group must match the title or abstract.
///
/// A group may use alternation internally; groups are ANDed.
#[derive(Debug, Clone)]
pub struct RegexpQuery {
    groups: Vec<Regex>,
    include_abstract: bool,
}

impl RegexpQuery {
    /// Compile every pattern, failing on the first invalid one.
    pub fn new<I, S>(patterns: I, include_abstract: bool) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = patterns
            .into_iter()
            .filter(|p| !p.as_ref().is_empty())
            .map(|p| {
                let pattern = p.as_ref();
                Regex::new(pattern).map_err(|source| SearchError::InvalidPattern {
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            groups,
            include_abstract,
        })
    }

    pub fn groups(&self) -> &[Regex] {
        &self.groups
    }

    /// Source text of each pattern group
    pub fn patterns(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.as_str()).collect()
    }

    pub fn include_abstract(&self) -> bool {
        self.include_abstract
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// A search query in either mode
#[derive(Debug, Clone)]
pub enum Query {
    Keyword(KeywordQuery),
    Regexp(RegexpQuery),
}

impl Query {
    pub fn include_abstract(&self) -> bool {
        match self {
            Query::Keyword(q) => q.include_abstract(),
            Query::Regexp(q) => q.include_abstract(),
        }
    }

    /// True when the query has no terms, which selects every paper
    pub fn is_empty(&self) -> bool {
        match self {
            Query::Keyword(q) => q.is_empty(),
            Query::Regexp(q) => q.is_empty(),
        }
    }

    /// The matchers used for highlighting, one per term or group
    pub fn matchers(&self) -> &[Regex] {
        match self {
            Query::Keyword(q) => q.matchers(),
            Query::Regexp(q) => q.groups(),
        }
    }

    /// Human-readable form for logs
    pub fn describe(&self) -> String {
        match self {
            Query::Keyword(q) => format!("keywords [{}]", q.terms().join(", ")),
            Query::Regexp(q) => format!("regexps [{}]", q.patterns().join(", ")),
        }
    }
}

impl From<KeywordQuery> for Query {
    fn from(query: KeywordQuery) -> Self {
        Query::Keyword(query)
    }
}

impl From<RegexpQuery> for Query {
    fn from(query: RegexpQuery) -> Self {
        Query::Regexp(query)
    }
}
