//! Precise filters applied on top of the coarse storage candidates.

use std::collections::HashSet;

use super::Normalizer;
use crate::models::{KeywordQuery, Paper, RegexpQuery};

/// True iff every keyword's stem occurs among the paper's stemmed tokens.
///
/// A keyword made of several words ("use-after-free") matches when all of
/// its stems occur. A keyword with no word characters at all ("++") has no
/// stem and matches only by raw containment in the searchable text.
pub fn fuzzy_match(paper: &Paper, query: &KeywordQuery, normalizer: &Normalizer) -> bool {
    let text = paper.searchable_text(query.include_abstract()).to_lowercase();

    let stems: HashSet<String> = normalizer.normalize(&text).into_iter().collect();

    query.terms().iter().all(|term| {
        let term_stems = normalizer.normalize(term);
        if term_stems.is_empty() {
            return text.contains(&term.to_lowercase());
        }
        term_stems.iter().all(|stem| stems.contains(stem))
    })
}

/// True iff every pattern group matches the title, or the abstract when enabled.
pub fn regexp_match(paper: &Paper, query: &RegexpQuery) -> bool {
    query.groups().iter().all(|group| {
        group.is_match(&paper.title)
            || (query.include_abstract() && group.is_match(&paper.r#abstract))
    })
}
