//! Integration tests for confgrep
//!
//! These tests run the full pipeline (corpus file, search, ranking and
//! rendering) through the public library API.

use confgrep::highlight::strip_ansi;
use confgrep::render::{render, RenderOptions};
use confgrep::search::SearchError;
use confgrep::storage::StorageError;
use confgrep::{ConferenceTable, JsonlStore, KeywordQuery, Normalizer, Query, RegexpQuery, Searcher};
use std::path::Path;
use tempfile::tempdir;

const CORPUS: &str = r#"{"title":"Exploit Y","abstract":"","year":2019,"conference":"RAID"}
{"title":"Exploiting X","abstract":"","year":2019,"conference":"CCS","url":"https://example.com/x"}
{"title":"Fuzzing the Linux Kernel","abstract":"We find exploitable bugs.","year":2022,"conference":"USENIX"}
{"title":"Tor Traffic Analysis","abstract":"Website fingerprinting attacks.","year":2021,"conference":"PETS"}
"#;

fn write_corpus(dir: &Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("papers.jsonl");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_keyword_search_end_to_end() {
    let dir = tempdir().unwrap();
    let store = JsonlStore::open(write_corpus(dir.path(), CORPUS)).unwrap();
    let searcher = Searcher::default();

    let query: Query = KeywordQuery::parse("exploit", false).unwrap().into();
    let papers = searcher.search(&store, &query).unwrap();

    let titles: Vec<&str> = papers.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Exploiting X", "Exploit Y"]);
}

#[test]
fn test_keyword_search_includes_abstract() {
    let dir = tempdir().unwrap();
    let store = JsonlStore::open(write_corpus(dir.path(), CORPUS)).unwrap();
    let searcher = Searcher::default();

    // "exploitable" in the kernel paper's abstract stems to "exploit"
    let query: Query = KeywordQuery::parse("exploit", true).unwrap().into();
    let papers = searcher.search(&store, &query).unwrap();
    let conferences: Vec<&str> = papers.iter().map(|p| p.conference.as_str()).collect();
    assert_eq!(conferences, vec!["USENIX", "CCS", "RAID"]);

    let query: Query = KeywordQuery::parse("fingerprinting,attack", true).unwrap().into();
    let papers = searcher.search(&store, &query).unwrap();
    assert_eq!(papers.len(), 1);
    assert_eq!(papers[0].conference, "PETS");
}

#[test]
fn test_regexp_search_end_to_end() {
    let dir = tempdir().unwrap();
    let store = JsonlStore::open(write_corpus(dir.path(), CORPUS)).unwrap();
    let searcher = Searcher::default();

    let query: Query = RegexpQuery::new(["(?i)linux|tor", "^[A-Z]"], false)
        .unwrap()
        .into();
    let papers = searcher.search(&store, &query).unwrap();

    let years: Vec<i32> = papers.iter().map(|p| p.year).collect();
    assert_eq!(years, vec![2022, 2021]);
}

#[test]
fn test_render_end_to_end() {
    let dir = tempdir().unwrap();
    let store = JsonlStore::open(write_corpus(dir.path(), CORPUS)).unwrap();
    let searcher = Searcher::default();

    let query: Query = KeywordQuery::parse("exploit", false).unwrap().into();
    let papers = searcher.search(&store, &query).unwrap();
    let lines = render(&papers, &query, true, &RenderOptions::default());

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("2019: CCS  - \x1b]8;;https://example.com/x\x1b\\"));
    assert_eq!(strip_ansi(&lines[0]), "2019: CCS  - Exploiting X");
    assert_eq!(lines[1], "2019: RAID - \x1b[91mExploit\x1b[00m Y");
}

#[test]
fn test_unknown_conference_aborts() {
    let dir = tempdir().unwrap();
    let corpus = format!(
        "{}{}\n",
        CORPUS, r#"{"title":"Exploit Z","year":2020,"conference":"DEFCON"}"#
    );
    let store = JsonlStore::open(write_corpus(dir.path(), &corpus)).unwrap();
    let searcher = Searcher::default();

    let query: Query = KeywordQuery::parse("exploit", false).unwrap().into();
    match searcher.search(&store, &query) {
        Err(SearchError::UnknownConference { conference, .. }) => assert_eq!(conference, "DEFCON"),
        other => panic!("expected unknown conference, got {other:?}"),
    }
}

#[test]
fn test_custom_ranking_table() {
    let dir = tempdir().unwrap();
    let store = JsonlStore::open(write_corpus(dir.path(), CORPUS)).unwrap();
    let table = ConferenceTable::new([
        "CCS", "ESORICS", "ACSAC", "AsiaCCS", "PETS", "WWW", "IEEE EuroS&P", "NDSS", "IEEE S&P",
        "USENIX", "RAID",
    ]);
    let searcher = Searcher::new(Normalizer::new(), table);

    let query: Query = KeywordQuery::parse("exploit", false).unwrap().into();
    let papers = searcher.search(&store, &query).unwrap();
    assert_eq!(papers[0].conference, "RAID");
}

#[test]
fn test_invalid_pattern_is_rejected_before_storage() {
    let err = RegexpQuery::new(["[unterminated"], true).unwrap_err();
    assert!(matches!(err, SearchError::InvalidPattern { .. }));
    assert!(err.to_string().contains("[unterminated"));
}

#[test]
fn test_missing_corpus() {
    let dir = tempdir().unwrap();
    let err = JsonlStore::open(dir.path().join("nope.jsonl")).unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}
