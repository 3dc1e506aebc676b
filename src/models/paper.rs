//! Paper model representing a record from the conference corpus.

use serde::{Deserialize, Serialize};

/// A paper published at one of the ranked security conferences
///
/// Records are read-only to the search pipeline; highlighting works on
/// copies of the text fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    /// Paper title
    pub title: String,

    /// Abstract text (empty when the crawler could not fetch one)
    #[serde(default)]
    pub r#abstract: String,

    /// Publication year
    pub year: i32,

    /// Conference name, must be present in the ranking table
    pub conference: String,

    /// Paper page URL
    #[serde(default)]
    pub url: Option<String>,
}

impl Paper {
    /// Create a new paper with required fields
    pub fn new(title: String, year: i32, conference: String) -> Self {
        Self {
            title,
            r#abstract: String::new(),
            year,
            conference,
            url: None,
        }
    }

    /// Check if the paper has an abstract
    pub fn has_abstract(&self) -> bool {
        !self.r#abstract.trim().is_empty()
    }

    /// Text searched by the filters: the title, followed by the abstract when requested
    pub fn searchable_text(&self, include_abstract: bool) -> String {
        if include_abstract {
            format!("{} {}", self.title, self.r#abstract)
        } else {
            self.title.clone()
        }
    }
}

/// Builder for constructing Paper objects
#[derive(Debug, Clone)]
pub struct PaperBuilder {
    paper: Paper,
}

impl PaperBuilder {
    /// Create a new builder with required fields
    pub fn new(title: impl Into<String>, year: i32, conference: impl Into<String>) -> Self {
        Self {
            paper: Paper::new(title.into(), year, conference.into()),
        }
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.paper.r#abstract = abstract_text.into();
        self
    }

    /// Set paper URL
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.paper.url = Some(url.into());
        self
    }

    /// Build the Paper
    pub fn build(self) -> Paper {
        self.paper
    }
}
