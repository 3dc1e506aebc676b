//! Line-oriented rendering of search results.
//!
//! Each paper becomes a header line
//! `<year>: <conference, padded> - <title>` optionally followed by its
//! abstract and a blank line.

use unicode_width::UnicodeWidthStr;

use crate::highlight::{highlight, hyperlink, Suffix};
use crate::models::{Paper, Query};

/// Rendering switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit color escape sequences for matches
    pub color: bool,
    /// Wrap titles that have a URL in OSC 8 hyperlinks
    pub hyperlinks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            hyperlinks: true,
        }
    }
}

impl RenderOptions {
    /// No escape sequences at all
    pub fn plain() -> Self {
        Self {
            color: false,
            hyperlinks: false,
        }
    }
}

/// Render papers to display lines
pub fn render(
    papers: &[Paper],
    query: &Query,
    show_abstracts: bool,
    options: &RenderOptions,
) -> Vec<String> {
    let conf_width = papers
        .iter()
        .map(|p| p.conference.width())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for paper in papers {
        lines.push(header(paper, query, conf_width, options));

        if show_abstracts && paper.has_abstract() {
            let text = paper.r#abstract.trim();
            let body = if options.color {
                highlight(text, query, Suffix::Reset)
            } else {
                text.to_string()
            };
            lines.push(body);
            lines.push(String::new());
        }
    }
    lines
}

fn header(paper: &Paper, query: &Query, conf_width: usize, options: &RenderOptions) -> String {
    let padding = " ".repeat(conf_width.saturating_sub(paper.conference.width()));
    format!(
        "{}: {}{} - {}",
        paper.year,
        paper.conference,
        padding,
        title(paper, query, options)
    )
}

/// Highlighted title; inside a hyperlink the highlight suffix must not
/// reset the link state.
fn title(paper: &Paper, query: &Query, options: &RenderOptions) -> String {
    let link = paper.url.as_deref().filter(|_| options.hyperlinks);

    let text = if options.color {
        let suffix = if link.is_some() {
            Suffix::RestoreLink
        } else {
            Suffix::Reset
        };
        highlight(&paper.title, query, suffix)
    } else {
        paper.title.clone()
    };

    match link {
        Some(url) => hyperlink(url, &text),
        None => text,
    }
}
