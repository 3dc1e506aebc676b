//! Match highlighting.
//!
//! Highlighting runs in two stages. Spans are first computed for every
//! matcher against the original text and resolved into a list of
//! non-overlapping [`StyledSpan`]s covering the whole text; the list is then
//! encoded to terminal escape sequences in a single pass.
//!
//! Where matches of different terms overlap, the later term wins that
//! sub-range.

use regex::Regex;

use crate::models::{KeywordQuery, MatchSpan, Query, RegexpQuery};

/// Global SGR reset
pub const RESET: &str = "\x1b[00m";

/// Restore the default foreground only, leaving an open hyperlink intact
pub const LINK_RESTORE: &str = "\x1b[39m";

/// Highlight colors, assigned to terms in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Color {
    pub const PALETTE: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
    ];

    /// Used for every term past the end of the palette
    pub const FALLBACK: Color = Color::Cyan;

    /// Color for the n-th query term
    pub fn for_term(index: usize) -> Color {
        Self::PALETTE.get(index).copied().unwrap_or(Self::FALLBACK)
    }

    /// Bright foreground SGR sequence
    pub fn ansi_code(self) -> &'static str {
        match self {
            Color::Red => "\x1b[91m",
            Color::Green => "\x1b[92m",
            Color::Yellow => "\x1b[93m",
            Color::Blue => "\x1b[94m",
            Color::Magenta => "\x1b[95m",
            Color::Cyan => "\x1b[96m",
        }
    }
}

/// Suffix written after each highlighted run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suffix {
    /// Plain text: full reset
    Reset,
    /// Inside a hyperlinked title: restore the link's own color state
    RestoreLink,
}

impl Suffix {
    pub fn code(self) -> &'static str {
        match self {
            Suffix::Reset => RESET,
            Suffix::RestoreLink => LINK_RESTORE,
        }
    }
}

/// A run of text with an optional highlight color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyledSpan {
    pub span: MatchSpan,
    pub style: Option<Color>,
}

/// Resolve all matches of `matchers` over `text` into contiguous styled runs.
///
/// The runs cover `text` exactly, in order, with no gaps. Zero-width matches
/// are ignored.
pub fn styled_spans(text: &str, matchers: &[Regex]) -> Vec<StyledSpan> {
    let mut paint: Vec<Option<Color>> = vec![None; text.len()];

    for (idx, matcher) in matchers.iter().enumerate() {
        let color = Color::for_term(idx);
        for m in matcher.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            paint[m.range()].fill(Some(color));
        }
    }

    let mut runs = Vec::new();
    let mut start = 0;
    for pos in 1..=paint.len() {
        if pos == paint.len() || paint[pos] != paint[start] {
            runs.push(StyledSpan {
                span: MatchSpan::new(start, pos),
                style: paint[start],
            });
            start = pos;
        }
    }
    runs
}

/// Styled runs for a keyword query (case-insensitive literal matches)
pub fn highlight_spans_kw(text: &str, query: &KeywordQuery) -> Vec<StyledSpan> {
    styled_spans(text, query.matchers())
}

/// Styled runs for a regexp query
pub fn highlight_spans_re(text: &str, query: &RegexpQuery) -> Vec<StyledSpan> {
    styled_spans(text, query.groups())
}

/// Encode styled runs to a string with color escape sequences
pub fn encode(text: &str, spans: &[StyledSpan], suffix: Suffix) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 10);
    for run in spans {
        let piece = &text[run.span.range()];
        match run.style {
            Some(color) => {
                out.push_str(color.ansi_code());
                out.push_str(piece);
                out.push_str(suffix.code());
            }
            None => out.push_str(piece),
        }
    }
    out
}

/// Highlight every keyword occurrence in `text`
pub fn highlight_kw(text: &str, query: &KeywordQuery, suffix: Suffix) -> String {
    encode(text, &highlight_spans_kw(text, query), suffix)
}

/// Highlight every pattern match in `text`
pub fn highlight_re(text: &str, query: &RegexpQuery, suffix: Suffix) -> String {
    encode(text, &highlight_spans_re(text, query), suffix)
}

/// Highlight `text` for either query mode
pub fn highlight(text: &str, query: &Query, suffix: Suffix) -> String {
    match query {
        Query::Keyword(q) => highlight_kw(text, q, suffix),
        Query::Regexp(q) => highlight_re(text, q, suffix),
    }
}

/// Wrap `text` in an OSC 8 terminal hyperlink
pub fn hyperlink(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Remove SGR color sequences and OSC 8 hyperlink sequences
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        match chars.next() {
            // CSI: parameter bytes up to a final byte in '@'..='~'
            Some('[') => {
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            // OSC: terminated by BEL or ST (ESC \)
            Some(']') => {
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' {
                        if chars.peek() == Some(&'\\') {
                            chars.next();
                        }
                        break;
                    }
                }
            }
            _ => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_and_fallback() {
        assert_eq!(Color::for_term(0), Color::Red);
        assert_eq!(Color::for_term(5), Color::Cyan);
        assert_eq!(Color::for_term(6), Color::FALLBACK);
        assert_eq!(Color::for_term(42).ansi_code(), "\x1b[96m");
    }

    #[test]
    fn test_highlight_kw_wraps_every_occurrence() {
        let query = KeywordQuery::new(["exploit"], true).unwrap();
        let out = highlight_kw("Exploit the exploit", &query, Suffix::Reset);
        assert_eq!(out, "\x1b[91mExploit\x1b[00m the \x1b[91mexploit\x1b[00m");
    }

    #[test]
    fn test_highlight_kw_round_trip() {
        let query = KeywordQuery::new(["linux"], true).unwrap();
        let text = "Linux kernel exploits: LINUX, linux and Linuxes.";
        let out = highlight_kw(text, &query, Suffix::Reset);
        assert_ne!(out, text);
        assert_eq!(strip_ansi(&out), text);
    }

    #[test]
    fn test_highlight_kw_multiple_keywords_use_palette() {
        let query = KeywordQuery::new(["kernel", "fuzz"], true).unwrap();
        let out = highlight_kw("fuzz the kernel", &query, Suffix::Reset);
        assert_eq!(out, "\x1b[92mfuzz\x1b[00m the \x1b[91mkernel\x1b[00m");
    }

    #[test]
    fn test_later_keyword_wins_overlap() {
        let query = KeywordQuery::new(["ab", "b"], true).unwrap();
        let spans = highlight_spans_kw("ab", &query);
        assert_eq!(
            spans,
            vec![
                StyledSpan {
                    span: MatchSpan::new(0, 1),
                    style: Some(Color::Red)
                },
                StyledSpan {
                    span: MatchSpan::new(1, 2),
                    style: Some(Color::Green)
                },
            ]
        );
    }

    #[test]
    fn test_overlapping_patterns_keep_every_character_once() {
        let query = RegexpQuery::new(["ab", "bc"], true).unwrap();
        let out = highlight_re("xabcx", &query, Suffix::Reset);
        assert_eq!(strip_ansi(&out), "xabcx");
        assert_eq!(out, "x\x1b[91ma\x1b[00m\x1b[92mbc\x1b[00mx");
    }

    #[test]
    fn test_spans_cover_text_without_gaps() {
        let query = RegexpQuery::new(["[a-z]+", "\\d"], true).unwrap();
        let text = "ab 12 cd";
        let spans = highlight_spans_re(text, &query);
        let mut expected_start = 0;
        for run in &spans {
            assert_eq!(run.span.start, expected_start);
            assert!(!run.span.is_empty());
            expected_start = run.span.end;
        }
        assert_eq!(expected_start, text.len());
    }

    #[test]
    fn test_zero_width_matches_are_ignored() {
        let query = RegexpQuery::new(["z*"], true).unwrap();
        assert_eq!(highlight_re("abc", &query, Suffix::Reset), "abc");
    }

    #[test]
    fn test_multibyte_text() {
        let query = RegexpQuery::new(["é+"], true).unwrap();
        let out = highlight_re("café crème", &query, Suffix::Reset);
        assert_eq!(strip_ansi(&out), "café crème");
        assert!(out.contains("\x1b[91mé\x1b[00m"));
    }

    #[test]
    fn test_restore_link_suffix() {
        let query = KeywordQuery::new(["tor"], true).unwrap();
        let out = highlight_kw("Tor relays", &query, Suffix::RestoreLink);
        assert_eq!(out, "\x1b[91mTor\x1b[39m relays");
    }

    #[test]
    fn test_hyperlink_and_strip() {
        let link = hyperlink("https://example.com", "Title");
        assert_eq!(link, "\x1b]8;;https://example.com\x1b\\Title\x1b]8;;\x1b\\");
        assert_eq!(strip_ansi(&link), "Title");
    }

    #[test]
    fn test_empty_text() {
        let query = KeywordQuery::new(["x"], true).unwrap();
        assert!(highlight_spans_kw("", &query).is_empty());
        assert_eq!(highlight_kw("", &query, Suffix::Reset), "");
    }
}
