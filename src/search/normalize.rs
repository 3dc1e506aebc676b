//! Text normalization: Unicode word tokenization followed by stemming.

use rust_stemmers::{Algorithm, Stemmer};
use unicode_segmentation::UnicodeSegmentation;

use super::SearchError;

/// Stemming normalizer, created once and shared by reference.
///
/// Reduces morphological variants to a common stem so that "exploiting"
/// and "exploit" compare equal.
pub struct Normalizer {
    stemmer: Stemmer,
    language: &'static str,
}

impl Normalizer {
    /// English normalizer
    pub fn new() -> Self {
        Self {
            stemmer: Stemmer::create(Algorithm::English),
            language: "english",
        }
    }

    /// Normalizer for a named stemming language (e.g. "english", "german")
    pub fn for_language(name: &str) -> Result<Self, SearchError> {
        let (algorithm, language) = match name.trim().to_lowercase().as_str() {
            "english" | "en" => (Algorithm::English, "english"),
            "french" | "fr" => (Algorithm::French, "french"),
            "german" | "de" => (Algorithm::German, "german"),
            "spanish" | "es" => (Algorithm::Spanish, "spanish"),
            "italian" | "it" => (Algorithm::Italian, "italian"),
            "portuguese" | "pt" => (Algorithm::Portuguese, "portuguese"),
            "dutch" | "nl" => (Algorithm::Dutch, "dutch"),
            "russian" | "ru" => (Algorithm::Russian, "russian"),
            _ => return Err(SearchError::UnsupportedLanguage(name.to_string())),
        };

        Ok(Self {
            stemmer: Stemmer::create(algorithm),
            language,
        })
    }

    pub fn language(&self) -> &str {
        self.language
    }

    /// Lower-case and stem a single word
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(&word.to_lowercase()).into_owned()
    }

    /// Split text on Unicode word boundaries and stem every word.
    ///
    /// Punctuation and whitespace segments are dropped.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(|word| self.stem(word)).collect()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer")
            .field("language", &self.language)
            .finish()
    }
}
