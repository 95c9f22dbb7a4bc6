//! Tokenizer/filter: review text → one [`WordOccurrence`] per kept word.
//!
//! Text is lowercased, split into runs of word characters and apostrophes,
//! and each token survives only if it is made of `a-z` and `'` alone and is
//! not a stopword. Filtering runs once per review; the occurrences of one
//! review are materialized together before they are handed out.

use std::collections::HashSet;
use std::sync::Arc;

use aprender::text::stopwords::StopWordsFilter;
use regex::Regex;
use tracing::warn;

use crate::core::loader::Review;

/// A single kept word from a review, carrying the review's keys.
#[derive(Debug, Clone, PartialEq)]
pub struct WordOccurrence {
    pub reviewer_id: Arc<str>,
    pub product_id: Arc<str>,
    pub overall_rating: f64,
    pub word: String,
}

/// Words excluded from analysis: the built-in English list, or a listed set
/// loaded from a stopword file.
pub struct StopWords {
    source: Source,
}

enum Source {
    English(StopWordsFilter),
    Listed(HashSet<String>),
}

impl StopWords {
    pub fn english() -> Self {
        Self { source: Source::English(StopWordsFilter::english()) }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self { source: Source::Listed(words) }
    }

    /// Drop stopwords from `words`, keeping order.
    pub fn retain(&self, mut words: Vec<String>) -> Vec<String> {
        if words.is_empty() {
            return words;
        }
        match &self.source {
            Source::Listed(set) => {
                words.retain(|w| !set.contains(w));
                words
            }
            Source::English(filter) => match filter.filter(&words) {
                Ok(kept) => kept,
                Err(err) => {
                    warn!(error = ?err, "stopword filter failed, keeping words");
                    words
                }
            },
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        match &self.source {
            Source::Listed(set) => set.contains(word),
            Source::English(_) => self.retain(vec![word.to_string()]).is_empty(),
        }
    }

    /// Size of a listed set; `None` for the built-in list.
    pub fn listed_len(&self) -> Option<usize> {
        match &self.source {
            Source::Listed(set) => Some(set.len()),
            Source::English(_) => None,
        }
    }
}

impl std::fmt::Debug for StopWords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Source::English(_) => f.write_str("StopWords(english)"),
            Source::Listed(set) => write!(f, "StopWords({} listed)", set.len()),
        }
    }
}

/// Splits review text into filtered word occurrences.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    stopwords: Arc<StopWords>,
    splitter: Regex,
    keep: Regex,
}

impl Tokenizer {
    pub fn new(stopwords: Arc<StopWords>) -> Self {
        Self {
            stopwords,
            // Static patterns; a failure here is a programming error
            splitter: Regex::new(r"[\w']+").expect("static token pattern"),
            keep: Regex::new(r"^[a-z']+$").expect("static keep pattern"),
        }
    }

    /// Kept words of `text`, in order of appearance.
    pub fn words(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase().replace(['\u{2019}', '\u{2018}'], "'");

        let tokens = self
            .splitter
            .find_iter(&lowered)
            .map(|m| m.as_str().trim_matches('\''))
            .filter(|tok| !tok.is_empty())
            .filter(|tok| self.keep.is_match(tok))
            .map(str::to_string)
            .collect();

        self.stopwords.retain(tokens)
    }

    /// One occurrence per kept word of the review, in text order. The words
    /// of the review are filtered up front; only the key cloning is lazy.
    pub fn tokenize<'a>(&'a self, review: &'a Review) -> impl Iterator<Item = WordOccurrence> + 'a {
        self.words(&review.review_text)
            .into_iter()
            .map(move |word| WordOccurrence {
                reviewer_id: Arc::clone(&review.reviewer_id),
                product_id: Arc::clone(&review.product_id),
                overall_rating: review.overall_rating,
                word,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new(Arc::new(StopWords::english()))
    }

    #[test]
    fn test_drops_stopwords_and_punctuation() {
        let t = tokenizer();
        assert_eq!(t.words("This game is GOOD, good!"), vec!["game", "good", "good"]);
    }

    #[test]
    fn test_only_stopwords_yields_nothing() {
        let t = tokenizer();
        assert!(t.words("the and of ... !!! ??").is_empty());
        assert!(t.words("").is_empty());
        assert!(t.words("   \n\t").is_empty());
    }

    #[test]
    fn test_rejects_digits_and_underscores() {
        let t = tokenizer();
        assert_eq!(t.words("level 42 xbox360 snake_case fun"), vec!["level", "fun"]);
    }

    #[test]
    fn test_keeps_inner_apostrophes_and_trims_quotes() {
        let t = Tokenizer::new(Arc::new(StopWords::from_words(["the"])));
        assert_eq!(t.words("'the' player's can't"), vec!["player's", "can't"]);
        assert_eq!(t.words("it\u{2019}s"), vec!["it's"]);
    }

    #[test]
    fn test_tokenize_carries_review_keys_in_order() {
        let t = tokenizer();
        let review = Review::new("R1", "A1", 4.0, "Loved the graphics, hated controls");
        let occ: Vec<_> = t.tokenize(&review).collect();

        let words: Vec<_> = occ.iter().map(|o| o.word.as_str()).collect();
        assert_eq!(words, vec!["loved", "graphics", "hated", "controls"]);
        assert!(occ.iter().all(|o| &*o.product_id == "A1" && o.overall_rating == 4.0));
    }

    #[test]
    fn test_kept_words_are_lowercase_alphabetic() {
        let t = tokenizer();
        let text = "Über COOL café — 100% Wörth it; déjà-vu Mario's";
        for w in t.words(text) {
            assert!(w.chars().all(|c| c.is_ascii_lowercase() || c == '\''), "{w}");
            assert!(!t.stopwords.contains(&w));
        }
    }

    #[test]
    fn test_custom_stopwords_are_normalized() {
        let sw = StopWords::from_words([" Game ", "", "FUN"]);
        assert_eq!(sw.listed_len(), Some(2));
        assert!(sw.contains("game"));
        assert!(sw.contains("fun"));
    }

    #[test]
    fn test_builtin_list_keeps_sentiment_words() {
        let sw = StopWords::english();
        for w in ["the", "and", "is", "it", "this", "was", "but"] {
            assert!(sw.contains(w), "{w} should be a stopword");
        }
        for w in ["good", "bad", "loved", "boring", "game"] {
            assert!(!sw.contains(w), "{w} should be kept");
        }
        assert_eq!(sw.listed_len(), None);
    }

    #[test]
    fn test_retain_keeps_order() {
        let sw = StopWords::from_words(["and"]);
        let words = ["slow", "and", "boring", "and", "sad"].map(String::from).to_vec();
        assert_eq!(sw.retain(words), vec!["slow", "boring", "sad"]);
        assert!(sw.retain(Vec::new()).is_empty());
    }
}
