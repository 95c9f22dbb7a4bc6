//! Word stemming shared by the lexicon normalizer and the sentiment joiner.
//!
//! Both sides reduce words through the same [`Stemmer`], so a lexicon word
//! and a review token meet on a shared root ("gaming" and "games" both
//! reduce to "game").

use rust_stemmers::Algorithm;

/// Reduces a word to its stem.
pub trait Stemmer: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Porter's English stemmer in its Snowball revision (Porter2).
pub struct PorterStemmer {
    inner: rust_stemmers::Stemmer,
}

impl PorterStemmer {
    pub fn new() -> Self {
        Self { inner: rust_stemmers::Stemmer::create(Algorithm::English) }
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PorterStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PorterStemmer(english)")
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}
