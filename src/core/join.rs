//! Sentiment joiner: inner join of word occurrences against the lexicon.
//!
//! Contract: each occurrence yields zero or one [`ScoredWord`]. A word whose
//! stem is not in the lexicon is dropped without error.

use std::sync::Arc;

use crate::core::lexicon::NormalizedLexicon;
use crate::core::tokenize::WordOccurrence;

/// A word occurrence with its lexicon score attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredWord {
    pub reviewer_id: Arc<str>,
    pub product_id: Arc<str>,
    pub overall_rating: f64,
    pub word: String,
    pub score: f64,
}

/// Attaches lexicon scores to occurrences.
#[derive(Debug, Clone, Copy)]
pub struct SentimentJoiner<'a> {
    lexicon: &'a NormalizedLexicon,
}

impl<'a> SentimentJoiner<'a> {
    pub fn new(lexicon: &'a NormalizedLexicon) -> Self {
        Self { lexicon }
    }

    /// `Some` only when the occurrence's stem is in the lexicon.
    pub fn join(&self, occ: WordOccurrence) -> Option<ScoredWord> {
        let score = self.lexicon.score_of(&occ.word)?;
        Some(ScoredWord {
            reviewer_id: occ.reviewer_id,
            product_id: occ.product_id,
            overall_rating: occ.overall_rating,
            word: occ.word,
            score,
        })
    }

    /// Join a whole sequence, preserving input order among hits.
    pub fn join_all<I>(self, occurrences: I) -> impl Iterator<Item = ScoredWord>
    where
        I: IntoIterator<Item = WordOccurrence>,
    {
        occurrences
            .into_iter()
            .filter_map(move |occ| self.join(occ))
    }
}
