//! Lexicon normalizer: word → score becomes stem → score.
//!
//! Collision policy: when several raw words reduce to the same stem, the
//! highest score wins. Entries with a non-finite score are skipped, and so
//! are multi-word phrases ("can't stand"), which no single token can match.

use std::collections::BTreeMap;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::stem::{PorterStemmer, Stemmer};

/// Lexicon as loaded: word → score, in file order.
pub type RawLexicon = IndexMap<String, f64>;

/// Stem-keyed lexicon. Owns the stemmer so lookups always reduce words with
/// the same function that built the keys.
#[derive(Clone)]
pub struct NormalizedLexicon
{
    stems: BTreeMap<String, f64>,
    stemmer: Arc<dyn Stemmer>,
    raw_len: usize,
    collisions: usize,
    skipped: usize,
}

impl std::fmt::Debug for NormalizedLexicon
{
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result
    {
        f.debug_struct("NormalizedLexicon")
            .field("stems", &self.stems.len())
            .field("raw_len", &self.raw_len)
            .field("collisions", &self.collisions)
            .field("skipped", &self.skipped)
            .finish()
    }
}

impl NormalizedLexicon
{
    /// Normalize with the Porter stemmer.
    pub fn porter(raw: &RawLexicon) -> Self
    {
        Self::normalize(raw, Arc::new(PorterStemmer::new()))
    }

    pub fn normalize(
        raw: &RawLexicon,
        stemmer: Arc<dyn Stemmer>,
    ) -> Self
    {
        let mut stems: BTreeMap<String, f64> = BTreeMap::new();
        let mut collisions = 0;
        let mut skipped = 0;

        for (word, &score) in raw
        {
            if !score.is_finite()
            {
                warn!(word = %word, "skipping lexicon entry with non-finite score");
                skipped += 1;
                continue;
            }

            let word = word.trim().to_lowercase();
            if word.split_whitespace().nth(1).is_some()
            {
                debug!(word = %word, "skipping multi-word lexicon entry");
                skipped += 1;
                continue;
            }

            let stem = stemmer.stem(&word);
            match stems.get_mut(&stem)
            {
                Some(existing) =>
                {
                    collisions += 1;
                    if score > *existing
                    {
                        *existing = score;
                    }
                }
                None =>
                {
                    stems.insert(stem, score);
                }
            }
        }

        debug!(
            raw = raw.len(),
            stems = stems.len(),
            collisions,
            skipped,
            "normalized lexicon"
        );

        Self {
            stems,
            stemmer,
            raw_len: raw.len(),
            collisions,
            skipped,
        }
    }

    /// Score for a word after stemming it, `None` on a miss.
    pub fn score_of(
        &self,
        word: &str,
    ) -> Option<f64>
    {
        self.stems.get(&self.stemmer.stem(word)).copied()
    }

    /// Score for an already-stemmed key.
    pub fn score_of_stem(
        &self,
        stem: &str,
    ) -> Option<f64>
    {
        self.stems.get(stem).copied()
    }

    pub fn len(&self) -> usize
    {
        self.stems.len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.stems.is_empty()
    }

    /// Entries in the raw lexicon before normalization
    pub fn raw_len(&self) -> usize
    {
        self.raw_len
    }

    /// Raw entries that landed on an already-present stem
    pub fn collisions(&self) -> usize
    {
        self.collisions
    }

    /// Raw entries left out: non-finite scores and multi-word phrases
    pub fn skipped(&self) -> usize
    {
        self.skipped
    }

    /// Stems in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)>
    {
        self.stems
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
    }
}
