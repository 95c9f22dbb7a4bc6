//! End-to-end scoring: reviews → scored words → summaries → quadrants.
//!
//! Tokenize and join run as an order-preserving parallel map over reviews;
//! aggregation then reduces the ordered result sequentially, so two runs over
//! the same input produce identical tables.

use std::sync::Arc;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::core::aggregate::{ProductSummary, WordSummary, by_product, by_word};
use crate::core::join::{ScoredWord, SentimentJoiner};
use crate::core::lexicon::{NormalizedLexicon, RawLexicon};
use crate::core::loader::Review;
use crate::core::quadrant::{ClassifiedProduct, QuadrantCount, Thresholds, classify_all, tally};
use crate::core::tokenize::{StopWords, Tokenizer};

/// Stage wiring around shared, read-only reference data.
#[derive(Debug, Clone)]
pub struct Pipeline
{
    tokenizer: Tokenizer,
    lexicon: NormalizedLexicon,
}

/// Output of [`Pipeline::score`].
#[derive(Debug, Clone, Default)]
pub struct Scored
{
    /// Filtered word occurrences before the join
    pub occurrences: usize,
    pub words: Vec<ScoredWord>,
}

/// Cardinalities of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats
{
    pub reviews: usize,
    pub occurrences: usize,
    pub scored_words: usize,
    pub lexicon_entries: usize,
    pub lexicon_stems: usize,
    pub lexicon_collisions: usize,
}

/// All tables of one run.
#[derive(Debug, Clone, Serialize)]
pub struct Report
{
    pub stats: RunStats,
    pub thresholds: Thresholds,
    pub words: Vec<WordSummary>,
    pub products: Vec<ClassifiedProduct>,
    pub quadrants: Vec<QuadrantCount>,
}

impl Pipeline
{
    pub fn new(
        stopwords: Arc<StopWords>,
        lexicon: &RawLexicon,
    ) -> Self
    {
        Self::with_lexicon(stopwords, NormalizedLexicon::porter(lexicon))
    }

    pub fn with_lexicon(
        stopwords: Arc<StopWords>,
        lexicon: NormalizedLexicon,
    ) -> Self
    {
        Self { tokenizer: Tokenizer::new(stopwords), lexicon }
    }

    pub fn lexicon(&self) -> &NormalizedLexicon
    {
        &self.lexicon
    }

    /// Tokenize, filter and join every review.
    #[instrument(skip_all, fields(reviews = reviews.len()))]
    pub fn score(
        &self,
        reviews: &[Review],
    ) -> Scored
    {
        let joiner = SentimentJoiner::new(&self.lexicon);

        let per_review: Vec<(usize, Vec<ScoredWord>)> = reviews
            .par_iter()
            .map(|review| {
                let mut occurrences = 0;
                let hits = joiner
                    .join_all(
                        self.tokenizer
                            .tokenize(review)
                            .inspect(|_| occurrences += 1),
                    )
                    .collect();
                (occurrences, hits)
            })
            .collect();

        let mut scored = Scored::default();
        for (n, hits) in per_review
        {
            scored.occurrences += n;
            scored.words.extend(hits);
        }

        debug!(
            occurrences = scored.occurrences,
            scored = scored.words.len(),
            "joined occurrences against lexicon"
        );
        scored
    }

    /// Full run: score, aggregate, classify.
    pub fn run(
        &self,
        reviews: &[Review],
        thresholds: Thresholds,
    ) -> Report
    {
        let scored = self.score(reviews);
        let words = by_word(&scored.words);
        let products = classify_all(&by_product(&scored.words), thresholds);
        let quadrants = tally(&products);

        debug!(words = words.len(), products = products.len(), "aggregated");

        Report {
            stats: RunStats {
                reviews: reviews.len(),
                occurrences: scored.occurrences,
                scored_words: scored.words.len(),
                lexicon_entries: self.lexicon.raw_len(),
                lexicon_stems: self.lexicon.len(),
                lexicon_collisions: self.lexicon.collisions(),
            },
            thresholds,
            words,
            products,
            quadrants,
        }
    }
}

/// Product summaries only, without classification.
pub fn product_summaries(report: &Report) -> Vec<ProductSummary>
{
    report
        .products
        .iter()
        .map(|p| ProductSummary {
            product_id: p.product_id.clone(),
            mean_rating: p.mean_rating,
            sentiment: p.sentiment,
            count: p.count,
        })
        .collect()
}
