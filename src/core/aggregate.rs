//! Aggregation of scored words by word and by product.
//!
//! Word summaries take the **max** score of the group, product summaries the
//! **mean**. Rows whose rating or score is not finite are left out of every
//! group; a group with no remaining rows does not appear.

use std::collections::BTreeMap;

use clap::ValueEnum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::core::join::ScoredWord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordSummary
{
    pub word: String,
    pub mean_rating: f64,
    /// Maximum score observed for the word
    pub score: f64,
    pub count: usize,
}

impl WordSummary
{
    /// CSV columns, in field order
    pub const COLUMNS: [&'static str; 4] = ["word", "mean_rating", "score", "count"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary
{
    pub product_id: String,
    pub mean_rating: f64,
    /// Mean score over the product's scored words
    pub sentiment: f64,
    pub count: usize,
}

#[derive(Default)]
struct Acc
{
    count: usize,
    rating_sum: f64,
    score_sum: f64,
    score_max: f64,
}

impl Acc
{
    fn push(
        &mut self,
        row: &ScoredWord,
    )
    {
        if self.count == 0 || row.score > self.score_max
        {
            self.score_max = row.score;
        }
        self.count += 1;
        self.rating_sum += row.overall_rating;
        self.score_sum += row.score;
    }

    fn mean_rating(&self) -> f64
    {
        self.rating_sum / self.count as f64
    }

    fn mean_score(&self) -> f64
    {
        self.score_sum / self.count as f64
    }
}

fn finite_rows(scored: &[ScoredWord]) -> impl Iterator<Item = &ScoredWord>
{
    scored
        .iter()
        .filter(|r| r.overall_rating.is_finite() && r.score.is_finite())
}

/// Group by word. Ordered by count descending, then word ascending.
pub fn by_word(scored: &[ScoredWord]) -> Vec<WordSummary>
{
    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for row in finite_rows(scored)
    {
        groups
            .entry(row.word.as_str())
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|(word, acc)| WordSummary {
            word: word.to_string(),
            mean_rating: acc.mean_rating(),
            score: acc.score_max,
            count: acc.count,
        })
        .sorted_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.word.cmp(&b.word))
        })
        .collect()
}

/// Group by product id. Ordered by product id ascending.
pub fn by_product(scored: &[ScoredWord]) -> Vec<ProductSummary>
{
    let mut groups: BTreeMap<&str, Acc> = BTreeMap::new();
    for row in finite_rows(scored)
    {
        groups
            .entry(&*row.product_id)
            .or_default()
            .push(row);
    }

    groups
        .into_iter()
        .map(|(product_id, acc)| ProductSummary {
            product_id: product_id.to_string(),
            mean_rating: acc.mean_rating(),
            sentiment: acc.mean_score(),
            count: acc.count,
        })
        .collect()
}

/// Which slice of the word table to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordView
{
    /// Most frequent scored words
    Common,
    /// Positive words, highest mean rating first
    Positive,
    /// Negative words above the count floor, lowest mean rating first
    Negative,
}

/// Count floors for the positive and negative views. A word qualifies only
/// when its count is strictly greater than the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewThresholds
{
    pub positive_min_count: usize,
    pub negative_min_count: usize,
}

impl Default for ViewThresholds
{
    fn default() -> Self
    {
        Self { positive_min_count: 0, negative_min_count: 1000 }
    }
}

/// Select a view from word summaries, truncated to `top` when given.
pub fn word_view(
    words: &[WordSummary],
    view: WordView,
    thresholds: ViewThresholds,
    top: Option<usize>,
) -> Vec<WordSummary>
{
    let limit = top.unwrap_or(usize::MAX);
    match view
    {
        WordView::Common => words
            .iter()
            .sorted_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.word.cmp(&b.word))
            })
            .take(limit)
            .cloned()
            .collect(),
        WordView::Positive => words
            .iter()
            .filter(|w| w.score > 0.0 && w.count > thresholds.positive_min_count)
            .sorted_by(|a, b| {
                b.mean_rating
                    .total_cmp(&a.mean_rating)
                    .then_with(|| a.word.cmp(&b.word))
            })
            .take(limit)
            .cloned()
            .collect(),
        WordView::Negative => words
            .iter()
            .filter(|w| w.score < 0.0 && w.count > thresholds.negative_min_count)
            .sorted_by(|a, b| {
                a.mean_rating
                    .total_cmp(&b.mean_rating)
                    .then_with(|| a.word.cmp(&b.word))
            })
            .take(limit)
            .cloned()
            .collect(),
    }
}
