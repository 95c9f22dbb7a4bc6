//! Quadrant classification of product summaries.
//!
//! Rules are checked in order and the first match wins, so a product sitting
//! exactly on both midpoints lands in Negative Review/Negative Sentiment.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::core::aggregate::ProductSummary;

pub const DEFAULT_X_MID: f64 = 3.5;
pub const DEFAULT_Y_MID: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum, Serialize, Deserialize)]
pub enum Quadrant {
    #[serde(rename = "Positive Review/Positive Sentiment")]
    #[value(name = "pos-pos")]
    PositiveReviewPositiveSentiment,
    #[serde(rename = "Negative Review/Positive Sentiment")]
    #[value(name = "neg-pos")]
    NegativeReviewPositiveSentiment,
    #[serde(rename = "Negative Review/Negative Sentiment")]
    #[value(name = "neg-neg")]
    NegativeReviewNegativeSentiment,
    #[serde(rename = "Positive Review/Negative Sentiment")]
    #[value(name = "pos-neg")]
    PositiveReviewNegativeSentiment,
}

impl Quadrant {
    /// All quadrants in rule order.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::PositiveReviewPositiveSentiment,
        Quadrant::NegativeReviewPositiveSentiment,
        Quadrant::NegativeReviewNegativeSentiment,
        Quadrant::PositiveReviewNegativeSentiment,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::PositiveReviewPositiveSentiment => "Positive Review/Positive Sentiment",
            Quadrant::NegativeReviewPositiveSentiment => "Negative Review/Positive Sentiment",
            Quadrant::NegativeReviewNegativeSentiment => "Negative Review/Negative Sentiment",
            Quadrant::PositiveReviewNegativeSentiment => "Positive Review/Negative Sentiment",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rating and sentiment midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub x_mid: f64,
    pub y_mid: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { x_mid: DEFAULT_X_MID, y_mid: DEFAULT_Y_MID }
    }
}

impl Thresholds {
    pub fn classify(&self, mean_rating: f64, sentiment: f64) -> Quadrant {
        if mean_rating > self.x_mid && sentiment > self.y_mid {
            Quadrant::PositiveReviewPositiveSentiment
        } else if mean_rating <= self.x_mid && sentiment > self.y_mid {
            Quadrant::NegativeReviewPositiveSentiment
        } else if mean_rating <= self.x_mid && sentiment <= self.y_mid {
            Quadrant::NegativeReviewNegativeSentiment
        } else {
            Quadrant::PositiveReviewNegativeSentiment
        }
    }
}

/// A product summary with its quadrant label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedProduct {
    pub product_id: String,
    pub mean_rating: f64,
    pub sentiment: f64,
    pub count: usize,
    pub quadrant: Quadrant,
}

impl ClassifiedProduct {
    pub const COLUMNS: [&'static str; 5] = ["product_id", "mean_rating", "sentiment", "count", "quadrant"];
}

pub fn classify_all(products: &[ProductSummary], thresholds: Thresholds) -> Vec<ClassifiedProduct> {
    products
        .iter()
        .map(|p| ClassifiedProduct {
            product_id: p.product_id.clone(),
            mean_rating: p.mean_rating,
            sentiment: p.sentiment,
            count: p.count,
            quadrant: thresholds.classify(p.mean_rating, p.sentiment),
        })
        .collect()
}

/// Products per quadrant, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuadrantCount {
    pub quadrant: Quadrant,
    pub products: usize,
}

impl QuadrantCount {
    pub const COLUMNS: [&'static str; 2] = ["quadrant", "products"];
}

pub fn tally(products: &[ClassifiedProduct]) -> Vec<QuadrantCount> {
    Quadrant::ALL
        .iter()
        .map(|&q| QuadrantCount {
            quadrant: q,
            products: products.iter().filter(|p| p.quadrant == q).count(),
        })
        .collect()
}
