//! Record loader: delimited review table → typed [`Review`] rows.
//!
//! Column presence is resolved once from the header; every record is then
//! validated against it, so a malformed file fails fast instead of leaking
//! half-typed rows into the pipeline.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use miette::Diagnostic;
use tracing::{debug, instrument};

use crate::infra::io::read_file_smart;

/// One observed review. Ids are shared with every word derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Review
{
    pub reviewer_id: Arc<str>,
    pub product_id: Arc<str>,
    pub overall_rating: f64,
    pub review_text: String,
}

impl Review
{
    pub fn new(
        reviewer_id: &str,
        product_id: &str,
        overall_rating: f64,
        review_text: &str,
    ) -> Self
    {
        Self {
            reviewer_id: Arc::from(reviewer_id),
            product_id: Arc::from(product_id),
            overall_rating,
            review_text: review_text.to_string(),
        }
    }
}

/// Required columns with their accepted header spellings.
const COLUMNS: [(&str, &[&str]); 4] = [
    ("reviewerID", &["reviewerID", "reviewer_id"]),
    ("asin", &["asin", "product_id"]),
    ("overall", &["overall", "overall_rating"]),
    ("reviewText", &["reviewText", "review_text"]),
];

const MIN_RATING: f64 = 1.0;
const MAX_RATING: f64 = 5.0;

/// Review file could not be turned into a table of reviews.
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum LoadError
{
    #[error("cannot read review file {path}")]
    #[diagnostic(code(revsent::load::io), help("check that the path exists and is readable"))]
    Io
    {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("review file {0} is not valid UTF-8")]
    #[diagnostic(code(revsent::load::encoding))]
    Encoding(PathBuf),

    #[error("review file {0} is empty (no header row)")]
    #[diagnostic(code(revsent::load::empty))]
    Empty(PathBuf),

    #[error("review file {0} has a header but no records")]
    #[diagnostic(
        code(revsent::load::no_records),
        help("pass --allow-empty to accept an empty corpus")
    )]
    NoRecords(PathBuf),

    #[error("missing required column `{column}` in {path}")]
    #[diagnostic(
        code(revsent::load::missing_column),
        help("expected columns: reviewerID, asin, overall, reviewText")
    )]
    MissingColumn
    {
        path: PathBuf,
        column: &'static str,
    },

    #[error("malformed record at line {line}: {reason}")]
    #[diagnostic(code(revsent::load::record))]
    Record
    {
        line: u64,
        reason: String,
    },
}

/// Options for [`load_reviews`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions
{
    /// Accept a header with zero records as an empty corpus
    pub allow_empty: bool,
}

/// Load and validate a review table from disk.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_reviews(
    path: &Path,
    opts: LoadOptions,
) -> Result<Vec<Review>, LoadError>
{
    let content = read_file_smart(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let text = content
        .as_str()
        .ok_or_else(|| LoadError::Encoding(path.to_path_buf()))?;

    let reviews = parse_reviews(text, path)?;

    if reviews.is_empty() && !opts.allow_empty
    {
        return Err(LoadError::NoRecords(path.to_path_buf()));
    }

    debug!(reviews = reviews.len(), "loaded review table");
    Ok(reviews)
}

/// Parse review rows from CSV text. `origin` only labels errors.
pub fn parse_reviews(
    text: &str,
    origin: &Path,
) -> Result<Vec<Review>, LoadError>
{
    if text.trim().is_empty()
    {
        return Err(LoadError::Empty(origin.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| record_error(&e, e.to_string()))?
        .clone();

    // Resolve each required column to its header index
    let mut idx = [0usize; 4];
    for (slot, (canonical, spellings)) in idx.iter_mut().zip(COLUMNS.iter())
    {
        *slot = headers
            .iter()
            .position(|h| spellings.contains(&h.trim()))
            .ok_or(LoadError::MissingColumn {
                path: origin.to_path_buf(),
                column: *canonical,
            })?;
    }
    let [reviewer, asin, overall, text_col] = idx;

    let mut out = Vec::new();
    for result in reader.records()
    {
        let record = result.map_err(|e| record_error(&e, e.to_string()))?;
        let line = record
            .position()
            .map(|p| p.line())
            .unwrap_or_default();

        let raw_rating = record.get(overall).unwrap_or("").trim();
        let rating: f64 = raw_rating.parse().map_err(|_| LoadError::Record {
            line,
            reason: format!("overall `{raw_rating}` is not a number"),
        })?;
        if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating)
        {
            return Err(LoadError::Record {
                line,
                reason: format!("overall {rating} outside [{MIN_RATING}, {MAX_RATING}]"),
            });
        }

        out.push(Review::new(
            record.get(reviewer).unwrap_or(""),
            record.get(asin).unwrap_or(""),
            rating,
            record.get(text_col).unwrap_or(""),
        ));
    }

    Ok(out)
}

fn record_error(
    err: &csv::Error,
    reason: String,
) -> LoadError
{
    let line = err
        .position()
        .map(|p| p.line())
        .unwrap_or_default();
    LoadError::Record { line, reason }
}
