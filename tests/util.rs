//! Shared test utilities for integration tests
//!
//! Provides a small review corpus and lexicon on disk, used across the
//! CLI test files.

use assert_fs::prelude::*;

/// Five reviews over three products. With [`LEXICON`] this yields
/// 15 word occurrences, 10 scored words and the quadrants
/// A1 → pos/pos, B2 → neg/neg, C3 → pos/pos.
pub const REVIEWS: &str = "reviewerID,asin,overall,reviewText\n\
R1,A1,5,\"This game is good, good!\"\n\
R2,A1,2,bad game\n\
R3,B2,1,\"Terrible controls, awful camera. Hated it\"\n\
R4,B2,2,boring and bad\n\
R5,C3,5,\"I loved it, but the ending was sad\"\n";

/// AFINN-style subset
pub const LEXICON: &str = "good\t3\nbad\t-3\nterrible\t-3\nawful\t-3\nhate\t-3\nboring\t-3\nlove\t3\nsad\t-2\n";

/// Temp dir holding `reviews.csv` and `afinn.tsv`
pub fn make_corpus() -> assert_fs::TempDir
{
    // Initialize the temporary project root
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("reviews.csv")
        .write_str(REVIEWS)
        .expect("write reviews");
    tmp.child("afinn.tsv")
        .write_str(LEXICON)
        .expect("write lexicon");

    // Return the prepared directory to the caller
    tmp
}
