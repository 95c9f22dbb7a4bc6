//! Table rendering for terminal, CSV and JSON outputs.

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::cli::AppContext;
use crate::core::aggregate::WordSummary;
use crate::core::pipeline::RunStats;
use crate::core::quadrant::{ClassifiedProduct, QuadrantCount};

#[derive(Tabled)]
struct WordRow
{
    word: String,
    count: usize,
    #[tabled(rename = "mean rating")]
    mean_rating: String,
    #[tabled(rename = "max score")]
    score: String,
}

#[derive(Tabled)]
struct ProductRow
{
    product: String,
    words: usize,
    #[tabled(rename = "mean rating")]
    mean_rating: String,
    sentiment: String,
    quadrant: String,
}

#[derive(Tabled)]
struct QuadrantRow
{
    quadrant: String,
    products: usize,
}

pub fn heading(
    text: &str,
    ctx: &AppContext,
) -> String
{
    if ctx.no_color
    {
        text.to_string()
    }
    else
    {
        text.bold()
            .cyan()
            .to_string()
    }
}

pub fn words_table(words: &[WordSummary]) -> String
{
    let rows = words.iter().map(|w| WordRow {
        word: w.word.clone(),
        count: w.count,
        mean_rating: format!("{:.3}", w.mean_rating),
        score: format!("{}", w.score),
    });
    Table::new(rows)
        .with(Style::rounded())
        .to_string()
}

pub fn products_table(products: &[ClassifiedProduct]) -> String
{
    let rows = products.iter().map(|p| ProductRow {
        product: p.product_id.clone(),
        words: p.count,
        mean_rating: format!("{:.3}", p.mean_rating),
        sentiment: format!("{:.3}", p.sentiment),
        quadrant: p.quadrant.to_string(),
    });
    Table::new(rows)
        .with(Style::rounded())
        .to_string()
}

pub fn quadrants_table(counts: &[QuadrantCount]) -> String
{
    let rows = counts.iter().map(|c| QuadrantRow {
        quadrant: c.quadrant.to_string(),
        products: c.products,
    });
    Table::new(rows)
        .with(Style::rounded())
        .to_string()
}

pub fn stats_lines(stats: &RunStats) -> String
{
    format!(
        "reviews: {}\nword occurrences: {}\nscored words: {}\nlexicon: {} entries, {} stems ({} collisions)",
        stats.reviews,
        stats.occurrences,
        stats.scored_words,
        stats.lexicon_entries,
        stats.lexicon_stems,
        stats.lexicon_collisions,
    )
}

/// Serialize rows as CSV. `header` is written for an empty table, where the
/// writer has no record to derive it from.
pub fn to_csv<T: Serialize>(
    rows: &[T],
    header: &[&str],
) -> Result<Vec<u8>>
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    if rows.is_empty()
    {
        writer
            .write_record(header)
            .context("Failed to write CSV header")?;
    }
    for row in rows
    {
        writer
            .serialize(row)
            .context("Failed to serialize CSV row")?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {e}"))
}

pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String>
{
    serde_json::to_string_pretty(value).context("Failed to serialize JSON")
}
