//! Command entry points: resolve settings, run the pipeline, emit tables.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::info;

use crate::cli::{AnalyzeArgs, AppContext, InputArgs, ProductsArgs, ThresholdArgs, WordsArgs};
use crate::core::aggregate::{ViewThresholds, WordSummary, word_view};
use crate::core::loader::{LoadOptions, Review, load_reviews};
use crate::core::pipeline::{Pipeline, Report};
use crate::core::quadrant::{ClassifiedProduct, QuadrantCount, Thresholds};
use crate::core::render;
use crate::infra::config::{Config, expand_path, load_config};
use crate::infra::io::write_atomic;
use crate::infra::resources::{ResourceError, load_lexicon, load_stopwords};

/// Everything a run needs after CLI flags are layered over config.
#[derive(Debug, Clone)]
pub struct Settings
{
    pub input: PathBuf,
    pub lexicon: PathBuf,
    pub stopwords: Option<PathBuf>,
    pub allow_empty: bool,
    pub thresholds: Thresholds,
}

impl Settings
{
    pub fn resolve(
        input: &InputArgs,
        thresholds: &ThresholdArgs,
        cfg: &Config,
    ) -> Result<Self>
    {
        let lexicon = match (&input.lexicon, &cfg.resources.lexicon)
        {
            (Some(p), _) => p.clone(),
            (None, Some(raw)) => expand_path(raw)?,
            (None, None) => return Err(ResourceError::NoLexicon.into()),
        };
        let stopwords = match (&input.stopwords, &cfg.resources.stopwords)
        {
            (Some(p), _) => Some(p.clone()),
            (None, Some(raw)) => Some(expand_path(raw)?),
            (None, None) => None,
        };

        let base = Thresholds::from(&cfg.quadrant);
        Ok(Self {
            input: input.input.clone(),
            lexicon,
            stopwords,
            allow_empty: input.allow_empty || cfg.pipeline.allow_empty,
            thresholds: Thresholds {
                x_mid: thresholds.x_mid.unwrap_or(base.x_mid),
                y_mid: thresholds.y_mid.unwrap_or(base.y_mid),
            },
        })
    }

    fn describe(&self) -> String
    {
        format!(
            "  Input: {}\n  Lexicon: {}\n  Stopwords: {}\n  Allow empty: {}\n  Midpoints: x={} y={}",
            self.input.display(),
            self.lexicon.display(),
            self.stopwords
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "built-in English".to_string()),
            self.allow_empty,
            self.thresholds.x_mid,
            self.thresholds.y_mid,
        )
    }
}

fn spinner(ctx: &AppContext) -> ProgressBar
{
    if ctx.quiet
    {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Load reference data and reviews, then run every stage.
fn execute(
    settings: &Settings,
    ctx: &AppContext,
) -> Result<Report>
{
    let pb = spinner(ctx);

    pb.set_message("Loading lexicon and stopwords");
    let raw = load_lexicon(&settings.lexicon)?;
    let stopwords = load_stopwords(settings.stopwords.as_deref())?;
    let pipeline = Pipeline::new(Arc::new(stopwords), &raw);

    pb.set_message(format!("Loading {}", settings.input.display()));
    let reviews: Vec<Review> = load_reviews(
        &settings.input,
        LoadOptions { allow_empty: settings.allow_empty },
    )?;

    pb.set_message("Scoring reviews");
    let report = pipeline.run(&reviews, settings.thresholds);

    pb.finish_and_clear();
    info!(
        reviews = report.stats.reviews,
        scored = report.stats.scored_words,
        "pipeline finished"
    );
    Ok(report)
}

/// Returns true when the run should stop after printing settings.
fn dry_run(
    settings: &Settings,
    ctx: &AppContext,
) -> bool
{
    if !ctx.dry_run
    {
        return false;
    }
    if !ctx.quiet
    {
        let title = "DRY RUN: would score:";
        if ctx.no_color
        {
            println!("{title}");
        }
        else
        {
            println!("{}", title.yellow());
        }
        println!("{}", settings.describe());
    }
    true
}

pub const WORDS_FILE: &str = "words.csv";
pub const PRODUCTS_FILE: &str = "products.csv";
pub const QUADRANTS_FILE: &str = "quadrants.csv";

/// Write the three report tables into `dir`.
pub fn write_tables(
    report: &Report,
    dir: &Path,
) -> Result<Vec<PathBuf>>
{
    let outputs = [
        (WORDS_FILE, render::to_csv(&report.words, &WordSummary::COLUMNS)?),
        (PRODUCTS_FILE, render::to_csv(&report.products, &ClassifiedProduct::COLUMNS)?),
        (QUADRANTS_FILE, render::to_csv(&report.quadrants, &QuadrantCount::COLUMNS)?),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (name, bytes) in outputs
    {
        let path = dir.join(name);
        write_atomic(&path, &bytes).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

pub fn run_analyze(
    args: AnalyzeArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config()?;
    let settings = Settings::resolve(&args.input, &args.thresholds, &cfg)?;
    let out_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| cfg.output.dir.clone());

    if dry_run(&settings, ctx)
    {
        if !ctx.quiet && !args.json
        {
            println!("  Output: {}", out_dir.display());
        }
        return Ok(());
    }

    let report = execute(&settings, ctx)?;

    if args.json
    {
        println!("{}", render::to_json(&report)?);
        return Ok(());
    }

    let written = write_tables(&report, &out_dir)?;

    if !ctx.quiet
    {
        println!("{}", render::heading("Run", ctx));
        println!("{}", render::stats_lines(&report.stats));
        println!();
        println!("{}", render::heading("Quadrants", ctx));
        println!("{}", render::quadrants_table(&report.quadrants));
        for path in written
        {
            println!("wrote {}", path.display());
        }
    }
    Ok(())
}

pub fn run_words(
    args: WordsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config()?;
    let settings = Settings::resolve(&args.input, &ThresholdArgs::default(), &cfg)?;
    if dry_run(&settings, ctx)
    {
        return Ok(());
    }

    let report = execute(&settings, ctx)?;
    let thresholds = ViewThresholds {
        positive_min_count: args
            .positive_min_count
            .unwrap_or(cfg.words.positive_min_count),
        negative_min_count: args
            .negative_min_count
            .unwrap_or(cfg.words.negative_min_count),
    };
    let top = args.top.unwrap_or(cfg.words.top);
    let rows = word_view(&report.words, args.view, thresholds, Some(top));

    if args.json
    {
        println!("{}", render::to_json(&rows)?);
    }
    else if !ctx.quiet
    {
        println!("{}", render::words_table(&rows));
    }
    Ok(())
}

pub fn run_products(
    args: ProductsArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let cfg = load_config()?;
    let settings = Settings::resolve(&args.input, &args.thresholds, &cfg)?;
    if dry_run(&settings, ctx)
    {
        return Ok(());
    }

    let report = execute(&settings, ctx)?;
    let rows: Vec<_> = report
        .products
        .into_iter()
        .filter(|p| args.quadrant.is_none_or(|q| p.quadrant == q))
        .collect();

    if args.json
    {
        println!("{}", render::to_json(&rows)?);
    }
    else if !ctx.quiet
    {
        println!("{}", render::products_table(&rows));
    }
    Ok(())
}
