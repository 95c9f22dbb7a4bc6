use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::aggregate::WordView;
use crate::core::quadrant::Quadrant;

/// Shared application context for global flags
#[derive(Clone, Debug, Default)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
    pub dry_run: bool,  // global --dry-run
}

#[derive(Parser)]
#[command(name = "revsent")]
#[command(about = "Lexicon-based sentiment scoring for product review corpora")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Suppress progress spinners and non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Show resolved settings without reading any input
    #[arg(long, global = true)]
    pub dry_run: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full pipeline and write word, product and quadrant tables
    Analyze(AnalyzeArgs),

    /// Show a view of the per-word summary table
    Words(WordsArgs),

    /// Show per-product summaries with quadrant labels
    Products(ProductsArgs),

    /// Initialize a revsent.toml config file
    Init(InitArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Input and reference data shared by every pipeline command
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Review table (CSV with reviewerID, asin, overall, reviewText)
    pub input: PathBuf,

    /// Lexicon file (word<TAB>score); overrides resources.lexicon
    #[arg(short, long)]
    pub lexicon: Option<PathBuf>,

    /// Stopword file, one word per line; overrides resources.stopwords
    #[arg(short, long)]
    pub stopwords: Option<PathBuf>,

    /// Treat a header-only review file as an empty corpus
    #[arg(long)]
    pub allow_empty: bool,
}

/// Quadrant midpoints; unset values fall back to config
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Rating midpoint
    #[arg(long, allow_negative_numbers = true)]
    pub x_mid: Option<f64>,

    /// Sentiment midpoint
    #[arg(long, allow_negative_numbers = true)]
    pub y_mid: Option<f64>,
}

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Directory for words.csv, products.csv and quadrants.csv
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Print the full report as JSON instead of writing tables
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct WordsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Which slice of the word table to show
    #[arg(long, value_enum, default_value = "common")]
    pub view: WordView,

    /// Number of rows to show
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Positive words need a count above this
    #[arg(long)]
    pub positive_min_count: Option<usize>,

    /// Negative words need a count above this
    #[arg(long)]
    pub negative_min_count: Option<usize>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Only show products in this quadrant
    #[arg(long, value_enum)]
    pub quadrant: Option<Quadrant>,

    /// Emit JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct InitArgs {
    /// Directory to initialize config in
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing config file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Parser)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,

    /// Output directory; if omitted and --stdout not set, prints error
    #[arg(long)]
    pub out_dir: Option<PathBuf>,

    /// Print completion script to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,
}
