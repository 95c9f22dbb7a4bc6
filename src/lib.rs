//! **revsent** - lexicon-based sentiment scoring for product review corpora
//!
//! Tokenizes review text, joins words against a stemmed sentiment lexicon,
//! and summarizes lexicon sentiment against star ratings per word and per
//! product, labelling each product with a rating/sentiment quadrant.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Scoring pipeline, leaf stages first
pub mod core {
    /// Review table loading and validation
    pub mod loader;
    pub use loader::{LoadError, Review, load_reviews};

    /// Text → filtered word occurrences
    pub mod tokenize;
    pub use tokenize::{StopWords, Tokenizer, WordOccurrence};

    /// Porter stemmer shared by lexicon and join
    pub mod stem;
    pub use stem::{PorterStemmer, Stemmer};

    /// word → score lexicon reduced to stem → score
    pub mod lexicon;
    pub use lexicon::{NormalizedLexicon, RawLexicon};

    /// Inner join of occurrences against the lexicon
    pub mod join;
    pub use join::{ScoredWord, SentimentJoiner};

    /// Per-word and per-product summaries plus word views
    pub mod aggregate;
    pub use aggregate::{ProductSummary, WordSummary, WordView};

    /// Rating/sentiment quadrant labels
    pub mod quadrant;
    pub use quadrant::{ClassifiedProduct, Quadrant, Thresholds};

    /// Stage wiring and run report
    pub mod pipeline;
    pub use pipeline::{Pipeline, Report};

    /// Terminal tables, CSV and JSON
    pub mod render;

    /// analyze / words / products entry points
    pub mod commands;
    pub use commands::{run_analyze as analyze_run, run_products as products_run, run_words as words_run};
}

/// Infrastructure - configuration, I/O, resources and logging
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Memory-mapped reads for large files, atomic writes
    pub mod io;
    pub use io::{FileContent, read_file_smart};

    /// Lexicon and stopword files
    pub mod resources;
    pub use resources::{ResourceError, load_lexicon, load_stopwords};

    /// tracing subscriber setup
    pub mod logging;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{analyze_run, products_run, words_run};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::{Pipeline, Quadrant, Report, Review, ScoredWord, WordSummary};
