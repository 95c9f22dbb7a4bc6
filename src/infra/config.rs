use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};
use crate::core::aggregate::ViewThresholds;
use crate::core::quadrant::{DEFAULT_X_MID, DEFAULT_Y_MID, Thresholds};

/// Config file names, checked in this order in the working directory
const CONFIG_PATHS: [&str; 4] = ["revsent.toml", "revsent.yaml", "revsent.json", ".revsent.toml"];

/// Environment prefix; nested keys use `__` (e.g. `REVSENT__QUADRANT__X_MID`)
const ENV_PREFIX: &str = "REVSENT";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config
{
    /// Reference data locations
    pub resources: ResourcesConfig,

    /// Loader behavior
    pub pipeline: PipelineConfig,

    /// Quadrant midpoints
    pub quadrant: QuadrantConfig,

    /// Word view thresholds
    pub words: WordsConfig,

    /// Report output
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig
{
    /// Lexicon file (`word<TAB>score`); `~` and `$VAR` are expanded
    pub lexicon: Option<String>,
    /// Stopword file, one word per line; built-in English list when unset
    pub stopwords: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig
{
    /// Accept a review file with a header and no records
    pub allow_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuadrantConfig
{
    pub x_mid: f64,
    pub y_mid: f64,
}

impl Default for QuadrantConfig
{
    fn default() -> Self
    {
        Self { x_mid: DEFAULT_X_MID, y_mid: DEFAULT_Y_MID }
    }
}

impl From<&QuadrantConfig> for Thresholds
{
    fn from(q: &QuadrantConfig) -> Self
    {
        Thresholds { x_mid: q.x_mid, y_mid: q.y_mid }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WordsConfig
{
    /// Rows shown per word view
    pub top: usize,
    pub positive_min_count: usize,
    pub negative_min_count: usize,
}

impl Default for WordsConfig
{
    fn default() -> Self
    {
        let t = ViewThresholds::default();
        Self {
            top: 20,
            positive_min_count: t.positive_min_count,
            negative_min_count: t.negative_min_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig
{
    /// Directory for words.csv, products.csv and quadrants.csv
    pub dir: PathBuf,
}

impl Default for OutputConfig
{
    fn default() -> Self
    {
        Self { dir: PathBuf::from("revsent-out") }
    }
}

/// Expand `~` and `$VAR` in a configured path.
pub fn expand_path(raw: &str) -> Result<PathBuf>
{
    let expanded = shellexpand::full(raw).with_context(|| format!("Failed to expand path {raw}"))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

pub fn load_config() -> Result<Config>
{
    load_config_from(Path::new("."))
}

/// Layered load: first config file found in `dir`, then environment.
pub fn load_config_from(dir: &Path) -> Result<Config>
{
    let mut builder = config::Config::builder();

    for name in &CONFIG_PATHS
    {
        let path = dir.join(name);
        if path.exists()
        {
            builder = builder.add_source(config::File::from(path));
            break;
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let cfg = builder
        .build()
        .context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(
    args: InitArgs,
    ctx: &AppContext,
) -> Result<()>
{
    let config_path = args
        .path
        .join("revsent.toml");

    if config_path.exists() && !args.force
    {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    if ctx.dry_run
    {
        if !ctx.quiet
        {
            println!("DRY RUN: would write {}:\n{toml_string}", config_path.display());
        }
        return Ok(());
    }

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet
    {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}
