//! Command line argument parsing for the Saffron CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Saffron - bilingual product search and category recommendation
#[derive(Parser, Debug, Clone)]
#[command(name = "saffron")]
#[command(about = "Bilingual product search and category recommendation for a food catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SaffronArgs {
    /// Verbosity level (repeat for more: -v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, env = "SAFFRON_CONFIG", value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Directory for trained artifacts (overrides the configuration file)
    #[arg(short, long, env = "SAFFRON_DATA_DIR", value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SaffronArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n + 1,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Rebuild the search index from a product catalog
    #[command(name = "train-search")]
    TrainSearch(TrainSearchArgs),

    /// Retrain the category classifier from labelled purchase histories
    #[command(name = "train-recommend")]
    TrainRecommend(TrainRecommendArgs),

    /// Search products
    Search(SearchArgs),

    /// Find products similar to a product
    Related(RelatedArgs),

    /// Recommend categories for a purchase history
    Recommend(RecommendArgs),

    /// Show which artifacts are loaded
    Status,
}

/// Arguments for training the search index
#[derive(Parser, Debug, Clone)]
pub struct TrainSearchArgs {
    /// JSON array of products: {id, name?, description?, details?}
    #[arg(value_name = "PRODUCTS_FILE")]
    pub products_file: PathBuf,
}

/// Arguments for training the classifier
#[derive(Parser, Debug, Clone)]
pub struct TrainRecommendArgs {
    /// JSON training samples: {"training_samples": [...]} or a bare array
    #[arg(value_name = "SAMPLES_FILE")]
    pub samples_file: PathBuf,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show similarity scores
    #[arg(long)]
    pub scores: bool,
}

/// Arguments for related products
#[derive(Parser, Debug, Clone)]
pub struct RelatedArgs {
    /// Product id
    #[arg(value_name = "PRODUCT_ID", allow_negative_numbers = true)]
    pub product_id: i64,

    /// Maximum number of results to return
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Show similarity scores
    #[arg(long)]
    pub scores: bool,
}

/// Arguments for category recommendation
#[derive(Parser, Debug, Clone)]
pub struct RecommendArgs {
    /// Aggregated text of the products the user bought
    #[arg(value_name = "PURCHASE_HISTORY")]
    pub purchase_history: String,

    /// Maximum number of categories to return
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
