//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use engine_logging::LogDestination;
use log::LevelFilter;

use crate::platform::input::parse_price_bound;

#[derive(Debug, Parser)]
#[command(
    name = "pharma",
    version,
    about = "Search pharmacy catalogs and compare prices"
)]
pub struct Cli {
    /// Base URL of the search service.
    #[arg(long, env = "PHARMA_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Seconds to wait for a search before giving up.
    #[arg(long, env = "PHARMA_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,

    /// Settings file (RON). Defaults to ./pharma.ron when it exists.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal, global = true)]
    pub log: LogTarget,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one search and print the comparison cards.
    Search(SearchArgs),
    /// Search and refine filters interactively.
    #[command(alias = "i")]
    Interactive,
    /// List the pharmacies the catalog knows about.
    Pharmacies,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Product keyword, e.g. "paracetamol".
    pub keyword: String,

    /// Keep products whose name contains this text (case-insensitive).
    #[arg(long)]
    pub name: Option<String>,

    /// Keep products from this pharmacy only.
    #[arg(long)]
    pub pharmacy: Option<String>,

    /// Keep products priced at or below this amount.
    #[arg(long, value_parser = parse_price_bound)]
    pub max_price: Option<f64>,

    /// Keep products that have a regular price to compare against.
    #[arg(long)]
    pub offers_only: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
