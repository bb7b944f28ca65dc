//! CLI interface for hirepilot

use crate::config::OutputFormat;
use crate::processing::categorizer::Category;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hirepilot")]
#[command(about = "Candidate scoring and shortlist selection tool")]
#[command(long_about = "Rank applicants by weighted role fit, pick a diverse five-person shortlist within a salary budget, and explain each pick")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List candidates ordered by score
    Rank {
        /// Path to candidates file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Only show candidates matching this text
        #[arg(short, long)]
        search: Option<String>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to output.page_size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Override a category weight, e.g. "frontend=1.5" (repeatable)
        #[arg(short, long = "weight", value_parser = parse_weight_override)]
        weights: Vec<(Category, f64)>,

        /// Hide names and emails
        #[arg(long)]
        blind: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Auto-pick a diverse shortlist of five
    Pick {
        /// Path to candidates file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Only pick from candidates matching this text
        #[arg(short, long)]
        search: Option<String>,

        /// Target average salary (0 disables budget repair)
        #[arg(short, long)]
        budget: Option<u64>,

        /// Ignore region novelty when picking
        #[arg(long)]
        no_diversity: bool,

        /// Override a category weight, e.g. "backend=0.5" (repeatable)
        #[arg(short, long = "weight", value_parser = parse_weight_override)]
        weights: Vec<(Category, f64)>,

        /// Add a candidate by email after auto-pick (repeatable)
        #[arg(long)]
        include: Vec<String>,

        /// Drop a candidate by email after auto-pick (repeatable)
        #[arg(long)]
        exclude: Vec<String>,

        /// Hide names and emails
        #[arg(long)]
        blind: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Write the shortlist as JSON to this file, or a generated name in this directory
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Explain why a candidate stands out
    Explain {
        /// Path to candidates file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Candidate email or zero-based position in the file
        candidate: String,

        /// Hide the name and email
        #[arg(long)]
        blind: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show candidate counts per region alongside the shortlist
    Snapshot {
        /// Path to candidates file (JSON array)
        #[arg(short, long)]
        input: PathBuf,

        /// Exported shortlist to summarize instead of a fresh auto-pick
        #[arg(long)]
        shortlist: Option<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "scoring.frontend")
        key: String,

        /// Configuration value
        value: String,
    },

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    format.parse().map_err(|e: crate::error::HirePilotError| e.to_string())
}

/// Parse a `category=weight` override
pub fn parse_weight_override(raw: &str) -> Result<(Category, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("Expected CATEGORY=WEIGHT, got: {}", raw))?;

    let category: Category = name.parse().map_err(|e: crate::error::HirePilotError| e.to_string())?;
    if category.base_priority().is_none() {
        return Err(format!("Category {} has no weight", category));
    }

    let weight: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid weight: {}", value))?;
    Ok((category, weight))
}
