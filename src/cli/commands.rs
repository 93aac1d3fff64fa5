//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Windowed concurrent fetcher for seller API endpoints
#[derive(Parser, Debug)]
#[command(name = "windowfetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Extra request header (`KEY=VALUE`, repeatable)
    #[arg(short = 'H', long = "header", global = true, value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available endpoints
    List,

    /// Show the window plan for a range without fetching
    Windows {
        /// Endpoint name or alias
        endpoint: String,

        /// Range start (`2023-01-01` or RFC 3339)
        #[arg(long)]
        since: String,

        /// Range end (`today` and `now` are accepted)
        #[arg(long, default_value = "now")]
        to: String,
    },

    /// Fetch an endpoint over a range
    Fetch {
        /// Endpoint name or alias
        endpoint: String,

        /// Range start; omit for unwindowed endpoints
        #[arg(long)]
        since: Option<String>,

        /// Range end (`today` and `now` are accepted)
        #[arg(long, default_value = "now")]
        to: String,

        /// Status filter (empty means all)
        #[arg(long)]
        status: Option<String>,

        /// Explode a list field into one record per element
        #[arg(long)]
        explode: Option<String>,

        /// Promote nested objects to top-level `a__b` keys
        #[arg(long)]
        flatten: bool,

        /// Write records to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fetch and merge the product catalog
    Catalog {
        /// Join on this field instead of pairing by position
        #[arg(long, default_value = "product_id")]
        merge_key: String,

        /// Pair sources by position instead (requires equal lengths)
        #[arg(long)]
        positional: bool,

        /// Write records to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List seller warehouses
    Warehouses {
        /// Shape of the listing
        #[arg(long, value_enum, default_value = "full")]
        by: WarehouseListing,

        /// Write records to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Shape of the warehouse listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WarehouseListing {
    /// One record per warehouse as returned
    Full,
    /// A single list of warehouse ids
    Id,
    /// A single object mapping warehouse id to name
    IdName,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Human-readable output
    Pretty,
}

fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("empty header name in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
