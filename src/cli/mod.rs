//! CLI module
//!
//! Command-line interface for fetching endpoints.
//!
//! # Commands
//!
//! - `list` - Show available endpoints
//! - `windows` - Show the window plan for a range
//! - `fetch` - Fetch an endpoint and emit JSON lines
//! - `catalog` - Fetch and merge the product catalog
//! - `warehouses` - List seller warehouses

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat, WarehouseListing};
pub use runner::Runner;
