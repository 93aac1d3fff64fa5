// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_self)]

//! # windowfetch
//!
//! Time-partitioned concurrent fetching for paginated seller APIs.
//!
//! ## Features
//!
//! - **Window Planning**: Cut a date range into even or calendar-month windows
//! - **Pagination**: Count, has-next flag, page count and last-id protocols
//! - **Fail-fast Fan-out**: One task per window, the first failure cancels the rest
//! - **Normalization**: Flatten nested objects, explode lists, pivot keyed entries
//! - **Merging**: Combine parallel sources by position or by key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use windowfetch::{connectors, FetchEngine, HttpClient, Settings, TimeRange};
//!
//! #[tokio::main]
//! async fn main() -> windowfetch::Result<()> {
//!     let settings = Settings::default().with_header("Client-Id", "836");
//!     let client = HttpClient::with_config(settings.http_config())?;
//!     let engine = FetchEngine::new(Arc::new(client));
//!
//!     let range = TimeRange::parse("2023-01-01", "today")?;
//!     let report = engine
//!         .fetch_endpoint(&connectors::fbo_postings("delivered")?, &range)
//!         .await?;
//!
//!     println!("{} records in {} windows", report.len(), report.windows.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                         FetchEngine                          │
//! │   plan(range) → windows    fetch_endpoint → FetchReport      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬───────────┬──────┴──────┬────────────┬───────────┐
//! │ Partition │ Paginate  │ Orchestrate │ Normalize  │  Merge    │
//! ├───────────┼───────────┼─────────────┼────────────┼───────────┤
//! │ Even      │ Count     │ JoinSet     │ Flatten    │ Position  │
//! │ Calendar  │ Flag      │ Fail-fast   │ Explode    │ Key       │
//! │ Single    │ PageCount │ Cancel      │ Pivot      │           │
//! │           │ LastId    │             │            │           │
//! └───────────┴───────────┴─────────────┴────────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP transport
pub mod http;

/// Window planning over time ranges
pub mod partition;

/// Pagination strategies
pub mod pagination;

/// Response decoding
pub mod decode;

/// Request body construction
pub mod request;

/// Endpoint definitions
pub mod endpoint;

/// Built-in endpoint definitions
pub mod connectors;

/// Fan-out execution engine
pub mod engine;

/// Record flattening and explosion
pub mod normalize;

/// Cross-source merging
pub mod merge;

/// Product catalog assembly
pub mod catalog;

/// Run settings
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

pub use config::Settings;
pub use endpoint::EndpointDefinition;
pub use engine::{FetchEngine, FetchReport};
pub use http::{HttpClient, HttpClientConfig};
pub use partition::{TimeRange, Window, WindowPolicy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
