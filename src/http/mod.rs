//! HTTP transport module
//!
//! Provides the JSON-over-POST transport shared by every fetch task.
//!
//! # Features
//!
//! - **Header bag**: opaque credential headers sent with every request
//! - **Timeouts**: per-request timeout surfaced as [`crate::Error::Timeout`]
//! - **Transport seam**: [`Transport`] lets tests and callers swap the client

mod client;
mod transport;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use transport::{JsonResponse, Transport};

#[cfg(test)]
mod tests;
