//! Cross-source merge module
//!
//! # Overview
//!
//! Some datasets are assembled from several provider methods that each
//! return part of a record (catalog ids, prices, stocks, details). The
//! merger overlays those parts into one flat record:
//! - [`merge_positional`] pairs records by position and requires equal lengths
//! - [`merge_by_key`] joins records on a shared identity field
//!
//! Overlay is shallow and the last source wins on conflicting keys.

mod merger;

pub use merger::{merge_by_key, merge_positional, overlay};

#[cfg(test)]
mod tests;
