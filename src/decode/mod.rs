//! Response decoder module
//!
//! # Overview
//!
//! Turns a parsed JSON response into the list of records found at the
//! endpoint's record path, and recognises provider error payloads. Paths use
//! dot notation with optional array indices (`result.postings`,
//! `$.data.items[0]`, `items[-1]`).

mod decoders;
mod remote;
mod types;

pub use decoders::{extract_path, JsonDecoder};
pub use remote::check_remote_error;
pub use types::RecordDecoder;

#[cfg(test)]
mod tests;
