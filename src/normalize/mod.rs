//! Record normalization module
//!
//! # Overview
//!
//! Provider records nest objects and lists several levels deep. These
//! functions reshape them into flat rows:
//! - [`flatten`] promotes nested object fields to `parent__child` keys
//! - [`explode`] and [`explode_pair`] turn list fields into one row per element
//! - [`pivot_list`] turns a list of keyed entries into columns
//! - [`flatten_sequence`] removes nesting from a list of lists
//!
//! Every function leaves its input untouched and returns new records.

mod explode;
mod flatten;

pub use explode::{explode, explode_pair, pivot_list};
pub use flatten::{flatten, flatten_record, flatten_sequence, KEY_SEPARATOR};
