//! Window partitioning module
//!
//! Supports: even splits bounded by a maximum span, calendar-month splits
//!
//! # Overview
//!
//! Providers cap how wide a single date filter may be (one year for posting
//! lists, one calendar month for transaction lists). The planners in this
//! module cut an arbitrary [`TimeRange`] into contiguous [`Window`]s that
//! respect those caps. Each window is later fetched by its own task.

mod planners;
mod types;

pub use planners::{
    parse_datetime, parse_duration, split_interval, CalendarMonthSplitter, EvenSplitter,
    SingleWindow,
};
pub use types::{TimeRange, Window, WindowPlanner, WindowPolicy};
