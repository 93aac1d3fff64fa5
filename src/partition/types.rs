//! Partition types and traits
//!
//! Defines the time range, window and planner abstractions.

use super::planners::{
    parse_bound, parse_datetime, parse_duration, CalendarMonthSplitter, EvenSplitter,
    SingleWindow,
};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed time range with `since < to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    since: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl TimeRange {
    /// Create a new range, rejecting empty and inverted ranges
    pub fn new(since: DateTime<Utc>, to: DateTime<Utc>) -> Result<Self> {
        if since >= to {
            return Err(Error::invalid_range(format!(
                "'since' ({since}) must be strictly before 'to' ({to})"
            )));
        }
        Ok(Self { since, to })
    }

    /// Parse a range from strings; `to` may be `today` or `now`
    pub fn parse(since: &str, to: &str) -> Result<Self> {
        Self::new(parse_datetime(since)?, parse_bound(to)?)
    }

    /// Start of the range
    pub fn since(&self) -> DateTime<Utc> {
        self.since
    }

    /// End of the range
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Total length of the range
    pub fn duration(&self) -> Duration {
        self.to - self.since
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --> {}", self.since, self.to)
    }
}

/// One partition of a [`TimeRange`], fetched by a single task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Position of the window in the plan
    pub index: usize,
    /// Window start
    pub start: DateTime<Utc>,
    /// Window end
    pub end: DateTime<Utc>,
}

impl Window {
    /// Create a new window
    pub fn new(index: usize, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { index, start, end }
    }

    /// Span of this window
    pub fn span(&self) -> Duration {
        self.end - self.start
    }

    /// Format the bounds with a chrono format string
    pub fn format_bounds(&self, format: &str) -> (String, String) {
        (
            self.start.format(format).to_string(),
            self.end.format(format).to_string(),
        )
    }

    /// Stable identifier used in logs
    pub fn id(&self) -> String {
        format!("{}_{}", self.index, self.start.format("%Y%m%dT%H%M%S"))
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{} --> {}]", self.index, self.start, self.end)
    }
}

/// Trait for window planners
pub trait WindowPlanner: Send + Sync {
    /// Cut a range into windows
    fn windows(&self, range: &TimeRange) -> Result<Vec<Window>>;
}

/// Serializable description of how an endpoint's range is partitioned
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WindowPolicy {
    /// The whole range is a single window
    #[default]
    Single,

    /// Equal subdivision bounded by `max_span`
    Even {
        /// Maximum span per window (e.g., "365d")
        max_span: String,
        /// Gap inserted between consecutive windows
        #[serde(default = "default_even_gap")]
        gap: String,
    },

    /// Calendar-month windows
    CalendarMonths {
        /// Months per window
        #[serde(default = "default_months")]
        months: u32,
        /// Gap inserted between consecutive windows
        #[serde(default = "default_month_gap")]
        gap: String,
    },
}

fn default_even_gap() -> String {
    "1s".to_string()
}

fn default_month_gap() -> String {
    "1d".to_string()
}

fn default_months() -> u32 {
    1
}

impl WindowPolicy {
    /// Even split policy with the default one-second gap
    pub fn even(max_span: impl Into<String>) -> Self {
        Self::Even {
            max_span: max_span.into(),
            gap: default_even_gap(),
        }
    }

    /// One-calendar-month policy with the default one-day gap
    pub fn monthly() -> Self {
        Self::CalendarMonths {
            months: default_months(),
            gap: default_month_gap(),
        }
    }

    /// Build the planner described by this policy
    pub fn planner(&self) -> Result<Box<dyn WindowPlanner>> {
        Ok(match self {
            Self::Single => Box::new(SingleWindow),
            Self::Even { max_span, gap } => Box::new(EvenSplitter::new(
                parse_duration(max_span)?,
                parse_duration(gap)?,
            )),
            Self::CalendarMonths { months, gap } => {
                if *months == 0 {
                    return Err(Error::invalid_value("months", "must be at least 1"));
                }
                Box::new(CalendarMonthSplitter::new(*months, parse_duration(gap)?))
            }
        })
    }
}
