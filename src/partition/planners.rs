//! Window planner implementations
//!
//! Each planner handles a specific partitioning strategy.

use super::types::{TimeRange, Window, WindowPlanner};
use crate::error::{Error, Result};
use chrono::{DateTime, Duration, Months, NaiveDate, NaiveDateTime, Utc};

// ============================================================================
// Interval Split
// ============================================================================

/// Split a range into the fewest equal parts no longer than `max_span`.
///
/// Returns `(count, step)` with `count = ceil(D / max_span)` and
/// `step = D / count`. The remainder is spread over every window instead of
/// leaving a short final one. Counting happens at microsecond resolution.
pub fn split_interval(range: &TimeRange, max_span: Duration) -> Result<(u32, Duration)> {
    let total = range.duration();

    let total_us = total
        .num_microseconds()
        .ok_or_else(|| Error::invalid_range(format!("range {range} is too long")))?;
    let span_us = max_span
        .num_microseconds()
        .ok_or_else(|| Error::invalid_range("max span is too long"))?;

    if span_us <= 0 {
        return Err(Error::invalid_range(format!(
            "max span must be positive, got {max_span}"
        )));
    }
    if total_us <= 0 {
        return Err(Error::invalid_range(format!("range {range} is empty")));
    }

    let count = (total_us as u64).div_ceil(span_us as u64);
    let count = i32::try_from(count)
        .map_err(|_| Error::invalid_range(format!("range {range} needs {count} windows")))?;

    Ok((count as u32, total / count))
}

// ============================================================================
// Even Splitter
// ============================================================================

/// Equal-subdivision planner bounded by a maximum span
///
/// Consecutive windows are separated by `gap` so that a record stamped
/// exactly on a boundary is not returned twice.
#[derive(Debug, Clone)]
pub struct EvenSplitter {
    /// Maximum span of one window
    max_span: Duration,
    /// Gap between the end of one window and the start of the next
    gap: Duration,
}

impl EvenSplitter {
    /// Create a new even splitter
    pub fn new(max_span: Duration, gap: Duration) -> Self {
        Self { max_span, gap }
    }

    /// Create an even splitter with the default one-second gap
    pub fn with_max_span(max_span: Duration) -> Self {
        Self::new(max_span, Duration::seconds(1))
    }
}

impl WindowPlanner for EvenSplitter {
    fn windows(&self, range: &TimeRange) -> Result<Vec<Window>> {
        let (count, step) = split_interval(range, self.max_span)?;
        let mut windows = Vec::with_capacity(count as usize);
        let mut cursor = range.since();

        for index in 0..count as usize {
            // The accumulated gaps can push late windows past the end
            if cursor >= range.to() {
                break;
            }
            let end = std::cmp::min(cursor + step, range.to());
            windows.push(Window::new(index, cursor, end));
            cursor = (cursor + step)
                .checked_add_signed(self.gap)
                .ok_or_else(|| Error::invalid_range(format!("gap {} is too long", self.gap)))?;
        }

        Ok(windows)
    }
}

// ============================================================================
// Calendar Month Splitter
// ============================================================================

/// Calendar-month planner
///
/// Windows are `months` calendar months long; each next window starts one
/// period plus `gap` after the previous start.
#[derive(Debug, Clone)]
pub struct CalendarMonthSplitter {
    months: u32,
    gap: Duration,
}

impl CalendarMonthSplitter {
    /// Create a new calendar month splitter
    pub fn new(months: u32, gap: Duration) -> Self {
        Self { months, gap }
    }

    /// One-month windows separated by one day
    pub fn monthly() -> Self {
        Self::new(1, Duration::days(1))
    }
}

impl WindowPlanner for CalendarMonthSplitter {
    fn windows(&self, range: &TimeRange) -> Result<Vec<Window>> {
        let mut windows = Vec::new();
        let mut start = range.since();

        while start < range.to() {
            let next = start
                .checked_add_months(Months::new(self.months))
                .ok_or_else(|| Error::invalid_range(format!("cannot advance {start} by months")))?;
            windows.push(Window::new(
                windows.len(),
                start,
                std::cmp::min(next, range.to()),
            ));
            start = next
                .checked_add_signed(self.gap)
                .ok_or_else(|| Error::invalid_range(format!("gap {} is too long", self.gap)))?;
        }

        Ok(windows)
    }
}

// ============================================================================
// Single Window
// ============================================================================

/// The whole range as one window
#[derive(Debug, Clone, Default)]
pub struct SingleWindow;

impl WindowPlanner for SingleWindow {
    fn windows(&self, range: &TimeRange) -> Result<Vec<Window>> {
        Ok(vec![Window::new(0, range.since(), range.to())])
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse a datetime string into UTC DateTime
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();

    // Try RFC 3339 first
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    // Try common formats
    let formats = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%Y.%m.%d",
        "%Y/%m/%d",
    ];

    for fmt in formats {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(DateTime::from_naive_utc_and_offset(ndt, Utc));
        }
        if let Some(ndt) = NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|nd| nd.and_hms_opt(0, 0, 0))
        {
            return Ok(DateTime::from_naive_utc_and_offset(ndt, Utc));
        }
    }

    Err(Error::config(format!("Invalid datetime format: {s}")))
}

/// Parse an upper bound, accepting the `today` and `now` sentinels
pub(crate) fn parse_bound(s: &str) -> Result<DateTime<Utc>> {
    match s.trim() {
        "today" | "now" => Ok(Utc::now()),
        other => parse_datetime(other),
    }
}

/// Parse a duration string like "1d", "2h", "30m"
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim();

    // Try to parse as number with suffix using strip_suffix
    let (num_str, suffix) = if let Some(stripped) = s.strip_suffix('d') {
        (stripped, 'd')
    } else if let Some(stripped) = s.strip_suffix('h') {
        (stripped, 'h')
    } else if let Some(stripped) = s.strip_suffix('m') {
        (stripped, 'm')
    } else if let Some(stripped) = s.strip_suffix('s') {
        (stripped, 's')
    } else if let Some(stripped) = s.strip_suffix('w') {
        (stripped, 'w')
    } else {
        // Assume days if no suffix
        (s, 'd')
    };

    let num: i64 = num_str
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("Invalid duration number: {num_str}")))?;

    if num < 0 {
        return Err(Error::config(format!("Negative duration: {s}")));
    }

    let duration = match suffix {
        'w' => Duration::try_weeks(num),
        'd' => Duration::try_days(num),
        'h' => Duration::try_hours(num),
        'm' => Duration::try_minutes(num),
        's' => Duration::try_seconds(num),
        _ => return Err(Error::config(format!("Invalid duration suffix: {suffix}"))),
    };

    duration.ok_or_else(|| Error::config(format!("Duration out of range: {s}")))
}
