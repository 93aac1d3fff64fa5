//! Engine types
//!
//! Statistics and reports produced by a fetch run.

use crate::partition::Window;
use crate::types::Record;

/// Statistics from a fetch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// Windows planned (one task each)
    pub windows: usize,
    /// Records collected
    pub records: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Set window count
    #[must_use]
    pub fn with_windows(mut self, windows: usize) -> Self {
        self.windows = windows;
        self
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records += count;
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }
}

/// Result of fetching one endpoint over a time range
#[derive(Debug, Clone)]
pub struct FetchReport {
    /// Endpoint name
    pub endpoint: String,
    /// Windows that were fetched
    pub windows: Vec<Window>,
    /// Records in completion order
    pub records: Vec<Record>,
    /// Run statistics
    pub stats: FetchStats,
}

impl FetchReport {
    /// Number of records collected
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Take the records, dropping the rest of the report
    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}
