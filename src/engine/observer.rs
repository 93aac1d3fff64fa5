//! Fan-out observers
//!
//! The orchestrator reports task lifecycle events to an injected observer
//! instead of logging through global state.

use crate::error::Error;
use crate::partition::Window;
use tracing::{debug, error, info};

/// Receives task lifecycle events from the orchestrator
pub trait FetchObserver: Send + Sync {
    /// A task was spawned for `window`
    fn on_spawn(&self, _window: &Window) {}

    /// The task for `window` finished with `records` records
    fn on_window_done(&self, _window: &Window, _records: usize) {}

    /// The task for `window` failed; the run is being cancelled
    fn on_failure(&self, _window: &Window, _error: &Error) {}

    /// Every task finished successfully
    fn on_complete(&self, _windows: usize, _records: usize) {}
}

/// Observer that forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FetchObserver for TracingObserver {
    fn on_spawn(&self, window: &Window) {
        debug!(window = %window, "Spawned fetch task");
    }

    fn on_window_done(&self, window: &Window, records: usize) {
        info!(window = %window, records, "Window fetched");
    }

    fn on_failure(&self, window: &Window, err: &Error) {
        error!(window = %window, error = %err, "Window failed, cancelling remaining tasks");
    }

    fn on_complete(&self, windows: usize, records: usize) {
        info!(windows, records, "All windows fetched");
    }
}

/// Observer that ignores every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl FetchObserver for NoopObserver {}
