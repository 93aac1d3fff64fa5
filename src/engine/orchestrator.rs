//! Concurrent fan-out with fail-fast cancellation
//!
//! One task per window runs on a [`JoinSet`]. Results are collected in
//! completion order; the first failure cancels the shared token, aborts the
//! remaining tasks and is returned as-is. There is no partial success.

use super::observer::{FetchObserver, TracingObserver};
use crate::error::{Error, Result};
use crate::partition::Window;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Runs one fetch task per window
///
/// An orchestrator serves a single run: once a task fails its token stays
/// cancelled. Tasks should observe [`Orchestrator::token`] so they stop at
/// the next request boundary.
pub struct Orchestrator {
    observer: Arc<dyn FetchObserver>,
    token: CancellationToken,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Orchestrator {
    /// Create an orchestrator with a fresh token and the tracing observer
    pub fn new() -> Self {
        Self {
            observer: Arc::new(TracingObserver),
            token: CancellationToken::new(),
        }
    }

    /// Use a specific observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Use a specific cancellation token
    #[must_use]
    pub fn with_token(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Token shared by every task of this run
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Run every task concurrently and merge their items
    ///
    /// Items are appended in the order tasks complete. A panicking task is
    /// reported as [`Error::TaskFailed`].
    pub async fn run_all<T, F>(&self, tasks: Vec<(Window, F)>) -> Result<Vec<T>>
    where
        T: Send + 'static,
        F: Future<Output = Result<Vec<T>>> + Send + 'static,
    {
        let total = tasks.len();
        let mut set = JoinSet::new();

        for (window, task) in tasks {
            self.observer.on_spawn(&window);
            set.spawn(async move {
                let result = match AssertUnwindSafe(task).catch_unwind().await {
                    Ok(result) => result,
                    Err(panic) => Err(Error::task_failed(panic_message(&*panic))),
                };
                (window, result)
            });
        }

        let mut items = Vec::new();
        while let Some(joined) = set.join_next().await {
            let (window, result) = match joined {
                Ok(pair) => pair,
                Err(e) => {
                    self.token.cancel();
                    set.abort_all();
                    return Err(Error::task_failed(e.to_string()));
                }
            };

            match result {
                Ok(batch) => {
                    self.observer.on_window_done(&window, batch.len());
                    items.extend(batch);
                }
                Err(err) => {
                    self.token.cancel();
                    set.abort_all();
                    self.observer.on_failure(&window, &err);
                    return Err(err);
                }
            }
        }

        self.observer.on_complete(total, items.len());
        Ok(items)
    }
}

fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("task panicked: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("task panicked: {s}")
    } else {
        "task panicked".to_string()
    }
}
