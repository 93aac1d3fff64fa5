//! Execution engine module
//!
//! Time-partitioned concurrent fetching.
//!
//! # Overview
//!
//! The engine module provides:
//! - `paginate` - Drives one window through its pagination protocol
//! - `Orchestrator` - Fans out one task per window with fail-fast cancellation
//! - `FetchEngine` - Plans windows for an endpoint and runs the fan-out
//! - `FetchObserver` - Injected lifecycle hooks (`TracingObserver` by default)

mod observer;
mod orchestrator;
mod paginate;
mod types;

pub use observer::{FetchObserver, NoopObserver, TracingObserver};
pub use orchestrator::Orchestrator;
pub use paginate::paginate;
pub use types::{FetchReport, FetchStats};

use crate::decode::RecordDecoder;
use crate::endpoint::EndpointDefinition;
use crate::error::Result;
use crate::http::Transport;
use crate::pagination::Paginator;
use crate::partition::{TimeRange, Window};
use crate::request::RequestBuilder;
use crate::types::{Method, Record};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Fetch engine for endpoint definitions
///
/// Holds the shared transport and a root cancellation token. Every run gets
/// a child token, so cancelling the root stops all runs while a failed run
/// does not poison later ones.
pub struct FetchEngine {
    transport: Arc<dyn Transport>,
    observer: Arc<dyn FetchObserver>,
    token: CancellationToken,
}

impl FetchEngine {
    /// Create a new engine over a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            observer: Arc::new(TracingObserver),
            token: CancellationToken::new(),
        }
    }

    /// Set the observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Set the root cancellation token
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Root cancellation token
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Shared transport
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Windows the endpoint's policy produces for a range
    pub fn plan(&self, endpoint: &EndpointDefinition, range: &TimeRange) -> Result<Vec<Window>> {
        endpoint.window.planner()?.windows(range)
    }

    /// Fetch an endpoint over a time range, one concurrent task per window
    pub async fn fetch_endpoint(
        &self,
        endpoint: &EndpointDefinition,
        range: &TimeRange,
    ) -> Result<FetchReport> {
        let start = Instant::now();
        let windows = self.plan(endpoint, range)?;
        info!(
            endpoint = %endpoint.name,
            range = %range,
            windows = windows.len(),
            "Starting fetch"
        );

        let orchestrator = Orchestrator::new()
            .with_observer(Arc::clone(&self.observer))
            .with_token(self.token.child_token());

        let builder: Arc<dyn RequestBuilder> = Arc::new(endpoint.body.clone());
        let decoder: Arc<dyn RecordDecoder> = Arc::new(endpoint.decoder());
        let paginator = endpoint.pagination.build();

        let tasks: Vec<_> = windows
            .iter()
            .map(|window| {
                let task = window_task(
                    Arc::clone(&self.transport),
                    endpoint.method,
                    endpoint.url.clone(),
                    *window,
                    Arc::clone(&builder),
                    Arc::clone(&decoder),
                    Arc::clone(&paginator),
                    orchestrator.token().clone(),
                );
                (*window, task)
            })
            .collect();

        let records = orchestrator.run_all(tasks).await?;

        let mut stats = FetchStats::new().with_windows(windows.len());
        stats.add_records(records.len());
        stats.set_duration(start.elapsed().as_millis() as u64);

        info!(
            endpoint = %endpoint.name,
            records = stats.records,
            duration_ms = stats.duration_ms,
            "Fetch complete"
        );

        Ok(FetchReport {
            endpoint: endpoint.name.clone(),
            windows,
            records,
            stats,
        })
    }

    /// Fetch an endpoint without a time window (catalog and lookup methods)
    pub async fn fetch_all(&self, endpoint: &EndpointDefinition) -> Result<Vec<Record>> {
        let paginator = endpoint.pagination.build();
        let records = paginate(
            self.transport.as_ref(),
            endpoint.method,
            &endpoint.url,
            None,
            &endpoint.body,
            &endpoint.decoder(),
            paginator.as_ref(),
            &self.token,
        )
        .await?;

        info!(endpoint = %endpoint.name, records = records.len(), "Fetched endpoint");
        Ok(records)
    }
}

#[allow(clippy::too_many_arguments)]
async fn window_task(
    transport: Arc<dyn Transport>,
    method: Method,
    url: String,
    window: Window,
    builder: Arc<dyn RequestBuilder>,
    decoder: Arc<dyn RecordDecoder>,
    paginator: Arc<dyn Paginator>,
    token: CancellationToken,
) -> Result<Vec<Record>> {
    paginate(
        transport.as_ref(),
        method,
        &url,
        Some(&window),
        builder.as_ref(),
        decoder.as_ref(),
        paginator.as_ref(),
        &token,
    )
    .await
}
