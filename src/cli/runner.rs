//! CLI runner - executes commands

use crate::catalog::{CatalogEndpoints, CatalogFetcher};
use crate::cli::commands::{Cli, Commands, OutputFormat, WarehouseListing};
use crate::config::Settings;
use crate::connectors::{warehouse_ids, warehouse_names};
use crate::engine::FetchEngine;
use crate::error::Result;
use crate::http::HttpClient;
use crate::normalize::{explode, flatten};
use crate::partition::TimeRange;
use crate::types::{CollisionPolicy, Record};
use serde_json::{json, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let settings = self.settings()?;

        match &self.cli.command {
            Commands::List => self.list(&settings),
            Commands::Windows {
                endpoint,
                since,
                to,
            } => self.windows(&settings, endpoint, since, to),
            Commands::Fetch {
                endpoint,
                since,
                to,
                status,
                explode,
                flatten,
                output,
            } => {
                let request = FetchRequest {
                    endpoint,
                    since: since.as_deref(),
                    to,
                    status: status.as_deref(),
                    explode: explode.as_deref(),
                    flatten: *flatten,
                };
                self.fetch(&settings, &request, output.as_deref()).await
            }
            Commands::Catalog {
                merge_key,
                positional,
                output,
            } => {
                let key = (!*positional).then_some(merge_key.as_str());
                self.catalog(&settings, key, output.as_deref()).await
            }
            Commands::Warehouses { by, output } => {
                self.warehouses(&settings, *by, output.as_deref()).await
            }
        }
    }

    /// Settings from `--config` (or defaults) plus `--header` overrides
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.cli.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        for (key, value) in &self.cli.headers {
            settings.headers.insert(key.clone(), value.clone());
        }
        Ok(settings)
    }

    /// Engine over an HTTP client; Ctrl-C cancels every in-flight request
    fn engine(settings: &Settings) -> Result<FetchEngine> {
        let client = HttpClient::with_config(settings.http_config())?;
        let engine = FetchEngine::new(Arc::new(client));

        let token = engine.cancellation_token().clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling in-flight requests");
                token.cancel();
            }
        });

        Ok(engine)
    }

    fn list(&self, settings: &Settings) -> Result<()> {
        let entries: Vec<Value> = settings
            .endpoint_names()
            .iter()
            .map(|name| {
                let endpoint = settings.endpoint(name)?;
                Ok(json!({
                    "name": endpoint.name,
                    "description": endpoint.description,
                    "method": endpoint.method,
                    "url": endpoint.url,
                    "window": endpoint.window,
                    "pagination": endpoint.pagination,
                }))
            })
            .collect::<Result<_>>()?;

        self.write_records(&entries, None)
    }

    fn windows(&self, settings: &Settings, endpoint: &str, since: &str, to: &str) -> Result<()> {
        let endpoint = settings.endpoint(endpoint)?;
        let range = TimeRange::parse(since, to)?;
        let windows: Vec<Value> = endpoint
            .window
            .planner()?
            .windows(&range)?
            .iter()
            .map(|w| {
                json!({
                    "index": w.index,
                    "start": w.start.to_rfc3339(),
                    "end": w.end.to_rfc3339(),
                })
            })
            .collect();

        self.write_records(&windows, None)
    }

    async fn fetch(
        &self,
        settings: &Settings,
        request: &FetchRequest<'_>,
        output: Option<&Path>,
    ) -> Result<()> {
        let mut endpoint = settings.endpoint(request.endpoint)?;
        if let Some(status) = request.status {
            endpoint = endpoint.with_status(status)?;
        }

        let engine = Self::engine(settings)?;
        let mut records = match request.since {
            Some(since) => {
                let range = TimeRange::parse(since, request.to)?;
                engine.fetch_endpoint(&endpoint, &range).await?.into_records()
            }
            None => engine.fetch_all(&endpoint).await?,
        };

        if let Some(field) = request.explode {
            records = explode(&records, field)?;
        }
        if request.flatten {
            records = flatten(&records, CollisionPolicy::Error)?;
        }

        info!(endpoint = %endpoint.name, records = records.len(), "Writing records");
        self.write_records(&records, output)
    }

    async fn catalog(
        &self,
        settings: &Settings,
        key: Option<&str>,
        output: Option<&Path>,
    ) -> Result<()> {
        let engine = Self::engine(settings)?;
        let endpoints = CatalogEndpoints {
            products: settings.endpoint("product_list")?,
            prices: settings.endpoint("product_prices")?,
            stocks: settings.endpoint("product_stocks")?,
            info: settings.endpoint("product_info")?,
        };

        let catalog = CatalogFetcher::new(&engine, endpoints).fetch().await?;
        let rows = catalog.merged(key, CollisionPolicy::Suffix)?;

        self.write_records(&rows, output)
    }

    async fn warehouses(
        &self,
        settings: &Settings,
        by: WarehouseListing,
        output: Option<&Path>,
    ) -> Result<()> {
        let engine = Self::engine(settings)?;
        let records = engine.fetch_all(&settings.endpoint("warehouses")?).await?;

        let records = match by {
            WarehouseListing::Full => records,
            WarehouseListing::Id => vec![Value::Array(warehouse_ids(&records))],
            WarehouseListing::IdName => vec![Value::Object(warehouse_names(&records))],
        };
        self.write_records(&records, output)
    }

    /// Write records as JSON lines (or pretty JSON) to a file or stdout
    fn write_records(&self, records: &[Record], output: Option<&Path>) -> Result<()> {
        let mut out: Box<dyn Write> = match output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(io::stdout().lock()),
        };

        for record in records {
            match self.cli.format {
                OutputFormat::Json => serde_json::to_writer(&mut out, record)?,
                OutputFormat::Pretty => serde_json::to_writer_pretty(&mut out, record)?,
            }
            writeln!(out)?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Arguments of one `fetch` invocation
struct FetchRequest<'a> {
    endpoint: &'a str,
    since: Option<&'a str>,
    to: &'a str,
    status: Option<&'a str>,
    explode: Option<&'a str>,
    flatten: bool,
}
