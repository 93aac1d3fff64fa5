//! Product catalog assembly
//!
//! The catalog is spread over four provider methods: the product list,
//! prices and stocks (each paginated by `last_id`) and product details
//! (requested in batches of product ids). This module fetches all four and
//! merges them into one flat row per product.

use crate::connectors::load_builtin;
use crate::endpoint::EndpointDefinition;
use crate::engine::FetchEngine;
use crate::error::Result;
use crate::merge::{merge_by_key, merge_positional};
use crate::normalize::{flatten, pivot_list};
use crate::request::set_pointer;
use crate::types::{CollisionPolicy, JsonValue, Record};
use futures::future::try_join_all;
use tracing::info;

/// Largest number of ids the details method accepts per request
pub const INFO_BATCH_SIZE: usize = 1000;

/// Endpoints the catalog is assembled from
#[derive(Debug, Clone)]
pub struct CatalogEndpoints {
    /// Product id list (`last_id` pagination)
    pub products: EndpointDefinition,
    /// Prices (`last_id` pagination)
    pub prices: EndpointDefinition,
    /// Stocks (`last_id` pagination)
    pub stocks: EndpointDefinition,
    /// Details, requested by id batches
    pub info: EndpointDefinition,
}

impl CatalogEndpoints {
    /// The built-in catalog endpoints
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            products: load_builtin("product_list")?,
            prices: load_builtin("product_prices")?,
            stocks: load_builtin("product_stocks")?,
            info: load_builtin("product_info")?,
        })
    }
}

/// Raw catalog parts as returned by the provider
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Product ids and offer ids
    pub products: Vec<Record>,
    /// Price records
    pub prices: Vec<Record>,
    /// Stock records with a `stocks` list per product
    pub stocks: Vec<Record>,
    /// Detail records
    pub info: Vec<Record>,
}

/// Fetches every catalog part
pub struct CatalogFetcher<'a> {
    engine: &'a FetchEngine,
    endpoints: CatalogEndpoints,
    batch_size: usize,
}

impl<'a> CatalogFetcher<'a> {
    /// Create a fetcher over the given endpoints
    pub fn new(engine: &'a FetchEngine, endpoints: CatalogEndpoints) -> Self {
        Self {
            engine,
            endpoints,
            batch_size: INFO_BATCH_SIZE,
        }
    }

    /// Set the detail batch size
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Fetch products, prices and stocks concurrently, then the details
    pub async fn fetch(&self) -> Result<Catalog> {
        let (products, prices, stocks) = tokio::try_join!(
            self.engine.fetch_all(&self.endpoints.products),
            self.engine.fetch_all(&self.endpoints.prices),
            self.engine.fetch_all(&self.endpoints.stocks),
        )?;

        let ids: Vec<JsonValue> = products
            .iter()
            .filter_map(|p| p.get("product_id").cloned())
            .collect();

        let batches = ids
            .chunks(self.batch_size)
            .map(|chunk| {
                let mut endpoint = self.endpoints.info.clone();
                set_pointer(
                    &mut endpoint.body.template,
                    "/product_id",
                    JsonValue::Array(chunk.to_vec()),
                )?;
                Ok(endpoint)
            })
            .collect::<Result<Vec<_>>>()?;

        let info: Vec<Record> = try_join_all(batches.iter().map(|e| self.engine.fetch_all(e)))
            .await?
            .into_iter()
            .flatten()
            .collect();

        info!(
            products = products.len(),
            prices = prices.len(),
            stocks = stocks.len(),
            info = info.len(),
            "Catalog fetched"
        );

        Ok(Catalog {
            products,
            prices,
            stocks,
            info,
        })
    }
}

impl Catalog {
    /// Flatten every part and merge them into one row per product
    ///
    /// With `key` the parts are joined on that field (details expose the
    /// product id as `id`, which is copied over when `key` is missing).
    /// Without `key` the parts are paired by position and must have equal
    /// lengths.
    pub fn merged(&self, key: Option<&str>, policy: CollisionPolicy) -> Result<Vec<Record>> {
        let prices = flatten(&self.prices, policy)?;
        let stocks = pivot_list(&self.stocks, "stocks", "type", &["present", "reserved"])?;
        let mut info = flatten(&self.info, policy)?;

        let Some(key) = key else {
            return merge_positional(&[self.products.clone(), prices, stocks, info]);
        };

        for fields in info.iter_mut().filter_map(JsonValue::as_object_mut) {
            if !fields.contains_key(key) {
                if let Some(id) = fields.get("id").cloned() {
                    fields.insert(key.to_string(), id);
                }
            }
        }
        merge_by_key(&[self.products.clone(), prices, stocks, info], key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpClient, HttpClientConfig};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample() -> Catalog {
        Catalog {
            products: vec![
                json!({"product_id": 1, "offer_id": "a"}),
                json!({"product_id": 2, "offer_id": "b"}),
            ],
            prices: vec![
                json!({"product_id": 2, "price": {"price": "250", "currency_code": "RUB"}}),
                json!({"product_id": 1, "price": {"price": "100", "currency_code": "RUB"}}),
            ],
            stocks: vec![
                json!({"product_id": 1, "stocks": [{"type": "fbo", "present": 5, "reserved": 1}]}),
                json!({"product_id": 2, "stocks": [{"type": "fbo", "present": 0, "reserved": 0}]}),
            ],
            info: vec![
                json!({"id": 2, "name": "Mug", "status": {"state": "ready"}}),
                json!({"id": 1, "name": "Cup", "status": {"state": "moderation"}}),
            ],
        }
    }

    #[test]
    fn test_catalog_merged_by_key() {
        let rows = sample()
            .merged(Some("product_id"), CollisionPolicy::Error)
            .unwrap();

        assert_eq!(
            rows[0],
            json!({
                "product_id": 1,
                "offer_id": "a",
                "price__price": "100",
                "price__currency_code": "RUB",
                "fbo_present": 5,
                "fbo_reserved": 1,
                "id": 1,
                "name": "Cup",
                "status__state": "moderation"
            })
        );
        assert_eq!(rows[1]["name"], "Mug");
    }

    #[test]
    fn test_catalog_merged_positional_requires_equal_lengths() {
        let mut catalog = sample();
        catalog.info.pop();
        assert!(catalog.merged(None, CollisionPolicy::Error).is_err());
    }

    #[tokio::test]
    async fn test_catalog_fetch() {
        let mock_server = MockServer::start().await;

        for (url, items) in [
            (
                "/v2/product/list",
                json!([{"product_id": 1, "offer_id": "a"}, {"product_id": 2, "offer_id": "b"}]),
            ),
            ("/v4/product/info/prices", json!([{"product_id": 1}, {"product_id": 2}])),
            (
                "/v3/product/info/stocks",
                json!([{"product_id": 1, "stocks": []}, {"product_id": 2, "stocks": []}]),
            ),
        ] {
            Mock::given(method("POST"))
                .and(path(url))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "result": {"items": items, "last_id": "", "total": 2}
                })))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        for ids in [json!([1]), json!([2])] {
            Mock::given(method("POST"))
                .and(path("/v2/product/info/list"))
                .and(body_partial_json(json!({"product_id": ids})))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "result": {"items": [{"id": ids[0], "name": "x"}]}
                })))
                .expect(1)
                .mount(&mock_server)
                .await;
        }

        let client =
            HttpClient::with_config(HttpClientConfig::builder().base_url(mock_server.uri()).build())
                .unwrap();
        let engine = FetchEngine::new(Arc::new(client));

        let catalog = CatalogFetcher::new(&engine, CatalogEndpoints::builtin().unwrap())
            .with_batch_size(1)
            .fetch()
            .await
            .unwrap();

        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.info.len(), 2);

        let rows = catalog
            .merged(Some("product_id"), CollisionPolicy::Overwrite)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["offer_id"], "b");
    }
}
