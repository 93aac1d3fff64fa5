//! Built-in endpoint definitions embedded in the binary
//!
//! This module embeds the supported endpoint YAML files directly into the
//! binary, so `windowfetch fetch fbo_postings` works without a config file.

use crate::endpoint::EndpointDefinition;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Record};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Built-in endpoint YAML definitions
pub static BUILTIN_ENDPOINTS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        let mut m = HashMap::new();

        // Orders
        m.insert("fbo_postings", include_str!("../connectors/fbo_postings.yaml"));
        m.insert("fbo", include_str!("../connectors/fbo_postings.yaml"));
        m.insert("fbs_postings", include_str!("../connectors/fbs_postings.yaml"));
        m.insert("fbs", include_str!("../connectors/fbs_postings.yaml"));

        // Finance
        m.insert(
            "finance_transactions",
            include_str!("../connectors/finance_transactions.yaml"),
        );
        m.insert(
            "finance",
            include_str!("../connectors/finance_transactions.yaml"),
        );

        // Catalog
        m.insert("product_list", include_str!("../connectors/product_list.yaml"));
        m.insert(
            "product_prices",
            include_str!("../connectors/product_prices.yaml"),
        );
        m.insert(
            "product_stocks",
            include_str!("../connectors/product_stocks.yaml"),
        );
        m.insert("product_info", include_str!("../connectors/product_info.yaml"));

        // Seller
        m.insert("seller_rating", include_str!("../connectors/seller_rating.yaml"));
        m.insert(
            "seller_rating_summary",
            include_str!("../connectors/seller_rating_summary.yaml"),
        );
        m.insert("warehouses", include_str!("../connectors/warehouses.yaml"));

        m
    });

/// Get a built-in endpoint YAML by name or alias
pub fn get_builtin(name: &str) -> Option<&'static str> {
    BUILTIN_ENDPOINTS.get(name).copied()
}

/// Check if a name is a built-in endpoint
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_ENDPOINTS.contains_key(name)
}

/// List built-in endpoint names (primary names only)
pub fn list_builtin() -> Vec<&'static str> {
    vec![
        "fbo_postings",
        "fbs_postings",
        "finance_transactions",
        "product_list",
        "product_prices",
        "product_stocks",
        "product_info",
        "seller_rating",
        "seller_rating_summary",
        "warehouses",
    ]
}

/// Parse a built-in endpoint
pub fn load_builtin(name: &str) -> Result<EndpointDefinition> {
    let yaml = get_builtin(name)
        .ok_or_else(|| Error::config(format!("Unknown endpoint: {name}")))?;
    EndpointDefinition::from_yaml_str(yaml)
}

/// Parse every built-in endpoint
pub fn builtin_endpoints() -> Result<Vec<EndpointDefinition>> {
    list_builtin().into_iter().map(load_builtin).collect()
}

// ============================================================================
// Presets
// ============================================================================

/// FBO order list, optionally filtered by status (`""` means all)
pub fn fbo_postings(status: &str) -> Result<EndpointDefinition> {
    load_builtin("fbo_postings")?.with_status(status)
}

/// FBS order list, optionally filtered by status (`""` means all)
pub fn fbs_postings(status: &str) -> Result<EndpointDefinition> {
    load_builtin("fbs_postings")?.with_status(status)
}

/// Financial transactions of one type (`all`, `orders`, `returns`, ...)
pub fn finance_transactions(transaction_type: &str) -> Result<EndpointDefinition> {
    load_builtin("finance_transactions")?.with_status(transaction_type)
}

// ============================================================================
// Warehouse Lookups
// ============================================================================

/// Warehouse ids from `warehouses` records, in response order
pub fn warehouse_ids(records: &[Record]) -> Vec<JsonValue> {
    records
        .iter()
        .filter_map(|r| r.pointer("/warehouse/id").cloned())
        .collect()
}

/// Warehouse names keyed by warehouse id
pub fn warehouse_names(records: &[Record]) -> JsonObject {
    records
        .iter()
        .filter_map(|r| {
            let key = match r.pointer("/warehouse/id")? {
                JsonValue::String(id) => id.clone(),
                id => id.to_string(),
            };
            Some((key, r.pointer("/warehouse/name")?.clone()))
        })
        .collect()
}
