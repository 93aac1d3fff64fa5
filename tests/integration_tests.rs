//! Integration tests using mock HTTP server
//!
//! Tests the full flow: endpoint preset → windowed POST requests → records

use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use windowfetch::connectors::{
    fbs_postings, finance_transactions, load_builtin, warehouse_ids, warehouse_names,
};
use windowfetch::normalize::{explode, flatten};
use windowfetch::{
    CollisionPolicy, Error, FetchEngine, HttpClient, HttpClientConfig, Settings, TimeRange,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine_for(server: &MockServer) -> FetchEngine {
    let client =
        HttpClient::with_config(HttpClientConfig::builder().base_url(server.uri()).build())
            .unwrap();
    FetchEngine::new(Arc::new(client))
}

// ============================================================================
// Preset Tests
// ============================================================================

#[tokio::test]
async fn test_fbs_postings_flag_pagination() {
    let mock_server = MockServer::start().await;

    for (offset, has_next) in [(0, true), (1000, false)] {
        Mock::given(method("POST"))
            .and(path("/v3/posting/fbs/list"))
            .and(body_partial_json(json!({
                "offset": offset,
                "limit": 1000,
                "filter": {"status": "awaiting_packaging"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "postings": [{"posting_number": format!("p-{offset}")}],
                    "has_next": has_next
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    let engine = engine_for(&mock_server);
    let range = TimeRange::parse("2023-01-01", "2023-01-10").unwrap();
    let report = engine
        .fetch_endpoint(&fbs_postings("awaiting_packaging").unwrap(), &range)
        .await
        .unwrap();

    assert_eq!(report.windows.len(), 1);
    assert_eq!(
        report.into_records(),
        vec![json!({"posting_number": "p-0"}), json!({"posting_number": "p-1000"})]
    );
}

#[tokio::test]
async fn test_finance_monthly_windows_page_count() {
    let mock_server = MockServer::start().await;

    for page in [1, 2] {
        Mock::given(method("POST"))
            .and(path("/v3/finance/transaction/list"))
            .and(body_partial_json(json!({
                "page": page,
                "filter": {"transaction_type": "orders"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {"operations": [{"page": page}], "page_count": 2}
            })))
            .expect(2)
            .mount(&mock_server)
            .await;
    }

    let engine = engine_for(&mock_server);
    let range = TimeRange::parse("2023-01-01", "2023-02-15").unwrap();
    let report = engine
        .fetch_endpoint(&finance_transactions("orders").unwrap(), &range)
        .await
        .unwrap();

    assert_eq!(report.windows.len(), 2);
    assert_eq!(report.stats.records, 4);
}

#[tokio::test]
async fn test_unwindowed_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/rating/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "groups": [{"group_name": "Reviews"}, {"group_name": "Delivery"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let records = engine
        .fetch_all(&load_builtin("seller_rating").unwrap())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_seller_rating_summary_keeps_top_level_fields() {
    let mock_server = MockServer::start().await;

    let summary = json!({
        "groups": [{"group_name": "Reviews"}],
        "penalty_score_exceeded": false,
        "premium": true,
        "localization_index": [{"calculation_date": "2023-01-01", "localization_percentage": 80}]
    });
    Mock::given(method("POST"))
        .and(path("/v1/rating/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary.clone()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = engine_for(&mock_server)
        .fetch_all(&load_builtin("seller_rating_summary").unwrap())
        .await
        .unwrap();

    assert_eq!(records, vec![summary]);
}

#[tokio::test]
async fn test_warehouses_get_listing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/supplier/available_warehouses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [
                {"warehouse": {"id": 101, "name": "Moscow"}, "schedule": {}},
                {"warehouse": {"id": 202, "name": "Kazan"}, "schedule": {}}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let records = engine_for(&mock_server)
        .fetch_all(&load_builtin("warehouses").unwrap())
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(warehouse_ids(&records), vec![json!(101), json!(202)]);
    assert_eq!(warehouse_names(&records)["202"], "Kazan");
}

// ============================================================================
// Settings Tests
// ============================================================================

#[tokio::test]
async fn test_settings_custom_endpoint_with_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/returns"))
        .and(header("Client-Id", "836"))
        .and(header("Api-Key", "secret"))
        .and(body_partial_json(json!({
            "filter": {"from": "2023-01-01", "till": "2023-01-05"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"returns": [{"id": 1}]})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let yaml = format!(
        r#"
base_url: {}
headers:
  Client-Id: "836"
  Api-Key: secret
endpoints:
  - name: returns
    url: /v1/returns
    record_path: returns
    body:
      template:
        filter: {{}}
      since_pointer: /filter/from
      to_pointer: /filter/till
      date_format: "%Y-%m-%d"
    window:
      type: even
      max_span: 30d
"#,
        mock_server.uri()
    );
    let settings = Settings::from_yaml_str(&yaml).unwrap();
    let engine = FetchEngine::new(Arc::new(
        HttpClient::with_config(settings.http_config()).unwrap(),
    ));

    let range = TimeRange::parse("2023-01-01", "2023-01-05").unwrap();
    let report = engine
        .fetch_endpoint(&settings.endpoint("returns").unwrap(), &range)
        .await
        .unwrap();

    assert_eq!(report.into_records(), vec![json!({"id": 1})]);
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_remote_message_on_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/posting/fbs/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 3,
            "message": "invalid filter"
        })))
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let range = TimeRange::parse("2023-01-01", "2023-01-10").unwrap();
    let err = engine
        .fetch_endpoint(&fbs_postings("").unwrap(), &range)
        .await
        .unwrap_err();

    match err {
        Error::Remote {
            status,
            api_method,
            message,
        } => {
            assert_eq!(status, 200);
            assert_eq!(api_method, format!("{}/v3/posting/fbs/list", mock_server.uri()));
            assert_eq!(message, "invalid filter");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_connection_refused() {
    let client = HttpClient::with_config(
        HttpClientConfig::builder()
            .base_url("http://127.0.0.1:1")
            .build(),
    )
    .unwrap();
    let engine = FetchEngine::new(Arc::new(client));

    let err = engine
        .fetch_all(&load_builtin("seller_rating").unwrap())
        .await
        .unwrap_err();
    assert!(err.is_connection());
}

// ============================================================================
// Normalization Pipeline Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_explode_flatten() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/posting/fbo/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": [{
                "posting_number": "p-1",
                "analytics_data": {"region": "Moscow"},
                "products": [{"sku": 1}, {"sku": 2}]
            }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let engine = engine_for(&mock_server);
    let range = TimeRange::parse("2023-01-01", "2023-01-10").unwrap();
    let records = engine
        .fetch_endpoint(&load_builtin("fbo").unwrap(), &range)
        .await
        .unwrap()
        .into_records();

    let rows = flatten(&explode(&records, "products").unwrap(), CollisionPolicy::Error).unwrap();

    assert_eq!(
        rows,
        vec![
            json!({"posting_number": "p-1", "analytics_data__region": "Moscow", "products__sku": 1}),
            json!({"posting_number": "p-1", "analytics_data__region": "Moscow", "products__sku": 2}),
        ]
    );
}
