//! Tests for decoder module

use super::*;
use crate::Error;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

// ============================================================================
// Path Extraction Tests
// ============================================================================

#[test_case("result", Some(json!({"postings": [1, 2, 3], "has_next": true})) ; "top level")]
#[test_case("result.postings", Some(json!([1, 2, 3])) ; "nested")]
#[test_case("$.result.has_next", Some(json!(true)) ; "dollar prefix")]
#[test_case("result.postings[0]", Some(json!(1)) ; "index")]
#[test_case("result.postings[-1]", Some(json!(3)) ; "negative index")]
#[test_case("result.postings[7]", None ; "index out of bounds")]
#[test_case("result.postings[-4]", None ; "negative index out of bounds")]
#[test_case("result.missing", None ; "missing key")]
#[test_case("result.has_next.deeper", None ; "through scalar")]
fn test_extract_path(path: &str, expected: Option<serde_json::Value>) {
    let body = json!({"result": {"postings": [1, 2, 3], "has_next": true}});
    assert_eq!(extract_path(&body, path).cloned(), expected);
}

#[test]
fn test_extract_path_root() {
    let body = json!([1, 2]);
    assert_eq!(extract_path(&body, "$"), Some(&body));
    assert_eq!(extract_path(&body, ""), Some(&body));
}

// ============================================================================
// JsonDecoder Tests
// ============================================================================

#[test]
fn test_json_decoder_with_path() {
    let decoder = JsonDecoder::with_path("result");
    let body = json!({"result": [{"posting_number": "1"}, {"posting_number": "2"}]});

    let records = decoder.decode(&body).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["posting_number"], "2");
}

#[test]
fn test_json_decoder_nested_path() {
    let decoder = JsonDecoder::with_path("result.operations");
    let body = json!({"result": {"operations": [{"id": 1}], "page_count": 1}});
    assert_eq!(decoder.decode(&body).unwrap(), vec![json!({"id": 1})]);
}

#[test]
fn test_json_decoder_missing_path() {
    let decoder = JsonDecoder::with_path("result.postings");
    let err = decoder.decode(&json!({"result": {}})).unwrap_err();
    assert!(matches!(err, Error::RecordExtraction { ref path, .. } if path == "result.postings"));
}

#[test]
fn test_json_decoder_null_is_empty() {
    let decoder = JsonDecoder::with_path("result");
    assert!(decoder.decode(&json!({"result": null})).unwrap().is_empty());
}

#[test]
fn test_json_decoder_object_is_single_record() {
    let decoder = JsonDecoder::with_path("result");
    let records = decoder.decode(&json!({"result": {"id": 7}})).unwrap();
    assert_eq!(records, vec![json!({"id": 7})]);
}

#[test]
fn test_json_decoder_without_path() {
    let decoder = JsonDecoder::new();
    assert!(decoder.record_path().is_none());
    assert_eq!(decoder.decode(&json!([1, 2])).unwrap().len(), 2);
}

// ============================================================================
// Remote Error Tests
// ============================================================================

#[test]
fn test_check_remote_error_success() {
    assert!(check_remote_error(200, "/v2/posting/fbo/list", &json!({"result": []})).is_ok());
    assert!(check_remote_error(200, "/v2/posting/fbo/list", &json!({"message": ""})).is_ok());
}

#[test]
fn test_check_remote_error_message_field() {
    let body = json!({"code": 3, "message": "invalid filter", "details": []});
    let err = check_remote_error(200, "/v2/posting/fbo/list", &body).unwrap_err();

    match err {
        Error::Remote {
            status,
            api_method,
            message,
        } => {
            assert_eq!(status, 200);
            assert_eq!(api_method, "/v2/posting/fbo/list");
            assert_eq!(message, "invalid filter");
        }
        other => panic!("Expected Remote, got {other:?}"),
    }
}

#[test]
fn test_check_remote_error_status() {
    let err = check_remote_error(503, "/v3/finance/transaction/list", &json!({})).unwrap_err();
    assert_eq!(err.status(), Some(503));
    assert!(err.is_remote());
    assert!(err.to_string().contains("503"));
}

#[test]
fn test_check_remote_error_status_with_message() {
    let body = json!({"code": 7, "message": "Api-Key is invalid"});
    let err = check_remote_error(403, "/v2/product/list", &body).unwrap_err();
    assert!(err.to_string().contains("Api-Key is invalid"));
}
