//! Tests for merge module

use super::*;
use crate::Error;
use pretty_assertions::assert_eq;
use serde_json::json;

// ============================================================================
// merge_positional Tests
// ============================================================================

#[test]
fn test_merge_positional_overlays_in_order() {
    let products = vec![
        json!({"product_id": 1, "offer_id": "a"}),
        json!({"product_id": 2, "offer_id": "b"}),
    ];
    let prices = vec![
        json!({"product_id": 1, "price": "100"}),
        json!({"product_id": 2, "price": "250"}),
    ];
    let stocks = vec![
        json!({"product_id": 1, "fbo_present": 3, "offer_id": "a-stock"}),
        json!({"product_id": 2, "fbo_present": 0}),
    ];

    let merged = merge_positional(&[products, prices, stocks]).unwrap();

    assert_eq!(
        merged,
        vec![
            json!({"product_id": 1, "offer_id": "a-stock", "price": "100", "fbo_present": 3}),
            json!({"product_id": 2, "offer_id": "b", "price": "250", "fbo_present": 0}),
        ]
    );
}

#[test]
fn test_merge_positional_length_mismatch() {
    let err = merge_positional(&[vec![json!({"a": 1})], vec![]]).unwrap_err();
    assert!(matches!(err, Error::MergeMismatch { .. }));
}

#[test]
fn test_merge_positional_empty() {
    assert!(merge_positional(&[]).unwrap().is_empty());
    assert!(merge_positional(&[vec![], vec![]]).unwrap().is_empty());
}

#[test]
fn test_merge_positional_rejects_non_objects() {
    assert!(merge_positional(&[vec![json!(1)], vec![json!({"a": 1})]]).is_err());
}

// ============================================================================
// merge_by_key Tests
// ============================================================================

#[test]
fn test_merge_by_key_ignores_source_order() {
    let products = vec![
        json!({"product_id": 1, "offer_id": "a"}),
        json!({"product_id": 2, "offer_id": "b"}),
        json!({"product_id": 3, "offer_id": "c"}),
    ];
    let prices = vec![
        json!({"product_id": 3, "price": "30"}),
        json!({"product_id": 1, "price": "10"}),
    ];

    let merged = merge_by_key(&[products, prices], "product_id").unwrap();

    assert_eq!(
        merged,
        vec![
            json!({"product_id": 1, "offer_id": "a", "price": "10"}),
            json!({"product_id": 2, "offer_id": "b"}),
            json!({"product_id": 3, "offer_id": "c", "price": "30"}),
        ]
    );
}

#[test]
fn test_merge_by_key_string_and_number_keys_match() {
    let merged = merge_by_key(
        &[vec![json!({"id": "7"})], vec![json!({"id": 7, "x": true})]],
        "id",
    )
    .unwrap();
    assert_eq!(merged, vec![json!({"id": 7, "x": true})]);
}

#[test]
fn test_merge_by_key_duplicate_is_error() {
    let err = merge_by_key(
        &[
            vec![json!({"id": 1})],
            vec![json!({"id": 1, "a": 1}), json!({"id": 1, "a": 2})],
        ],
        "id",
    )
    .unwrap_err();
    assert!(err.to_string().contains("duplicate id '1' in source 1"));

    assert!(merge_by_key(&[vec![json!({"id": 1}), json!({"id": 1})]], "id").is_err());
}

#[test]
fn test_merge_by_key_base_without_key() {
    let err = merge_by_key(&[vec![json!({"other": 1})]], "id").unwrap_err();
    assert!(matches!(err, Error::MergeMismatch { .. }));
}

#[test]
fn test_overlay_last_wins() {
    let mut target = json!({"a": 1, "b": 1}).as_object().cloned().unwrap();
    overlay(&mut target, json!({"b": 2, "c": 3}).as_object().unwrap());
    assert_eq!(serde_json::Value::Object(target), json!({"a": 1, "b": 2, "c": 3}));
}
