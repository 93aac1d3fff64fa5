//! Merge implementations

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue, Record};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Shallow-merge `patch` into `target`; keys in `patch` win
pub fn overlay(target: &mut JsonObject, patch: &JsonObject) {
    for (key, value) in patch {
        target.insert(key.clone(), value.clone());
    }
}

/// Merge sources record by record
///
/// Record `i` of the output is record `i` of the first source overlaid with
/// record `i` of every following source. All sources must have the same
/// length.
pub fn merge_positional(sources: &[Vec<Record>]) -> Result<Vec<Record>> {
    let Some((base, rest)) = sources.split_first() else {
        return Ok(Vec::new());
    };

    if let Some((i, other)) = rest.iter().enumerate().find(|(_, s)| s.len() != base.len()) {
        return Err(Error::merge_mismatch(format!(
            "source {} has {} records, source 0 has {}",
            i + 1,
            other.len(),
            base.len()
        )));
    }

    (0..base.len())
        .map(|i| {
            let mut merged = as_object(&base[i], 0)?.clone();
            for (n, source) in rest.iter().enumerate() {
                overlay(&mut merged, as_object(&source[i], n + 1)?);
            }
            Ok(JsonValue::Object(merged))
        })
        .collect()
}

/// Join sources on a shared identity field
///
/// The output follows the order of the first source. Every record of the
/// first source must carry `key`, and no source may repeat a key value.
/// Records of later sources are overlaid onto the base record with the same
/// key; base records without a counterpart keep only their own fields.
pub fn merge_by_key(sources: &[Vec<Record>], key: &str) -> Result<Vec<Record>> {
    let Some((base, rest)) = sources.split_first() else {
        return Ok(Vec::new());
    };

    let indexes = rest
        .iter()
        .enumerate()
        .map(|(n, source)| index_source(source, key, n + 1))
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::with_capacity(base.len());
    let mut out = Vec::with_capacity(base.len());
    let mut unmatched = 0usize;

    for record in base {
        let fields = as_object(record, 0)?;
        let id = key_of(fields, key).ok_or_else(|| {
            Error::merge_mismatch(format!("record in source 0 has no usable '{key}'"))
        })?;
        if !seen.insert(id.clone()) {
            return Err(duplicate(key, &id, 0));
        }

        let mut merged = fields.clone();
        for index in &indexes {
            match index.get(&id) {
                Some(patch) => overlay(&mut merged, patch),
                None => unmatched += 1,
            }
        }
        out.push(JsonValue::Object(merged));
    }

    if unmatched > 0 {
        debug!(key, unmatched, "Records without a counterpart were left-joined");
    }

    Ok(out)
}

fn index_source<'a>(
    source: &'a [Record],
    key: &str,
    n: usize,
) -> Result<HashMap<String, &'a JsonObject>> {
    let mut index = HashMap::with_capacity(source.len());
    for record in source {
        let fields = as_object(record, n)?;
        let id = key_of(fields, key).ok_or_else(|| {
            Error::merge_mismatch(format!("record in source {n} has no usable '{key}'"))
        })?;
        if index.insert(id.clone(), fields).is_some() {
            return Err(duplicate(key, &id, n));
        }
    }
    Ok(index)
}

fn key_of(fields: &JsonObject, key: &str) -> Option<String> {
    match fields.get(key)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn as_object(record: &Record, source: usize) -> Result<&JsonObject> {
    record
        .as_object()
        .ok_or_else(|| Error::merge_mismatch(format!("source {source} contains a non-object record")))
}

fn duplicate(key: &str, id: &str, source: usize) -> Error {
    Error::merge_mismatch(format!("duplicate {key} '{id}' in source {source}"))
}
