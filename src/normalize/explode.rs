//! List expansion

use crate::error::{Error, Result};
use crate::types::{JsonValue, Record};

/// One record per element of the list at `field`
///
/// Each output is a deep copy of the source with `field` replaced by one
/// element. Records without `field` pass through; an empty list drops the
/// record; a non-list value is an error.
pub fn explode(records: &[Record], field: &str) -> Result<Vec<Record>> {
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let Some(value) = record.get(field) else {
            out.push(record.clone());
            continue;
        };
        let items = as_list(value, field)?;

        for item in items {
            let mut copy = record.clone();
            copy[field] = item.clone();
            out.push(copy);
        }
    }

    Ok(out)
}

/// Expand two list fields together
///
/// Equal lengths are expanded index by index. Otherwise the longer list is
/// expanded and the other field is set to `null` in every output. Records
/// missing either field pass through.
pub fn explode_pair(records: &[Record], first: &str, second: &str) -> Result<Vec<Record>> {
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let (Some(a), Some(b)) = (record.get(first), record.get(second)) else {
            out.push(record.clone());
            continue;
        };
        let a = as_list(a, first)?;
        let b = as_list(b, second)?;

        if a.len() == b.len() {
            for (x, y) in a.iter().zip(b) {
                let mut copy = record.clone();
                copy[first] = x.clone();
                copy[second] = y.clone();
                out.push(copy);
            }
            continue;
        }

        let (long_field, long, short_field) = if a.len() > b.len() {
            (first, a, second)
        } else {
            (second, b, first)
        };
        for item in long {
            let mut copy = record.clone();
            copy[long_field] = item.clone();
            copy[short_field] = JsonValue::Null;
            out.push(copy);
        }
    }

    Ok(out)
}

/// Turn a list of keyed entries into columns
///
/// `{"stocks": [{"type": "fbo", "present": 3}]}` pivoted on `type` with
/// value field `present` becomes `{"fbo_present": 3}`. The list field is
/// removed; later entries overwrite earlier ones with the same key.
pub fn pivot_list(
    records: &[Record],
    field: &str,
    key_field: &str,
    value_fields: &[&str],
) -> Result<Vec<Record>> {
    records
        .iter()
        .map(|record| {
            let mut copy = record.clone();
            let Some(list) = copy.as_object_mut().and_then(|f| f.remove(field)) else {
                return Ok(copy);
            };

            let mut columns = Vec::new();
            for entry in as_list(&list, field)? {
                let key = match entry.get(key_field) {
                    Some(JsonValue::String(s)) => s.clone(),
                    Some(JsonValue::Number(n)) => n.to_string(),
                    _ => {
                        return Err(Error::normalize(
                            field,
                            format!("entry has no usable '{key_field}'"),
                        ))
                    }
                };
                for value_field in value_fields {
                    let value = entry.get(*value_field).cloned().unwrap_or(JsonValue::Null);
                    columns.push((format!("{key}_{value_field}"), value));
                }
            }

            if let Some(fields) = copy.as_object_mut() {
                fields.extend(columns);
            }
            Ok(copy)
        })
        .collect()
}

fn as_list<'a>(value: &'a JsonValue, field: &str) -> Result<&'a [JsonValue]> {
    match value {
        JsonValue::Array(items) => Ok(items.as_slice()),
        other => Err(Error::normalize(
            field,
            format!("expected a list, found {}", kind(other)),
        )),
    }
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}
