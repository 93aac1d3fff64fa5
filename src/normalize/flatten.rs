//! Object and sequence flattening

use crate::error::{Error, Result};
use crate::types::{CollisionPolicy, JsonObject, JsonValue, Record};

/// Separator between a parent key and a promoted child key
pub const KEY_SEPARATOR: &str = "__";

/// Flatten every record
///
/// Flattening an already flat record returns it unchanged.
pub fn flatten(records: &[Record], policy: CollisionPolicy) -> Result<Vec<Record>> {
    records.iter().map(|r| flatten_record(r, policy)).collect()
}

/// Promote nested object fields to the top level, to any depth
///
/// `{"a": {"b": {"c": 1}}}` becomes `{"a__b__c": 1}`. Arrays and scalars
/// are kept as values; an empty nested object disappears. Non-object
/// records are returned as they are.
pub fn flatten_record(record: &Record, policy: CollisionPolicy) -> Result<Record> {
    let JsonValue::Object(fields) = record else {
        return Ok(record.clone());
    };

    let mut out = JsonObject::new();
    promote(&mut out, None, fields, policy)?;
    Ok(JsonValue::Object(out))
}

fn promote(
    out: &mut JsonObject,
    prefix: Option<&str>,
    fields: &JsonObject,
    policy: CollisionPolicy,
) -> Result<()> {
    for (key, value) in fields {
        let name = match prefix {
            Some(p) => format!("{p}{KEY_SEPARATOR}{key}"),
            None => key.clone(),
        };

        match value {
            JsonValue::Object(nested) => promote(out, Some(&name), nested, policy)?,
            other => insert(out, name, other.clone(), policy)?,
        }
    }
    Ok(())
}

fn insert(out: &mut JsonObject, key: String, value: JsonValue, policy: CollisionPolicy) -> Result<()> {
    if !out.contains_key(&key) {
        out.insert(key, value);
        return Ok(());
    }

    match policy {
        CollisionPolicy::Error => Err(Error::KeyCollision { key }),
        CollisionPolicy::Overwrite => {
            out.insert(key, value);
            Ok(())
        }
        CollisionPolicy::Suffix => {
            let free = (1..)
                .map(|n| format!("{key}_{n}"))
                .find(|candidate| !out.contains_key(candidate))
                .unwrap_or(key);
            out.insert(free, value);
            Ok(())
        }
    }
}

/// Flatten nested arrays into one level, depth-first, keeping order
pub fn flatten_sequence(values: &[JsonValue]) -> Vec<JsonValue> {
    let mut out = Vec::with_capacity(values.len());
    for value in values {
        match value {
            JsonValue::Array(inner) => out.extend(flatten_sequence(inner)),
            other => out.push(other.clone()),
        }
    }
    out
}
