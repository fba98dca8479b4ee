//! JSON snapshot files to raw records.
//!
//! A snapshot file holds either a JSON array of listing objects or a single
//! object. Scalar fields map directly; nested objects are kept as their JSON
//! text so nothing is silently lost before normalization.

use std::path::Path;

use serde_json::Value;
use tracing::warn;

use mart_model::{RawRecord, RawValue};

use crate::error::{IngestError, Result};

/// Reads one snapshot file into raw records.
pub fn read_raw_records(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|e| IngestError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut records = Vec::new();
    match value {
        Value::Array(items) => {
            for item in items {
                match item {
                    Value::Object(fields) => records.push(record_from_object(fields)),
                    other => {
                        warn!(path = %path.display(), kind = json_kind(&other), "skipping non-object array element");
                    }
                }
            }
        }
        Value::Object(fields) => records.push(record_from_object(fields)),
        other => {
            warn!(path = %path.display(), kind = json_kind(&other), "snapshot file is neither array nor object");
        }
    }
    Ok(records)
}

fn record_from_object(fields: serde_json::Map<String, Value>) -> RawRecord {
    fields
        .into_iter()
        .map(|(name, value)| (name, raw_value(value)))
        .collect()
}

/// Maps a JSON value onto the raw variant type.
fn raw_value(value: Value) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::Bool(b) => RawValue::Bool(b),
        Value::Number(n) => {
            if let Some(v) = n.as_i64() {
                RawValue::Int(v)
            } else {
                RawValue::Float(n.as_f64().unwrap_or(f64::NAN))
            }
        }
        Value::String(s) => RawValue::Str(s),
        Value::Array(items) => RawValue::List(items.into_iter().map(raw_value).collect()),
        // Nested objects are rare in listings; keep the JSON text.
        object @ Value::Object(_) => RawValue::Str(object.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
