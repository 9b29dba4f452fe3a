use std::collections::BTreeMap;
use std::iter::FromIterator;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, WxError};

fn serde_error(code: &str, err: impl ToString) -> WxError {
    WxError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect::<BTreeMap<_, _>>();
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into human readable JSON with deterministic key ordering.
pub fn to_canonical_json_pretty<T: Serialize>(value: &T) -> Result<String, WxError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    serde_json::to_string_pretty(&canonicalize(value)).map_err(|err| serde_error("json-write", err))
}
