//! Forgiving numeric deserializers: a plan is always produced, so malformed
//! numbers collapse to zero instead of rejecting the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn number_from_value(value: Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s
            .trim()
            .trim_start_matches('£')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
        Value::Null => return None,
    };
    Some(parsed.filter(|v| v.is_finite()).unwrap_or(0.0))
}

pub fn f64_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(value).unwrap_or(0.0))
}

/// Like [`f64_or_zero`] but keeps an explicit `null` as `None`.
pub fn optional_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_from_value(value))
}

pub fn u32_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = f64_or_zero(deserializer)?;
    Ok(if value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    })
}

/// Keeps the list entries that parse and drops the rest; a non-list is empty.
pub fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}
