//! Upstream record mappings as returned by the typhoon list endpoint.
//!
//! The API serves every field as a string or null, but individual fields have
//! drifted between string and number across revisions, so each field is
//! deserialised permissively. One odd field must never fail the whole year.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTyphoon {
    #[serde(default, deserialize_with = "flexible_id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub cht_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub eng_name: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub genesis_datetime: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub dead_datetime: Option<String>,
    /// Named `max_intensity` in current API revisions and `max_wind_speed`
    /// in older ones. Opaque integer, m/s per the site documentation.
    #[serde(
        default,
        alias = "max_wind_speed",
        deserialize_with = "flexible_string"
    )]
    pub max_intensity: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub max_gust_speed: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub min_pressure: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub max_class7_radius: Option<String>,
    #[serde(default, deserialize_with = "flexible_string")]
    pub max_class10_radius: Option<String>,
    /// Non-null when the storm triggered a formal warning for Taiwan.
    #[serde(default, deserialize_with = "flexible_string")]
    pub warning_count: Option<String>,
}

/// Accepts a string, number or bool and keeps its text form; null, arrays
/// and objects become `None`.
fn flexible_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Accepts an integer or a numeric string; anything else becomes `None`.
fn flexible_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

// -- Tests -------------------------------------------------------------------
