//! Visitor record and its persisted JSON codec
//!
//! Decoding is deliberately forgiving: a missing record, unparsable text, or
//! individually corrupt fields all collapse to safe defaults instead of
//! failing the load. One bad field never invalidates the rest of the record.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Value, json};
use tracing::warn;

/// Persisted per-visitor record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitorState {
    /// True until the visitor has completed a second recorded visit
    pub is_first_visit: bool,
    /// Instant of the most recent recorded visit, if any
    pub last_visit: Option<DateTime<Utc>>,
    /// Sticky opt-out of the long-form intro animation
    pub skip_preference: bool,
    /// Total number of recorded visits
    pub visit_count: u32,
}

impl Default for VisitorState {
    fn default() -> Self {
        Self {
            is_first_visit: true,
            last_visit: None,
            skip_preference: false,
            visit_count: 0,
        }
    }
}

impl VisitorState {
    /// Decode a stored record, defaulting anything absent or malformed
    pub fn decode(stored: Option<&str>) -> Self {
        let Some(text) = stored else {
            return Self::default();
        };

        let value: Value = match serde_json::from_str(text) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Failed to parse visitor record, using defaults");
                return Self::default();
            }
        };
        let Some(fields) = value.as_object() else {
            warn!("Stored visitor record is not an object, using defaults");
            return Self::default();
        };

        Self {
            is_first_visit: fields.get("isFirstVisit").is_some_and(is_truthy),
            last_visit: fields.get("lastVisit").and_then(parse_instant),
            skip_preference: fields.get("skipPreference").is_some_and(is_truthy),
            visit_count: fields.get("visitCount").map_or(0, parse_count),
        }
    }

    /// Encode for storage; the timestamp becomes an ISO-8601 UTC string
    /// (millisecond precision) or `null` when no visit has occurred
    pub fn encode(&self) -> String {
        json!({
            "isFirstVisit": self.is_first_visit,
            "lastVisit": self
                .last_visit
                .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true)),
            "skipPreference": self.skip_preference,
            "visitCount": self.visit_count,
        })
        .to_string()
    }
}

/// Boolean coercion over arbitrary JSON values (truthiness rules)
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse a stored timestamp: RFC 3339 string or epoch milliseconds
fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Coerce a stored visit counter: non-numbers become 0, floats floor,
/// negatives clamp to 0
fn parse_count(value: &Value) -> u32 {
    if let Some(n) = value.as_u64() {
        n.min(u64::from(u32::MAX)) as u32
    } else if let Some(f) = value.as_f64() {
        if f.is_finite() && f > 0.0 {
            f.floor().min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    } else {
        0
    }
}
