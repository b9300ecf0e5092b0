//! Input data model: the dynamically-typed graph and its scalar leaves.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Ordered mapping used for object members.
///
/// Insertion order is kept so callers can observe that canonical output does
/// not depend on it; the streamer decides the emitted order.
pub type ObjectMap = IndexMap<String, GraphValue>;

/// A scalar leaf of the graph.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// JSON `null`.
    Null,
    /// Boolean literal.
    Bool(bool),
    /// Double-precision number.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Instant normalized to UTC.
    Timestamp(DateTime<Utc>),
}

impl Scalar {
    /// Canonical JSON literal for this scalar.
    ///
    /// Strings are escaped and quoted, timestamps are rendered as quoted
    /// millisecond UTC strings and non-finite numbers become `null`.
    pub fn to_json_literal(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::Number(n) if !n.is_finite() => "null".to_string(),
            Scalar::Number(n) => number_text(*n),
            Scalar::String(s) => quote(s),
            Scalar::Timestamp(ts) => quote(&timestamp_text(ts)),
        }
    }
}

/// Natural string conversion, used as hash input.
///
/// Strings are written raw (no quotes), everything else matches the JSON
/// literal except timestamps (unquoted) and non-finite numbers.
impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Number(n) => f.write_str(&number_text(*n)),
            Scalar::String(s) => f.write_str(s),
            Scalar::Timestamp(ts) => f.write_str(&timestamp_text(ts)),
        }
    }
}

/// Renders a number in its shortest canonical form.
///
/// Integral values below `1e21` have no fractional part or exponent, `-0`
/// collapses to `0`.
pub(crate) fn number_text(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    if n.fract() == 0.0 && n.abs() < 1e21 {
        return format!("{:.0}", n);
    }
    serde_json::Number::from_f64(n)
        .map(|num| num.to_string())
        .unwrap_or_else(|| n.to_string())
}

/// ISO-8601 with exactly three sub-second digits and a `Z` designator.
pub(crate) fn timestamp_text(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// JSON-escapes and quotes a string.
pub(crate) fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

/// A node of the input graph.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GraphValue {
    /// JSON `null`.
    #[default]
    Null,
    /// Boolean leaf.
    Bool(bool),
    /// Numeric leaf.
    Number(f64),
    /// String leaf.
    String(String),
    /// Timestamp leaf (UTC).
    Timestamp(DateTime<Utc>),
    /// Ordered sequence.
    Array(Vec<GraphValue>),
    /// String-keyed mapping.
    Object(ObjectMap),
}

impl GraphValue {
    /// Builds an object from key/value pairs. A repeated key replaces the earlier value.
    pub fn object<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<GraphValue>,
    {
        GraphValue::Object(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds an array from anything convertible into graph values.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<GraphValue>,
    {
        GraphValue::Array(items.into_iter().map(Into::into).collect())
    }

    /// Returns the scalar payload of a leaf, or `None` for arrays and objects.
    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            GraphValue::Null => Some(Scalar::Null),
            GraphValue::Bool(b) => Some(Scalar::Bool(*b)),
            GraphValue::Number(n) => Some(Scalar::Number(*n)),
            GraphValue::String(s) => Some(Scalar::String(s.clone())),
            GraphValue::Timestamp(ts) => Some(Scalar::Timestamp(*ts)),
            GraphValue::Array(_) | GraphValue::Object(_) => None,
        }
    }

    /// Converts parsed JSON, turning RFC 3339 strings into timestamps.
    pub fn from_json_detect_timestamps(value: Value) -> Self {
        convert_json(value, true)
    }
}

fn convert_json(value: Value, detect_timestamps: bool) -> GraphValue {
    match value {
        Value::Null => GraphValue::Null,
        Value::Bool(b) => GraphValue::Bool(b),
        Value::Number(n) => GraphValue::Number(n.as_f64().unwrap_or(f64::NAN)),
        Value::String(s) => {
            if detect_timestamps {
                if let Ok(ts) = DateTime::parse_from_rfc3339(&s) {
                    return GraphValue::Timestamp(ts.with_timezone(&Utc));
                }
            }
            GraphValue::String(s)
        }
        Value::Array(items) => GraphValue::Array(
            items
                .into_iter()
                .map(|item| convert_json(item, detect_timestamps))
                .collect(),
        ),
        Value::Object(map) => GraphValue::Object(
            map.into_iter()
                .map(|(k, v)| (k, convert_json(v, detect_timestamps)))
                .collect(),
        ),
    }
}

impl From<Value> for GraphValue {
    fn from(value: Value) -> Self {
        convert_json(value, false)
    }
}

impl From<Scalar> for GraphValue {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Null => GraphValue::Null,
            Scalar::Bool(b) => GraphValue::Bool(b),
            Scalar::Number(n) => GraphValue::Number(n),
            Scalar::String(s) => GraphValue::String(s),
            Scalar::Timestamp(ts) => GraphValue::Timestamp(ts),
        }
    }
}

impl From<bool> for GraphValue {
    fn from(value: bool) -> Self {
        GraphValue::Bool(value)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for GraphValue {
                fn from(value: $ty) -> Self {
                    GraphValue::Number(value as f64)
                }
            }
        )*
    };
}

from_number!(f64, f32, i64, i32, i16, i8, u64, u32, u16, u8, usize);

impl From<&str> for GraphValue {
    fn from(value: &str) -> Self {
        GraphValue::String(value.to_string())
    }
}

impl From<String> for GraphValue {
    fn from(value: String) -> Self {
        GraphValue::String(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for GraphValue {
    fn from(value: DateTime<Tz>) -> Self {
        GraphValue::Timestamp(value.with_timezone(&Utc))
    }
}

impl<V: Into<GraphValue>> From<Vec<V>> for GraphValue {
    fn from(value: Vec<V>) -> Self {
        GraphValue::array(value)
    }
}

impl<V: Into<GraphValue>> From<Option<V>> for GraphValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(GraphValue::Null, Into::into)
    }
}

impl From<ObjectMap> for GraphValue {
    fn from(value: ObjectMap) -> Self {
        GraphValue::Object(value)
    }
}
