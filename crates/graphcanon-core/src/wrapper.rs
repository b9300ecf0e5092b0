//! Value wrappers adapt a scalar leaf to the uniform interface collectors read.

use crate::value::Scalar;
use std::fmt;

/// Uniform view over a wrapped scalar.
///
/// `as_value` is the untouched scalar (hash input); `to_text` is the form
/// written by the JSON collector.
pub trait ValueWrapper: fmt::Debug + Send + Sync {
    /// The original scalar.
    fn as_value(&self) -> &Scalar;
    /// Text emitted into JSON output.
    fn to_text(&self) -> String;
}

/// Default wrapper: renders the scalar as a canonical JSON literal.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonScalar(Scalar);

impl JsonScalar {
    /// Wraps a scalar.
    pub fn new(value: Scalar) -> Self {
        Self(value)
    }
}

impl ValueWrapper for JsonScalar {
    fn as_value(&self) -> &Scalar {
        &self.0
    }

    fn to_text(&self) -> String {
        self.0.to_json_literal()
    }
}

/// Emits the natural string form verbatim, without JSON quoting.
///
/// Useful when the caller already holds pre-rendered JSON fragments in string
/// leaves; the collector does not validate them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlainScalar(Scalar);

impl PlainScalar {
    /// Wraps a scalar.
    pub fn new(value: Scalar) -> Self {
        Self(value)
    }
}

impl ValueWrapper for PlainScalar {
    fn as_value(&self) -> &Scalar {
        &self.0
    }

    fn to_text(&self) -> String {
        self.0.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn json_scalar_renders_literals() {
        assert_eq!(JsonScalar::new(Scalar::Null).to_text(), "null");
        assert_eq!(JsonScalar::new(Scalar::Bool(false)).to_text(), "false");
        assert_eq!(JsonScalar::new(Scalar::Number(5.0)).to_text(), "5");
        assert_eq!(JsonScalar::new(Scalar::String("xx".into())).to_text(), "\"xx\"");
        let ts = Utc.timestamp_millis_opt(444).unwrap();
        assert_eq!(
            JsonScalar::new(Scalar::Timestamp(ts)).to_text(),
            "\"1970-01-01T00:00:00.444Z\""
        );
    }

    #[test]
    fn wrappers_keep_original_value() {
        let wrapped = JsonScalar::new(Scalar::Number(4711.0));
        assert_eq!(wrapped.as_value(), &Scalar::Number(4711.0));
    }

    #[test]
    fn plain_scalar_is_unquoted() {
        let raw = PlainScalar::new(Scalar::String("{\"pre\":1}".into()));
        assert_eq!(raw.to_text(), "{\"pre\":1}");
    }
}
