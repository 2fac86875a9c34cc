//! Numeric payload fields.
//!
//! The API is inconsistent about how it encodes numbers: temperatures may
//! arrive as `54.5` or `"54.5"`. Both forms are accepted here and coerced
//! once, at the parse boundary.

use serde::Deserialize;

use crate::error::{Error, Result};

/// A JSON value that should hold a number, either bare or quoted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// A JSON number.
    Number(serde_json::Number),
    /// A JSON string expected to contain a number.
    Text(String),
}

impl NumericField {
    /// Read the value as a finite float.
    ///
    /// `field` names the payload path and only appears in the error.
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Self::Number(n) => n.as_f64(),
            Self::Text(s) => s.trim().parse::<f64>().ok(),
        };
        match value {
            Some(v) if v.is_finite() => Ok(v),
            _ => Err(self.invalid(field, "a number")),
        }
    }

    /// Read the value as an integer.
    ///
    /// JSON floats are truncated toward zero. Strings must hold an integer.
    pub fn to_i64(&self, field: &str) -> Result<i64> {
        let value = match self {
            Self::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && v.abs() < i64::MAX as f64)
                    .map(|v| v.trunc() as i64)
            }),
            Self::Text(s) => s.trim().parse::<i64>().ok(),
        };
        value.ok_or_else(|| self.invalid(field, "an integer"))
    }

    fn invalid(&self, field: &str, expected: &str) -> Error {
        let got = match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => format!("{s:?}"),
        };
        Error::unexpected(format!("field `{field}` is not {expected}: {got}"))
    }
}
