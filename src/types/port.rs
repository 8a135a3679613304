//! Port values as they appear on the wire.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// The token meaning "any value". The remote side encodes it as an absent field.
pub const WILDCARD: &str = "*";

/// A port as returned by the remote listing: either a JSON number or a string.
///
/// Deserialization never fails on the value itself. Integers (negative ones
/// included) are kept as numbers, strings as text, and anything else becomes
/// empty text that matches no port, so one odd row cannot reject a listing.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for PortValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| PortValue::Text(String::new()), PortValue::Number),
            Value::String(s) => PortValue::Text(s),
            _ => PortValue::Text(String::new()),
        })
    }
}

impl PortValue {
    /// Numeric value, if the port is a number or a numeric string.
    pub fn as_number(&self) -> Option<i64> {
        match self {
            PortValue::Number(n) => Some(*n),
            PortValue::Text(s) => s.parse().ok(),
        }
    }
}

impl Display for PortValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PortValue::Number(n) => write!(f, "{n}"),
            PortValue::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<u16> for PortValue {
    fn from(port: u16) -> Self {
        PortValue::Number(port.into())
    }
}

impl From<&str> for PortValue {
    fn from(port: &str) -> Self {
        PortValue::Text(port.to_string())
    }
}

/// Render an optional wire port, substituting the wildcard when absent.
pub(crate) fn or_wildcard(port: Option<&PortValue>) -> String {
    port.map_or_else(|| WILDCARD.to_string(), PortValue::to_string)
}
