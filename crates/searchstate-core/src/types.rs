use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Numeric operators
// ---------------------------------------------------------------------------

/// Comparison operator of a numeric refinement.
///
/// The six operators understood by the search backend get their own variant.
/// Any other string is kept verbatim in [`NumericOperator::Other`]: operators are
/// never validated locally, the backend decides whether they are meaningful.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NumericOperator {
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `>=`
    Gte,
    /// `<`
    Lt,
    /// `<=`
    Lte,
    /// `!=`
    Ne,
    /// Unrecognized operator, stored as given.
    Other(String),
}

impl NumericOperator {
    /// The operator as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Ne => "!=",
            Self::Other(raw) => raw,
        }
    }
}

impl FromStr for NumericOperator {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "=" => Self::Eq,
            ">" => Self::Gt,
            ">=" => Self::Gte,
            "<" => Self::Lt,
            "<=" => Self::Lte,
            "!=" => Self::Ne,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl From<&str> for NumericOperator {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<String> for NumericOperator {
    fn from(value: String) -> Self {
        match value.parse::<Self>() {
            Ok(Self::Other(_)) => Self::Other(value),
            Ok(op) => op,
            Err(never) => match never {},
        }
    }
}

impl From<NumericOperator> for String {
    fn from(op: NumericOperator) -> Self {
        match op {
            NumericOperator::Other(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for NumericOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Wire parameter values
// ---------------------------------------------------------------------------

/// A scalar value in the flat request parameter mapping.
///
/// Serializes untagged, so `Text("shoes")` becomes `"shoes"` and
/// `Integer(20)` becomes `20`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Integer(u64),
    Text(String),
}

impl ParamValue {
    /// The string payload, if this is a text value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer payload, if this is an integer value.
    #[must_use]
    pub const fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean payload, if this is a boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Integer(u64::from(value))
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── NumericOperator ────────────────────────────────────────────────

    #[test]
    fn known_operators_parse() {
        assert_eq!(NumericOperator::from("="), NumericOperator::Eq);
        assert_eq!(NumericOperator::from(">"), NumericOperator::Gt);
        assert_eq!(NumericOperator::from(">="), NumericOperator::Gte);
        assert_eq!(NumericOperator::from("<"), NumericOperator::Lt);
        assert_eq!(NumericOperator::from("<="), NumericOperator::Lte);
        assert_eq!(NumericOperator::from("!="), NumericOperator::Ne);
    }

    #[test]
    fn unknown_operator_is_kept_verbatim() {
        let op = NumericOperator::from("=~");
        assert_eq!(op, NumericOperator::Other("=~".into()));
        assert_eq!(op.as_str(), "=~");
        assert_eq!(String::from(op), "=~");
    }

    #[test]
    fn operator_display_matches_wire_form() {
        assert_eq!(NumericOperator::Gte.to_string(), ">=");
        assert_eq!(NumericOperator::Ne.to_string(), "!=");
    }

    #[test]
    fn operator_serializes_as_string() {
        let json = serde_json::to_string(&NumericOperator::Lte).unwrap();
        assert_eq!(json, r#""<=""#);
        let decoded: NumericOperator = serde_json::from_str(r#"">""#).unwrap();
        assert_eq!(decoded, NumericOperator::Gt);
    }

    #[test]
    fn operator_works_as_json_map_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(NumericOperator::Gt, 10.0_f64);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{">":10.0}"#);
    }

    // ── ParamValue ─────────────────────────────────────────────────────

    #[test]
    fn param_value_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(ParamValue::from("shoes")).unwrap(),
            serde_json::json!("shoes")
        );
        assert_eq!(
            serde_json::to_value(ParamValue::from(20_u32)).unwrap(),
            serde_json::json!(20)
        );
        assert_eq!(
            serde_json::to_value(ParamValue::from(true)).unwrap(),
            serde_json::json!(true)
        );
    }

    #[test]
    fn param_value_accessors() {
        assert_eq!(ParamValue::from("min").as_str(), Some("min"));
        assert_eq!(ParamValue::from(3_u32).as_u64(), Some(3));
        assert_eq!(ParamValue::from(false).as_bool(), Some(false));
        assert_eq!(ParamValue::from(true).as_str(), None);
    }
}
