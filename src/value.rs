//! Canonical in-memory tree every config format parses into.
//!
//! One closed union, matched exhaustively at every consumer. Objects keep
//! the source key order for display (`IndexMap`), but equality ignores it.
use std::fmt;
use indexmap::IndexMap;
use serde::Serialize;

pub type Map = IndexMap<String, DynamicValue>;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum DynamicValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<DynamicValue>),
    Object(Map),
}

/// Fieldless variant tag, used in error messages and type checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind { Null, Bool, Int, Float, String, Array, Object }

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "int",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        };
        f.write_str(s)
    }
}

impl DynamicValue {
    pub fn kind(&self) -> Kind {
        match self {
            DynamicValue::Null => Kind::Null,
            DynamicValue::Bool(_) => Kind::Bool,
            DynamicValue::Int(_) => Kind::Int,
            DynamicValue::Float(_) => Kind::Float,
            DynamicValue::String(_) => Kind::String,
            DynamicValue::Array(_) => Kind::Array,
            DynamicValue::Object(_) => Kind::Object,
        }
    }

    /// Owned copy for callers that need to edit a sub-tree without
    /// touching the document it came from.
    pub fn deep_copy(&self) -> Self { self.clone() }

    pub fn is_null(&self) -> bool { matches!(self, DynamicValue::Null) }

    /// `Int`, or a finite `Float` equal to its own truncation.
    pub fn is_integral(&self) -> bool {
        match self {
            DynamicValue::Int(_) => true,
            DynamicValue::Float(f) => integral_f64(*f).is_some(),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self { DynamicValue::Bool(b) => Some(*b), _ => None }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self { DynamicValue::Int(i) => Some(*i), _ => None }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self { DynamicValue::Float(f) => Some(*f), _ => None }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self { DynamicValue::String(s) => Some(s), _ => None }
    }

    pub fn as_array(&self) -> Option<&[DynamicValue]> {
        match self { DynamicValue::Array(xs) => Some(xs), _ => None }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self { DynamicValue::Object(m) => Some(m), _ => None }
    }

    /// Dotted-path lookup; see [`crate::path::get`].
    pub fn get(&self, path: &str) -> Option<&DynamicValue> {
        crate::path::get(self, path)
    }
}

/// Narrow a float to `i64` when it is integral and in range.
pub(crate) fn integral_f64(f: f64) -> Option<i64> {
    // 2^63 is exact in f64; anything at or above it overflows i64.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if f.is_finite() && f.trunc() == f && f >= -LIMIT && f < LIMIT {
        Some(f as i64)
    } else {
        None
    }
}

impl fmt::Display for DynamicValue {
    /// Compact JSON text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::Value::from(self.clone());
        write!(f, "{json}")
    }
}

// ------------------------------ Conversions ------------------------------- //

impl From<serde_json::Value> for DynamicValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => DynamicValue::Null,
            Value::Bool(b) => DynamicValue::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    DynamicValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    DynamicValue::Float(u as f64)
                } else {
                    DynamicValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => DynamicValue::String(s),
            Value::Array(xs) => DynamicValue::Array(xs.into_iter().map(Self::from).collect()),
            Value::Object(m) => DynamicValue::Object(
                m.into_iter().map(|(k, v)| (k, Self::from(v))).collect()
            ),
        }
    }
}

impl From<DynamicValue> for serde_json::Value {
    fn from(v: DynamicValue) -> Self {
        use serde_json::Value;
        match v {
            DynamicValue::Null => Value::Null,
            DynamicValue::Bool(b) => Value::Bool(b),
            DynamicValue::Int(i) => Value::from(i),
            // NaN / inf have no JSON spelling
            DynamicValue::Float(f) => serde_json::Number::from_f64(f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            DynamicValue::String(s) => Value::String(s),
            DynamicValue::Array(xs) => Value::Array(xs.into_iter().map(Value::from).collect()),
            DynamicValue::Object(m) => Value::Object(
                m.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
            ),
        }
    }
}

impl From<bool> for DynamicValue {
    fn from(b: bool) -> Self { DynamicValue::Bool(b) }
}

impl From<i64> for DynamicValue {
    fn from(i: i64) -> Self { DynamicValue::Int(i) }
}

impl From<f64> for DynamicValue {
    fn from(f: f64) -> Self { DynamicValue::Float(f) }
}

impl From<&str> for DynamicValue {
    fn from(s: &str) -> Self { DynamicValue::String(s.to_string()) }
}

impl From<String> for DynamicValue {
    fn from(s: String) -> Self { DynamicValue::String(s) }
}

impl FromIterator<DynamicValue> for DynamicValue {
    fn from_iter<I: IntoIterator<Item = DynamicValue>>(iter: I) -> Self {
        DynamicValue::Array(iter.into_iter().collect())
    }
}

impl FromIterator<(String, DynamicValue)> for DynamicValue {
    fn from_iter<I: IntoIterator<Item = (String, DynamicValue)>>(iter: I) -> Self {
        DynamicValue::Object(iter.into_iter().collect())
    }
}
