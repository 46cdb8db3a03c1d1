use serde_yaml::Value;

use super::{FormatParser, FormatTag};
use crate::error::ParseError;
use crate::value::{DynamicValue, Map};

pub struct YamlParser;

impl FormatParser for YamlParser {
    fn format(&self) -> FormatTag { FormatTag::Yaml }

    fn parse(&self, bytes: &[u8]) -> Result<DynamicValue, ParseError> {
        let value = serde_yaml::from_slice::<Value>(bytes).map_err(|error| {
            let mut e = ParseError::new(FormatTag::Yaml, error.to_string());
            if let Some(loc) = error.location() {
                e = e.at_line(loc.line(), loc.column()).at_offset(loc.index());
            }
            e
        })?;
        from_yaml(value)
    }
}

fn from_yaml(v: Value) -> Result<DynamicValue, ParseError> {
    Ok(match v {
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
        Value::Sequence(xs) => DynamicValue::Array(
            xs.into_iter().map(from_yaml).collect::<Result<_, _>>()?
        ),
        Value::Mapping(m) => {
            let mut out = Map::with_capacity(m.len());
            for (k, v) in m {
                out.insert(mapping_key(k)?, from_yaml(v)?);
            }
            DynamicValue::Object(out)
        }
        Value::Tagged(tagged) => from_yaml(tagged.value)?,
    })
}

/// Scalar keys are stringified; anything else has no dotted-path spelling.
fn mapping_key(k: Value) -> Result<String, ParseError> {
    match k {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok("null".to_string()),
        Value::Tagged(tagged) => mapping_key(tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => Err(ParseError::new(
            FormatTag::Yaml,
            "mapping keys must be scalars",
        )),
    }
}
