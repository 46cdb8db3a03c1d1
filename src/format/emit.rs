//! Best-effort re-emission of a tree in a given format.
//!
//! JSON and YAML carry every variant. INI only holds two levels of
//! scalars, so deeper trees are refused rather than silently flattened.
use ini::{EscapePolicy, Ini, WriteOption};

use super::ini::GENERAL_SECTION;
use super::FormatTag;
use crate::error::{Error, Result};
use crate::value::DynamicValue;

pub fn emit(value: &DynamicValue, format: FormatTag) -> Result<String> {
    match format {
        FormatTag::Json => serde_json::to_string_pretty(value)
            .map_err(|e| Error::Emit { format, reason: e.to_string() }),
        FormatTag::Yaml => serde_yaml::to_string(value)
            .map_err(|e| Error::Emit { format, reason: e.to_string() }),
        FormatTag::Ini => emit_ini(value),
        FormatTag::Toml => Err(Error::unsupported("toml (reserved, no emitter)")),
    }
}

fn emit_ini(value: &DynamicValue) -> Result<String> {
    let refuse = |reason: String| Error::Emit { format: FormatTag::Ini, reason };
    let DynamicValue::Object(root) = value else {
        return Err(refuse(format!("root must be an object, found {}", value.kind())));
    };

    let mut ini = Ini::new();
    // general-section keys first so they precede every header
    for (k, v) in root {
        if let Some(text) = ini_scalar(v) {
            ini.with_general_section().set(k.as_str(), text);
        }
    }
    for (section, v) in root {
        match v {
            DynamicValue::Object(keys) => {
                let mut setter = if section == GENERAL_SECTION {
                    ini.with_general_section()
                } else {
                    ini.with_section(Some(section.as_str()))
                };
                for (k, v) in keys {
                    let text = ini_scalar(v).ok_or_else(|| {
                        refuse(format!("`{section}.{k}` is {}, not a scalar", v.kind()))
                    })?;
                    setter.set(k.as_str(), text);
                }
            }
            DynamicValue::Array(_) => {
                return Err(refuse(format!("`{section}` is an array")));
            }
            _ => {}
        }
    }

    let mut buf = Vec::new();
    // parsing keeps backslashes literal, so writing must not add escapes
    let opt = WriteOption { escape_policy: EscapePolicy::Nothing, ..WriteOption::default() };
    ini.write_to_opt(&mut buf, opt).map_err(|e| refuse(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| refuse(e.to_string()))
}

fn ini_scalar(v: &DynamicValue) -> Option<String> {
    match v {
        DynamicValue::Null => Some(String::new()),
        DynamicValue::Bool(b) => Some(b.to_string()),
        DynamicValue::Int(i) => Some(i.to_string()),
        DynamicValue::Float(f) => Some(f.to_string()),
        DynamicValue::String(s) => Some(s.clone()),
        DynamicValue::Array(_) | DynamicValue::Object(_) => None,
    }
}
