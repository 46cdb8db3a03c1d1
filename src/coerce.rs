//! Opt-in scalar coercion for formats without typed values (INI).
//!
//! Never applied implicitly: path accessors treat `"8080"` as a string
//! until a caller asks for this pass.
use crate::value::DynamicValue;

/// New tree with string leaves spelled as booleans or numbers converted.
/// The input is left untouched.
pub fn coerce_scalars(value: &DynamicValue) -> DynamicValue {
    match value {
        DynamicValue::String(s) => coerce_str(s),
        DynamicValue::Array(xs) => DynamicValue::Array(xs.iter().map(coerce_scalars).collect()),
        DynamicValue::Object(m) => DynamicValue::Object(
            m.iter().map(|(k, v)| (k.clone(), coerce_scalars(v))).collect()
        ),
        other => other.deep_copy(),
    }
}

fn coerce_str(s: &str) -> DynamicValue {
    let t = s.trim();
    match t.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => return DynamicValue::Bool(true),
        "false" | "no" | "off" => return DynamicValue::Bool(false),
        _ => {}
    }
    if let Ok(i) = t.parse::<i64>() {
        return DynamicValue::Int(i);
    }
    // only decimal-looking text; "inf" / "nan" stay strings
    if t.bytes().any(|b| b.is_ascii_digit()) {
        if let Ok(f) = t.parse::<f64>() {
            if f.is_finite() {
                return DynamicValue::Float(f);
            }
        }
    }
    DynamicValue::String(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{parse, FormatTag};

    #[test]
    fn ini_leaves_gain_types() {
        let raw = parse(FormatTag::Ini, b"[server]\nport = 8080\nratio = 0.25\ndebug = On\nname = api\nempty =\n").unwrap();
        let typed = coerce_scalars(&raw);
        assert_eq!(typed.get("server.port"), Some(&DynamicValue::Int(8080)));
        assert_eq!(typed.get("server.ratio"), Some(&DynamicValue::Float(0.25)));
        assert_eq!(typed.get("server.debug"), Some(&DynamicValue::Bool(true)));
        assert_eq!(typed.get("server.name"), Some(&DynamicValue::from("api")));
        assert_eq!(typed.get("server.empty"), Some(&DynamicValue::from("")));
        // source tree still all strings
        assert_eq!(raw.get("server.port"), Some(&DynamicValue::from("8080")));
    }

    #[test]
    fn non_numeric_words_stay_strings() {
        assert_eq!(coerce_str("nan"), DynamicValue::from("nan"));
        assert_eq!(coerce_str("infinity"), DynamicValue::from("infinity"));
        assert_eq!(coerce_str("1.2.3"), DynamicValue::from("1.2.3"));
        assert_eq!(coerce_str("-7"), DynamicValue::Int(-7));
        assert_eq!(coerce_str("1e3"), DynamicValue::Float(1000.0));
    }
}
