//! Dotted-path lookup and typed accessors over a [`DynamicValue`] tree.
//!
//! `a.b.c` descends through objects only: an array or scalar in the
//! middle of a path ends the lookup with `None`, never a panic. The typed
//! accessors layer one check on top: `KeyNotFound` when nothing resolves,
//! `TypeMismatch` when the variant is wrong. Two numeric rules apply and
//! nothing else converts:
//! - `get_int` accepts an integral `Float` (narrowing),
//! - `get_float` accepts an `Int` (widening).
use crate::error::{Error, Result};
use crate::value::{integral_f64, DynamicValue, Kind, Map};

pub fn get<'a>(tree: &'a DynamicValue, path: &str) -> Option<&'a DynamicValue> {
    if path.is_empty() {
        return None;
    }
    let mut current = tree;
    for segment in path.split('.') {
        match current {
            DynamicValue::Object(map) => current = map.get(segment)?,
            _ => return None,
        }
    }
    Some(current)
}

fn require<'a>(tree: &'a DynamicValue, path: &str) -> Result<&'a DynamicValue> {
    get(tree, path).ok_or_else(|| Error::KeyNotFound { path: path.to_string() })
}

impl DynamicValue {
    pub fn contains(&self, path: &str) -> bool {
        get(self, path).is_some()
    }

    pub fn get_string(&self, path: &str) -> Result<&str> {
        match require(self, path)? {
            DynamicValue::String(s) => Ok(s),
            other => Err(Error::mismatch(path, Kind::String, other.kind())),
        }
    }

    pub fn get_int(&self, path: &str) -> Result<i64> {
        match require(self, path)? {
            DynamicValue::Int(i) => Ok(*i),
            DynamicValue::Float(f) => {
                integral_f64(*f).ok_or_else(|| Error::mismatch(path, Kind::Int, Kind::Float))
            }
            other => Err(Error::mismatch(path, Kind::Int, other.kind())),
        }
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        let value = require(self, path)?;
        value.as_bool().ok_or_else(|| Error::mismatch(path, Kind::Bool, value.kind()))
    }

    pub fn get_float(&self, path: &str) -> Result<f64> {
        match require(self, path)? {
            DynamicValue::Float(f) => Ok(*f),
            DynamicValue::Int(i) => Ok(*i as f64),
            other => Err(Error::mismatch(path, Kind::Float, other.kind())),
        }
    }

    pub fn get_array(&self, path: &str) -> Result<&[DynamicValue]> {
        match require(self, path)? {
            DynamicValue::Array(xs) => Ok(xs),
            other => Err(Error::mismatch(path, Kind::Array, other.kind())),
        }
    }

    pub fn get_object(&self, path: &str) -> Result<&Map> {
        match require(self, path)? {
            DynamicValue::Object(m) => Ok(m),
            other => Err(Error::mismatch(path, Kind::Object, other.kind())),
        }
    }

    /// Every element must be a string; a bad element is reported at `path[i]`.
    pub fn get_string_array(&self, path: &str) -> Result<Vec<&str>> {
        self.get_array(path)?
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                DynamicValue::String(s) => Ok(s.as_str()),
                other => Err(Error::mismatch(&format!("{path}[{i}]"), Kind::String, other.kind())),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DynamicValue {
        DynamicValue::from(json!({
            "database": {"host": "localhost", "port": 5432, "timeout": 4.0, "ratio": 4.5},
            "debug": true,
            "tags": ["a", "b"],
            "mixed": ["a", 1],
            "empty": {},
            "nothing": null,
            "list": [{"x": 1}]
        }))
    }

    #[test]
    fn present_paths_return_exact_values() {
        let t = sample();
        assert_eq!(get(&t, "database.host"), Some(&DynamicValue::from("localhost")));
        assert_eq!(get(&t, "database.port"), Some(&DynamicValue::Int(5432)));
        assert_eq!(get(&t, "nothing"), Some(&DynamicValue::Null));
        assert_eq!(get(&t, "empty"), Some(&DynamicValue::Object(Map::new())));
    }

    #[test]
    fn absent_or_blocked_paths_are_none() {
        let t = sample();
        assert_eq!(get(&t, ""), None);
        assert_eq!(get(&t, "missing"), None);
        assert_eq!(get(&t, "database.missing"), None);
        assert_eq!(get(&t, "database.host.len"), None);
        assert_eq!(get(&t, "list.0.x"), None);
        assert_eq!(get(&t, "database."), None);
        assert_eq!(get(&DynamicValue::Int(1), "a"), None);
    }

    #[test]
    fn int_accessor_narrows_only_integral_floats() {
        let t = sample();
        assert_eq!(t.get_int("database.port").unwrap(), 5432);
        assert_eq!(t.get_int("database.timeout").unwrap(), 4);
        assert!(matches!(
            t.get_int("database.ratio"),
            Err(Error::TypeMismatch { expected: Kind::Int, found: Kind::Float, .. })
        ));
    }

    #[test]
    fn float_accessor_widens_ints() {
        let t = sample();
        assert_eq!(t.get_float("database.ratio").unwrap(), 4.5);
        assert_eq!(t.get_float("database.port").unwrap(), 5432.0);
    }

    #[test]
    fn strings_are_never_coerced() {
        let t = DynamicValue::from(json!({"port": "8080", "on": "true"}));
        assert!(matches!(t.get_int("port"), Err(Error::TypeMismatch { found: Kind::String, .. })));
        assert!(matches!(t.get_bool("on"), Err(Error::TypeMismatch { found: Kind::String, .. })));
    }

    #[test]
    fn missing_key_is_key_not_found() {
        let t = sample();
        match t.get_string("database.user") {
            Err(Error::KeyNotFound { path }) => assert_eq!(path, "database.user"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn typed_accessors() {
        let t = sample();
        assert_eq!(t.get_string("database.host").unwrap(), "localhost");
        assert!(t.get_bool("debug").unwrap());
        assert_eq!(t.get_array("tags").unwrap().len(), 2);
        assert_eq!(t.get_object("database").unwrap().len(), 4);
        assert!(matches!(t.get_object("tags"), Err(Error::TypeMismatch { .. })));
        assert!(matches!(t.get_string("nothing"), Err(Error::TypeMismatch { found: Kind::Null, .. })));
    }

    #[test]
    fn string_array_reports_bad_element() {
        let t = sample();
        assert_eq!(t.get_string_array("tags").unwrap(), vec!["a", "b"]);
        match t.get_string_array("mixed") {
            Err(Error::TypeMismatch { path, found, .. }) => {
                assert_eq!(path, "mixed[1]");
                assert_eq!(found, Kind::Int);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn contains_mirrors_get() {
        let t = sample();
        assert!(t.contains("database.port"));
        assert!(!t.contains("database.port.x"));
    }
}
