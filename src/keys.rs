//! Enumerate every addressable dotted path of a tree.
//!
//! Only objects are descended into, matching what [`crate::path::get`]
//! can resolve; arrays are leaves. Output is sorted so two runs over the
//! same tree compare equal.
use crate::value::{DynamicValue, Map};

pub const DEFAULT_MAX_DEPTH: usize = 128;

pub fn enumerate(tree: &DynamicValue) -> Vec<String> {
    enumerate_with_depth(tree, DEFAULT_MAX_DEPTH)
}

/// Objects nested deeper than `max_depth` are listed but not expanded.
pub fn enumerate_with_depth(tree: &DynamicValue, max_depth: usize) -> Vec<String> {
    let mut out = Vec::new();
    if let DynamicValue::Object(map) = tree {
        collect(None, map, 1, max_depth, &mut out);
    }
    out.sort();
    out
}

fn collect(prefix: Option<&str>, map: &Map, depth: usize, max_depth: usize, out: &mut Vec<String>) {
    for (key, value) in map {
        let full = match prefix {
            Some(p) => format!("{p}.{key}"),
            None => key.clone(),
        };
        if let DynamicValue::Object(nested) = value {
            if depth < max_depth {
                collect(Some(full.as_str()), nested, depth + 1, max_depth, out);
            } else if !nested.is_empty() {
                tracing::warn!(path = %full, max_depth, "key enumeration truncated");
            }
        }
        out.push(full);
    }
}

impl DynamicValue {
    pub fn keys(&self) -> Vec<String> {
        enumerate(self)
    }
}
