//! Indented structure dump of a tree, one line per leaf.
use std::fmt::Write;

use crate::value::DynamicValue;

const INDENT: &str = "  ";

pub fn tree(value: &DynamicValue) -> String {
    let mut out = String::new();
    match value {
        DynamicValue::Object(map) => {
            for (k, v) in map {
                write_node(&mut out, k, v, 0);
            }
        }
        other => write_node(&mut out, "$", other, 0),
    }
    out
}

fn write_node(out: &mut String, label: &str, value: &DynamicValue, depth: usize) {
    let pad = INDENT.repeat(depth);
    match value {
        DynamicValue::Object(map) => {
            let _ = writeln!(out, "{pad}{label}: {{");
            for (k, v) in map {
                write_node(out, k, v, depth + 1);
            }
            let _ = writeln!(out, "{pad}}}");
        }
        DynamicValue::Array(xs) => {
            let _ = writeln!(out, "{pad}{label}: [");
            for (i, x) in xs.iter().enumerate() {
                write_node(out, &format!("[{i}]"), x, depth + 1);
            }
            let _ = writeln!(out, "{pad}]");
        }
        leaf => {
            let _ = writeln!(out, "{pad}{label}: {leaf} ({})", leaf.kind());
        }
    }
}
