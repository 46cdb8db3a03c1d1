//! Render a [`SchemaRegistry`] as Rust source: one serde struct per entry.
use std::collections::HashSet;
use std::fmt::Write;

use crate::inference::naming::snake_case;
use crate::schema::{Primitive, SchemaRegistry, SchemaStruct, TypeDescriptor};

const KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "gen", "if", "impl", "in", "let", "loop", "match", "mod", "move",
    "mut", "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe",
    "use", "where", "while", "abstract", "become", "box", "do", "final", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];
// keywords that cannot be raw identifiers
const RESERVED: &[&str] = &["self", "super", "crate", "Self"];

pub struct Codegen {
    out: String,
}

impl Default for Codegen {
    fn default() -> Self { Self::new() }
}

impl Codegen {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    /// Emit every struct of `registry`, sorted by name.
    pub fn emit(&mut self, registry: &SchemaRegistry) {
        let _ = writeln!(self.out, "// generated by conf-osi");
        let _ = writeln!(self.out, "use serde::{{Deserialize, Serialize}};");
        for s in registry.iter() {
            self.out.push('\n');
            self.emit_struct(s);
        }
    }

    fn emit_struct(&mut self, s: &SchemaStruct) {
        let _ = writeln!(self.out, "#[derive(Debug, Clone, Serialize, Deserialize)]");
        let _ = writeln!(self.out, "pub struct {} {{", s.name);
        let mut taken = HashSet::new();
        for f in &s.fields {
            let ident = unique(rust_ident(&snake_case(&f.name)), &mut taken);
            let ty = rust_type(&f.ty);
            let ty = if f.optional { format!("Option<{ty}>") } else { ty };
            if f.optional {
                let _ = writeln!(self.out, "    #[serde(rename = {:?}, default)]", f.source_key);
            } else {
                let _ = writeln!(self.out, "    #[serde(rename = {:?})]", f.source_key);
            }
            let _ = writeln!(self.out, "    pub {ident}: {ty},");
        }
        let _ = writeln!(self.out, "}}");
    }

    pub fn into_string(self) -> String { self.out }
}

pub fn rust_type(ty: &TypeDescriptor) -> String {
    match ty {
        TypeDescriptor::Primitive(p) => match p {
            Primitive::Bool => "bool".to_string(),
            Primitive::Int => "i64".to_string(),
            Primitive::Float => "f64".to_string(),
            Primitive::String => "String".to_string(),
            Primitive::Any => "serde_json::Value".to_string(),
        },
        TypeDescriptor::Array(item) => format!("Vec<{}>", rust_type(item)),
        TypeDescriptor::Reference(name) => name.clone(),
    }
}

fn rust_ident(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("field_{name}");
    }
    if RESERVED.contains(&name) {
        return format!("{name}_");
    }
    if KEYWORDS.contains(&name) {
        return format!("r#{name}");
    }
    name.to_string()
}

/// Distinct keys can case to the same identifier (`a-b`, `a_b`).
fn unique(ident: String, taken: &mut HashSet<String>) -> String {
    if taken.insert(ident.clone()) {
        return ident;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{ident}_{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
