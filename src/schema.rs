// Inferred struct schema. No DynamicValue here except for conformance checks.
use std::collections::BTreeMap;
use serde::Serialize;

use crate::value::{integral_f64, DynamicValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive { Bool, Int, Float, String, Any }

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum TypeDescriptor {
    Primitive(Primitive),
    Array(Box<TypeDescriptor>),
    Reference(String),       // struct name in the owning registry
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaField {
    pub name: String,        // cased field name
    pub source_key: String,  // key as it appears in the document
    pub ty: TypeDescriptor,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaStruct {
    pub name: String,
    pub fields: Vec<SchemaField>,  // sorted by source key
}

/// Structs discovered by one or more inference runs, keyed by name.
///
/// Insertion is first-wins: a second struct under an existing name is
/// dropped, even when its shape differs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SchemaRegistry {
    structs: BTreeMap<String, SchemaStruct>,
}

impl SchemaRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, name: &str) -> Option<&SchemaStruct> { self.structs.get(name) }

    pub fn contains(&self, name: &str) -> bool { self.structs.contains_key(name) }

    pub fn len(&self) -> usize { self.structs.len() }

    pub fn is_empty(&self) -> bool { self.structs.is_empty() }

    /// Sorted by struct name.
    pub fn iter(&self) -> impl Iterator<Item = &SchemaStruct> { self.structs.values() }

    pub fn names(&self) -> impl Iterator<Item = &str> { self.structs.keys().map(String::as_str) }

    /// Returns `false` (and keeps the existing entry) when the name is taken.
    pub fn register(&mut self, s: SchemaStruct) -> bool {
        if self.structs.contains_key(&s.name) {
            return false;
        }
        self.structs.insert(s.name.clone(), s);
        true
    }

    /// Does `value` fit the struct registered as `name`?
    pub fn conforms(&self, name: &str, value: &DynamicValue) -> bool {
        match self.get(name) {
            Some(s) => s.admits(value, self),
            None => false,
        }
    }
}

impl SchemaStruct {
    /// Missing or null fields pass only when optional; extra keys are ignored.
    pub fn admits(&self, value: &DynamicValue, registry: &SchemaRegistry) -> bool {
        let DynamicValue::Object(map) = value else { return false };
        self.fields.iter().all(|f| match map.get(&f.source_key) {
            None | Some(DynamicValue::Null) => f.optional || f.ty == TypeDescriptor::Primitive(Primitive::Any),
            Some(v) => f.ty.admits(v, registry),
        })
    }
}

impl TypeDescriptor {
    pub fn admits(&self, value: &DynamicValue, registry: &SchemaRegistry) -> bool {
        match self {
            TypeDescriptor::Primitive(p) => match (p, value) {
                (Primitive::Any, _) => true,
                (Primitive::Bool, DynamicValue::Bool(_)) => true,
                (Primitive::Int, DynamicValue::Int(_)) => true,
                (Primitive::Int, DynamicValue::Float(f)) => integral_f64(*f).is_some(),
                (Primitive::Float, DynamicValue::Float(_) | DynamicValue::Int(_)) => true,
                (Primitive::String, DynamicValue::String(_)) => true,
                _ => false,
            },
            TypeDescriptor::Array(item) => match value {
                DynamicValue::Array(xs) => xs.iter().all(|x| item.admits(x, registry)),
                _ => false,
            },
            TypeDescriptor::Reference(name) => registry.conforms(name, value),
        }
    }
}
