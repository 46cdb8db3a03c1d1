//! Struct-schema inference from a single example document.
//!
//! Walk an object tree once, turning each object into a named struct and
//! each key into a typed field. Results land in a [`SchemaRegistry`].
//!
//! Rules worth knowing before reading the code:
//! - Keys are visited in lexicographic order, so output does not depend on
//!   the source document's key order.
//! - Arrays are typed from their first element only. A heterogeneous array
//!   gets whatever its head says.
//! - A struct name that is already registered is skipped, not merged
//!   (first-wins).
//! - A struct is registered only after all of its fields are computed;
//!   nested structs are committed before their parent.
pub mod naming;

use crate::error::{Error, Result};
use crate::schema::{Primitive, SchemaField, SchemaRegistry, SchemaStruct, TypeDescriptor};
use crate::value::{DynamicValue, Map};

use naming::{pascal_case, singular};

// ------------------------------- Policy ---------------------------------- //

pub const DEFAULT_MAX_DEPTH: usize = 128;
const ITEM_SUFFIX: &str = "Item";

// ------------------------------- Front API -------------------------------- //

/// Inference state: a registry that may accumulate over several documents.
///
/// Not synchronized. Callers sharing one across threads wrap it themselves.
pub struct Inference {
    registry: SchemaRegistry,
    max_depth: usize,
}

impl Default for Inference {
    fn default() -> Self { Self::new() }
}

impl Inference {
    pub fn new() -> Self {
        Self { registry: SchemaRegistry::new(), max_depth: DEFAULT_MAX_DEPTH }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Continue from structs found earlier; their names stay taken.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Infer `tree` under `root_name`. An array root is inferred from its
    /// first element as `{root_name}Item`.
    pub fn observe(&mut self, tree: &DynamicValue, root_name: &str) -> Result<()> {
        match tree {
            DynamicValue::Object(map) => self.analyze_object(map, root_name, 0),
            DynamicValue::Array(xs) => match xs.first() {
                Some(DynamicValue::Object(map)) => {
                    self.analyze_object(map, &format!("{root_name}{ITEM_SUFFIX}"), 0)
                }
                Some(other) => Err(Error::UnsupportedRootShape { found: other.kind() }),
                None => Err(Error::UnsupportedRootShape { found: tree.kind() }),
            },
            other => Err(Error::UnsupportedRootShape { found: other.kind() }),
        }
    }

    pub fn registry(&self) -> &SchemaRegistry { &self.registry }

    pub fn into_registry(self) -> SchemaRegistry { self.registry }

    // ------------------------------ Analyze ------------------------------- //

    fn analyze_object(&mut self, map: &Map, name: &str, depth: usize) -> Result<()> {
        if self.registry.contains(name) {
            tracing::trace!(name, "struct already registered, skipping");
            return Ok(());
        }
        if depth >= self.max_depth {
            return Err(Error::DepthLimitExceeded { limit: self.max_depth });
        }

        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();

        let mut fields = Vec::with_capacity(keys.len());
        for key in keys {
            let value = &map[key.as_str()];
            let field_name = pascal_case(key);
            let ty = self.classify_field(value, name, key, depth + 1)?;
            fields.push(SchemaField {
                name: field_name,
                source_key: key.clone(),
                ty,
                optional: value.is_null(),
            });
        }

        tracing::trace!(name, fields = fields.len(), "registering struct");
        self.registry.register(SchemaStruct { name: name.to_string(), fields });
        Ok(())
    }

    fn classify_field(&mut self, value: &DynamicValue, parent: &str, key: &str, depth: usize) -> Result<TypeDescriptor> {
        let nested = match value {
            DynamicValue::Array(_) => element_struct_name(parent, key),
            _ => format!("{parent}{}", pascal_case(key)),
        };
        self.classify(value, &nested, depth)
    }

    /// `name` is used if `value` (or the head of an array) is an object.
    fn classify(&mut self, value: &DynamicValue, name: &str, depth: usize) -> Result<TypeDescriptor> {
        Ok(match value {
            DynamicValue::Null => TypeDescriptor::Primitive(Primitive::Any),
            DynamicValue::Bool(_) => TypeDescriptor::Primitive(Primitive::Bool),
            DynamicValue::Int(_) => TypeDescriptor::Primitive(Primitive::Int),
            DynamicValue::Float(_) => TypeDescriptor::Primitive(Primitive::Float),
            DynamicValue::String(_) => TypeDescriptor::Primitive(Primitive::String),
            DynamicValue::Array(xs) => {
                let item = match xs.first() {
                    None => TypeDescriptor::Primitive(Primitive::Any),
                    Some(head) => {
                        if depth >= self.max_depth {
                            return Err(Error::DepthLimitExceeded { limit: self.max_depth });
                        }
                        let inner = match head {
                            DynamicValue::Array(_) => format!("{name}{ITEM_SUFFIX}"),
                            _ => name.to_string(),
                        };
                        self.classify(head, &inner, depth + 1)?
                    }
                };
                TypeDescriptor::Array(Box::new(item))
            }
            DynamicValue::Object(map) => {
                self.analyze_object(map, name, depth)?;
                TypeDescriptor::Reference(name.to_string())
            }
        })
    }
}

/// `{Parent}{Singular}` for plural keys, `{Parent}{Key}Item` otherwise.
fn element_struct_name(parent: &str, key: &str) -> String {
    match singular(key) {
        Some(one) => format!("{parent}{}", pascal_case(&one)),
        None => format!("{parent}{}{ITEM_SUFFIX}", pascal_case(key)),
    }
}

/// One-shot inference into a fresh registry.
pub fn infer(tree: &DynamicValue, root_name: &str) -> Result<SchemaRegistry> {
    let mut inf = Inference::new();
    inf.observe(tree, root_name)?;
    Ok(inf.into_registry())
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Kind;
    use serde_json::json;

    fn prim(p: Primitive) -> TypeDescriptor { TypeDescriptor::Primitive(p) }

    fn field<'a>(s: &'a SchemaStruct, key: &str) -> &'a SchemaField {
        s.fields.iter().find(|f| f.source_key == key).unwrap()
    }

    #[test]
    fn scalars_and_nulls() {
        let v = DynamicValue::from(json!({"b": true, "i": 1, "f": 1.5, "s": "x", "n": null}));
        let r = infer(&v, "Config").unwrap();
        let s = r.get("Config").unwrap();
        let names: Vec<_> = s.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["B", "F", "I", "N", "S"]);
        assert_eq!(field(s, "b").ty, prim(Primitive::Bool));
        assert_eq!(field(s, "i").ty, prim(Primitive::Int));
        assert_eq!(field(s, "f").ty, prim(Primitive::Float));
        assert_eq!(field(s, "s").ty, prim(Primitive::String));
        assert_eq!(field(s, "n").ty, prim(Primitive::Any));
        assert!(field(s, "n").optional);
        assert!(!field(s, "s").optional);
    }

    #[test]
    fn nested_objects_become_references() {
        let v = DynamicValue::from(json!({"database": {"host": "h", "port": 1}}));
        let r = infer(&v, "Config").unwrap();
        assert_eq!(field(r.get("Config").unwrap(), "database").ty, TypeDescriptor::Reference("ConfigDatabase".into()));
        let db = r.get("ConfigDatabase").unwrap();
        assert_eq!(db.fields.len(), 2);
        assert_eq!(field(db, "port").name, "Port");
    }

    #[test]
    fn array_of_objects_uses_first_element_only() {
        let v = DynamicValue::from(json!({"items": [{"n": 1}, {"n": "two", "extra": true}]}));
        let r = infer(&v, "Config").unwrap();
        assert_eq!(
            field(r.get("Config").unwrap(), "items").ty,
            TypeDescriptor::Array(Box::new(TypeDescriptor::Reference("ConfigItem".into())))
        );
        let item = r.get("ConfigItem").unwrap();
        assert_eq!(item.fields.len(), 1);
        assert_eq!(item.fields[0].name, "N");
        assert_eq!(item.fields[0].ty, prim(Primitive::Int));
    }

    #[test]
    fn array_element_names() {
        let v = DynamicValue::from(json!({"data": [{"x": 1}], "grid": [[{"y": 1}]], "empty": [], "nums": [1.5]}));
        let r = infer(&v, "Root").unwrap();
        let root = r.get("Root").unwrap();
        assert_eq!(field(root, "data").ty, TypeDescriptor::Array(Box::new(TypeDescriptor::Reference("RootDataItem".into()))));
        assert_eq!(
            field(root, "grid").ty,
            TypeDescriptor::Array(Box::new(TypeDescriptor::Array(Box::new(TypeDescriptor::Reference("RootGridItemItem".into())))))
        );
        assert_eq!(field(root, "empty").ty, TypeDescriptor::Array(Box::new(prim(Primitive::Any))));
        assert_eq!(field(root, "nums").ty, TypeDescriptor::Array(Box::new(prim(Primitive::Float))));
        assert!(r.contains("RootGridItemItem"));
    }

    #[test]
    fn root_array_infers_first_element_as_item() {
        let v = DynamicValue::from(json!([{"id": 1}, {"other": 2}]));
        let r = infer(&v, "Config").unwrap();
        assert_eq!(r.names().collect::<Vec<_>>(), ["ConfigItem"]);
    }

    #[test]
    fn unsupported_roots() {
        for (v, kind) in [
            (json!([]), Kind::Array),
            (json!([1, 2]), Kind::Int),
            (json!("x"), Kind::String),
            (json!(null), Kind::Null),
        ] {
            match infer(&DynamicValue::from(v), "Config") {
                Err(Error::UnsupportedRootShape { found }) => assert_eq!(found, kind),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }

    #[test]
    fn key_order_does_not_change_output() {
        let a = DynamicValue::from(json!({"z": 1, "a": {"q": 1, "b": 2}}));
        let b = DynamicValue::from(json!({"a": {"b": 2, "q": 1}, "z": 1}));
        assert_eq!(infer(&a, "C").unwrap(), infer(&b, "C").unwrap());
    }

    #[test]
    fn name_collision_is_first_wins() {
        // `a.b` and `a_b` both derive `ConfigAB`; `a` sorts first so its child wins
        let v = DynamicValue::from(json!({"a": {"b": {"deep": 1}}, "a_b": {"flat": "x"}}));
        let r = infer(&v, "Config").unwrap();
        let ab = r.get("ConfigAB").unwrap();
        assert_eq!(ab.fields.len(), 1);
        assert_eq!(ab.fields[0].source_key, "deep");
        assert_eq!(field(r.get("Config").unwrap(), "a_b").ty, TypeDescriptor::Reference("ConfigAB".into()));
    }

    #[test]
    fn accumulation_across_documents_keeps_earlier_structs() {
        let mut inf = Inference::new();
        inf.observe(&DynamicValue::from(json!({"a": 1})), "First").unwrap();
        inf.observe(&DynamicValue::from(json!({"b": 2})), "First").unwrap();
        inf.observe(&DynamicValue::from(json!({"c": 3})), "Second").unwrap();
        let r = inf.into_registry();
        assert_eq!(r.get("First").unwrap().fields[0].source_key, "a");
        assert!(r.contains("Second"));
    }

    #[test]
    fn depth_failure_commits_only_finished_structs() {
        let v = DynamicValue::from(json!({"ok": {"x": 1}, "deep": {"a": {"b": {"c": 1}}}}));
        let mut inf = Inference::new().with_max_depth(3);
        let err = inf.observe(&v, "Config").unwrap_err();
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 3 }));
        let r = inf.registry();
        // `deep` sorts before `ok`, so only the chain under `deep` got far enough to fail
        assert!(!r.contains("Config"));
        assert!(!r.contains("ConfigDeep"));
        assert!(!r.contains("ConfigDeepA"));
        assert!(!r.contains("ConfigOk"));
    }

    #[test]
    fn depth_failure_keeps_structs_finished_before_it() {
        let v = DynamicValue::from(json!({"a_ok": {"x": 1}, "deep": {"a": {"b": {"c": 1}}}}));
        let mut inf = Inference::new().with_max_depth(3);
        assert!(inf.observe(&v, "Config").is_err());
        let r = inf.registry();
        assert_eq!(r.names().collect::<Vec<_>>(), ["ConfigAOk"]);
        assert_eq!(field(r.get("ConfigAOk").unwrap(), "x").ty, prim(Primitive::Int));
        assert!(!r.contains("Config"));
    }

    #[test]
    fn seeded_registry_keeps_its_entries() {
        let seed = infer(&DynamicValue::from(json!({"host": "h"})), "Db").unwrap();
        let mut inf = Inference::new().with_registry(seed);
        inf.observe(&DynamicValue::from(json!({"port": 1})), "Db").unwrap();
        inf.observe(&DynamicValue::from(json!({"ttl": 30})), "Cache").unwrap();
        let r = inf.into_registry();
        assert_eq!(r.get("Db").unwrap().fields[0].source_key, "host");
        assert!(r.contains("Cache"));
    }

    #[test]
    fn inferred_shape_admits_its_own_example() {
        let v = DynamicValue::from(json!({
            "name": "svc", "port": 8080, "debug": false,
            "db": {"host": "h", "pool": {"size": 4}}
        }));
        let r = infer(&v, "Config").unwrap();
        assert!(r.conforms("Config", &v));
        let other = DynamicValue::from(json!({
            "name": "other", "port": 1, "debug": true,
            "db": {"host": "x", "pool": {"size": 0}}
        }));
        assert!(r.conforms("Config", &other));
        let wrong = DynamicValue::from(json!({
            "name": "other", "port": "1", "debug": true,
            "db": {"host": "x", "pool": {"size": 0}}
        }));
        assert!(!r.conforms("Config", &wrong));
    }
}
