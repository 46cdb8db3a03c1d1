//! Load JSON / YAML / INI config files into one dynamic tree, then query
//! it by dotted path, list its keys, or infer a struct schema from it.
pub mod value;
pub mod error;
pub mod format;
pub mod detect;
pub mod document;
pub mod path;
pub mod keys;
pub mod schema;
pub mod inference;
pub mod coerce;
pub mod path_de;
pub mod render;
pub mod codegen;
pub mod settings;

pub use document::ConfigDocument;
pub use error::{Error, ParseError, Result};
pub use format::{FormatParser, FormatTag};
pub use inference::{infer, Inference};
pub use schema::{Primitive, SchemaField, SchemaRegistry, SchemaStruct, TypeDescriptor};
pub use settings::Settings;
pub use value::{DynamicValue, Kind};
