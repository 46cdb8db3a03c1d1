//! A parsed config file: root tree, the format it came from, and where.
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;

use crate::detect;
use crate::error::{Error, Result};
use crate::format::{self, FormatTag};
use crate::schema::SchemaRegistry;
use crate::settings::Settings;
use crate::value::DynamicValue;

#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: DynamicValue,
    format: FormatTag,
    origin: Option<PathBuf>,
}

impl ConfigDocument {
    /// Parse in-memory bytes of a known format.
    pub fn parse(bytes: &[u8], format: FormatTag) -> Result<Self> {
        let root = format::parse(format, bytes)?;
        Ok(Self { root, format, origin: None })
    }

    /// Bytes read from `path`; the format comes from the extension, then
    /// the content. Nothing matching is `UnsupportedFormat`.
    pub fn from_source(path: impl AsRef<Path>, bytes: &[u8]) -> Result<Self> {
        let path = path.as_ref();
        let format = detect::detect_path(path, bytes)
            .ok_or_else(|| Error::unsupported(path.display().to_string()))?;
        Self::from_source_as(path, bytes, format)
    }

    pub fn from_source_as(path: impl AsRef<Path>, bytes: &[u8], format: FormatTag) -> Result<Self> {
        let path = path.as_ref();
        let root = format::parse(format, bytes).map_err(|e| match e {
            Error::Parse(pe) => Error::Parse(pe.with_origin(path)),
            other => other,
        })?;
        tracing::debug!(path = %path.display(), %format, "document loaded");
        Ok(Self { root, format, origin: Some(path.to_path_buf()) })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read(path)?;
        Self::from_source(path, &bytes)
    }

    /// Load with the caller's settings: format override and INI coercion.
    pub fn load_with(path: impl AsRef<Path>, settings: &Settings) -> Result<Self> {
        let path = path.as_ref();
        let bytes = read(path)?;
        let doc = match settings.format_override {
            Some(format) => Self::from_source_as(path, &bytes, format)?,
            None => Self::from_source(path, &bytes)?,
        };
        if settings.coerce_scalars && doc.format == FormatTag::Ini {
            return Ok(doc.with_coerced_scalars());
        }
        Ok(doc)
    }

    /// Same document with string leaves converted to bools and numbers.
    pub fn with_coerced_scalars(self) -> Self {
        let root = crate::coerce::coerce_scalars(&self.root);
        Self { root, ..self }
    }

    pub fn root(&self) -> &DynamicValue { &self.root }

    pub fn format(&self) -> FormatTag { self.format }

    pub fn origin(&self) -> Option<&Path> { self.origin.as_deref() }

    pub fn into_root(self) -> DynamicValue { self.root }

    pub fn get(&self, path: &str) -> Option<&DynamicValue> { self.root.get(path) }

    pub fn keys(&self) -> Vec<String> { crate::keys::enumerate(&self.root) }

    pub fn infer(&self, root_name: &str) -> Result<SchemaRegistry> {
        crate::inference::infer(&self.root, root_name)
    }

    /// Deserialize into a caller-defined struct.
    pub fn bind<T: DeserializeOwned>(&self) -> Result<T> {
        crate::path_de::from_value_with_path(&self.root)
    }

    /// Re-emit the tree, possibly in another format.
    pub fn emit(&self, format: FormatTag) -> Result<String> {
        format::emit(&self.root, format)
    }
}

fn read(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })
}
