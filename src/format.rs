//! Format adapters: raw bytes of one serialization format → [`DynamicValue`].
//!
//! The byte-level work is delegated to the codec crates (serde_json,
//! serde_yaml, rust-ini); each adapter only normalizes the codec's output
//! into the canonical tree and maps codec errors to [`ParseError`].
pub mod json;
pub mod yaml;
pub mod ini;
pub mod emit;

use std::fmt;
use serde::Serialize;

use crate::error::{Error, ParseError, Result};
use crate::value::DynamicValue;

pub use json::JsonParser;
pub use yaml::YamlParser;
pub use ini::IniParser;
pub use emit::emit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Json,
    Yaml,
    Ini,
    /// Recognized by the detector; no parser yet.
    Toml,
}

impl FormatTag {
    pub const ALL: [FormatTag; 4] = [FormatTag::Json, FormatTag::Yaml, FormatTag::Ini, FormatTag::Toml];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Json => "json",
            FormatTag::Yaml => "yaml",
            FormatTag::Ini => "ini",
            FormatTag::Toml => "toml",
        }
    }

    /// Extension lookup, case-insensitive, leading dot optional.
    pub fn from_extension(ext: &str) -> Option<FormatTag> {
        let ext = ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(FormatTag::Json),
            "yaml" | "yml" => Some(FormatTag::Yaml),
            "ini" => Some(FormatTag::Ini),
            "toml" => Some(FormatTag::Toml),
            _ => None,
        }
    }

    /// Parser for this tag; `Toml` is reserved and has none.
    pub fn parser(self) -> Result<&'static dyn FormatParser> {
        match self {
            FormatTag::Json => Ok(&JsonParser),
            FormatTag::Yaml => Ok(&YamlParser),
            FormatTag::Ini => Ok(&IniParser),
            FormatTag::Toml => Err(Error::unsupported("toml (reserved, no parser)")),
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormatTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        FormatTag::from_extension(s).ok_or_else(|| Error::unsupported(s))
    }
}

pub trait FormatParser: Send + Sync {
    fn format(&self) -> FormatTag;
    fn parse(&self, bytes: &[u8]) -> Result<DynamicValue, ParseError>;
}

/// Parse `bytes` with the parser registered for `format`.
pub fn parse(format: FormatTag, bytes: &[u8]) -> Result<DynamicValue> {
    let parser = format.parser()?;
    tracing::debug!(%format, len = bytes.len(), "parsing");
    Ok(parser.parse(bytes)?)
}
