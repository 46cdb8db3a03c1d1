//! INI → two-level object tree.
//!
//! `{section: {key: "value"}}`; keys before the first header are filed
//! under [`GENERAL_SECTION`]. INI has no typed values, so every leaf is
//! the literal value text as a `String` until a caller opts into
//! [`crate::coerce::coerce_scalars`].
use ini::{Ini, ParseOption};

use super::{FormatParser, FormatTag};
use crate::error::ParseError;
use crate::value::{DynamicValue, Map};

/// Section holding keys that precede every header.
pub const GENERAL_SECTION: &str = "default";

pub struct IniParser;

/// Backslashes are value text, not escapes.
fn parse_option() -> ParseOption {
    ParseOption { enabled_escape: false, ..ParseOption::default() }
}

impl FormatParser for IniParser {
    fn format(&self) -> FormatTag { FormatTag::Ini }

    fn parse(&self, bytes: &[u8]) -> Result<DynamicValue, ParseError> {
        let text = std::str::from_utf8(bytes).map_err(|error| {
            ParseError::new(FormatTag::Ini, error.to_string()).at_offset(error.valid_up_to())
        })?;
        let ini = Ini::load_from_str_opt(text, parse_option()).map_err(|error| {
            ParseError::new(FormatTag::Ini, error.msg.to_string()).at_line(error.line, error.col)
        })?;
        Ok(flatten(&ini))
    }
}

fn flatten(ini: &Ini) -> DynamicValue {
    let mut root = Map::new();
    for (section, props) in ini.iter() {
        let name = match section {
            Some(name) => name,
            // the general section always exists; only file it when used
            None if props.is_empty() => continue,
            None => GENERAL_SECTION,
        };
        // repeated headers merge into one object
        if let DynamicValue::Object(keys) = root
            .entry(name.to_string())
            .or_insert_with(|| DynamicValue::Object(Map::new()))
        {
            for (k, v) in props.iter() {
                keys.insert(k.to_string(), DynamicValue::from(v));
            }
        }
    }
    DynamicValue::Object(root)
}
