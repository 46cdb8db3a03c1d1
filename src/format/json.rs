use super::{FormatParser, FormatTag};
use crate::error::ParseError;
use crate::value::DynamicValue;

pub struct JsonParser;

impl FormatParser for JsonParser {
    fn format(&self) -> FormatTag { FormatTag::Json }

    fn parse(&self, bytes: &[u8]) -> Result<DynamicValue, ParseError> {
        match serde_json::from_slice::<serde_json::Value>(bytes) {
            Ok(v) => Ok(DynamicValue::from(v)),
            Err(error) => {
                let mut e = ParseError::new(FormatTag::Json, error.to_string());
                if error.line() > 0 {
                    e = e.at_line(error.line(), error.column());
                }
                Err(e)
            }
        }
    }
}
