use std::path::PathBuf;
use crate::format::FormatTag;
use crate::value::Kind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("unsupported format: {hint}")]
    UnsupportedFormat { hint: String },
    #[error("key not found: `{path}`")]
    KeyNotFound { path: String },
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch { path: String, expected: Kind, found: Kind },
    #[error("schema inference needs an object or a non-empty array of objects at the root, found {found}")]
    UnsupportedRootShape { found: Kind },
    #[error("nesting deeper than {limit} levels")]
    DepthLimitExceeded { limit: usize },
    #[error("failed to read {}: {source}", .path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },
    #[error("cannot bind `{path}`: {message}")]
    Bind { path: String, message: String },
    #[error("cannot emit {format}: {reason}")]
    Emit { format: FormatTag, reason: String },
}

impl Error {
    pub(crate) fn unsupported(hint: impl Into<String>) -> Self {
        Error::UnsupportedFormat { hint: hint.into() }
    }

    pub(crate) fn mismatch(path: &str, expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch { path: path.to_string(), expected, found }
    }
}

/// Malformed source bytes. Position fields are filled in when the codec
/// reports them; `origin` is attached once the bytes are tied to a file.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid {format}{}: {cause}", location(.origin, .line, .column))]
pub struct ParseError {
    pub format: FormatTag,
    pub origin: Option<PathBuf>,
    pub line: Option<usize>,
    pub column: Option<usize>,
    pub offset: Option<usize>,
    pub cause: String,
}

impl ParseError {
    pub fn new(format: FormatTag, cause: impl Into<String>) -> Self {
        Self { format, origin: None, line: None, column: None, offset: None, cause: cause.into() }
    }

    pub fn at_line(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}

fn location(origin: &Option<PathBuf>, line: &Option<usize>, column: &Option<usize>) -> String {
    let mut out = String::new();
    if let Some(p) = origin {
        out.push_str(&format!(" in {}", p.display()));
    }
    match (line, column) {
        (Some(l), Some(c)) => out.push_str(&format!(" at {l}:{c}")),
        (Some(l), None) => out.push_str(&format!(" at line {l}")),
        _ => {}
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_message_names_file_and_position() {
        let e = ParseError::new(FormatTag::Json, "expected value")
            .at_line(3, 7)
            .with_origin("conf/app.json");
        assert_eq!(e.to_string(), "invalid json in conf/app.json at 3:7: expected value");
    }

    #[test]
    fn mismatch_message_names_both_kinds() {
        let e = Error::mismatch("db.port", Kind::Int, Kind::String);
        assert_eq!(e.to_string(), "type mismatch at `db.port`: expected int, found string");
    }
}
