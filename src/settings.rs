use crate::format::FormatTag;

/// Knobs shared by loading, enumeration and inference. Built once by the
/// caller (the CLI fills it from flags) and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Recursion bound for key enumeration and schema inference.
    pub max_depth: usize,
    /// Name of the top-level inferred struct.
    pub root_name: String,
    /// Run [`crate::coerce::coerce_scalars`] over INI documents after parsing.
    pub coerce_scalars: bool,
    /// Skip detection and parse every input as this format.
    pub format_override: Option<FormatTag>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: 128,
            root_name: "Config".to_string(),
            coerce_scalars: false,
            format_override: None,
        }
    }
}
