//! Format detection: extension first, content heuristics as a fallback.
//!
//! The content heuristics are ordered and best-effort. A YAML file that
//! happens to contain a bracketed line can be taken for INI; callers that
//! know better should pass the format explicitly.
use std::path::{Path, PathBuf};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::format::FormatTag;

static INI_SECTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\[[^\[\]\r\n]+\][ \t]*\r?$").unwrap()
});

// `key:` followed by whitespace or end of line, key not quoted
static YAML_KEY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:-[ \t]+)?[A-Za-z0-9_][A-Za-z0-9_.\-]*[ \t]*:(?:[ \t]|\r?$)").unwrap()
});

/// Extension lookup, then content sniffing when the extension is absent
/// or unknown. `None` means the caller must fail, not guess.
pub fn detect(extension: Option<&str>, bytes: &[u8]) -> Option<FormatTag> {
    if let Some(tag) = extension.and_then(FormatTag::from_extension) {
        tracing::debug!(%tag, "format from extension");
        return Some(tag);
    }
    let tag = detect_from_content(bytes);
    tracing::debug!(?tag, "format from content");
    tag
}

/// [`detect`] with the extension taken from `path`.
pub fn detect_path(path: &Path, bytes: &[u8]) -> Option<FormatTag> {
    detect(path.extension().and_then(|e| e.to_str()), bytes)
}

pub fn detect_from_content(bytes: &[u8]) -> Option<FormatTag> {
    let text = String::from_utf8_lossy(bytes);
    let content = text.trim();
    if content.is_empty() {
        return None;
    }
    if content.starts_with('{') || content.starts_with('[') {
        return Some(FormatTag::Json);
    }
    if INI_SECTION.is_match(content) {
        return Some(FormatTag::Ini);
    }
    if YAML_KEY.is_match(content) {
        return Some(FormatTag::Yaml);
    }
    None
}

/// One file proposed by a locator: the path plus its extension as the
/// locator saw it (with or without the dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub extension: String,
}

impl Candidate {
    pub fn new(path: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self { path: path.into(), extension: extension.into() }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, extension }
    }
}

/// Extension-based tags for a locator's candidates, order preserved.
pub fn classify<I>(candidates: I) -> Vec<(PathBuf, Option<FormatTag>)>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates
        .into_iter()
        .map(|c| {
            let tag = FormatTag::from_extension(&c.extension);
            (c.path, tag)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_wins_over_content() {
        assert_eq!(detect(Some(".yaml"), b"{\"a\": 1}"), Some(FormatTag::Yaml));
        assert_eq!(detect(Some("toml"), b""), Some(FormatTag::Toml));
    }

    #[test]
    fn unknown_extension_falls_back_to_content() {
        assert_eq!(detect(Some(".conf"), b"  {\"a\": 1}"), Some(FormatTag::Json));
        assert_eq!(detect(None, b"[1, 2]"), Some(FormatTag::Json));
    }

    #[test]
    fn content_heuristics_are_ordered() {
        assert_eq!(detect_from_content(b"; comment\n[server]\nport = 80\n"), Some(FormatTag::Ini));
        assert_eq!(detect_from_content(b"server:\n  port: 80\n"), Some(FormatTag::Yaml));
        assert_eq!(detect_from_content(b"- name: a\n- name: b\n"), Some(FormatTag::Yaml));
        // bracket token first wins for JSON even when it looks like a header
        assert_eq!(detect_from_content(b"[server]\nport = 80\n"), Some(FormatTag::Json));
    }

    #[test]
    fn quoted_keys_and_plain_text_do_not_match() {
        assert_eq!(detect_from_content(b"\"key\": value"), None);
        assert_eq!(detect_from_content(b"just some words"), None);
        assert_eq!(detect_from_content(b"http://example.com"), None);
        assert_eq!(detect_from_content(b"   \n\t"), None);
    }

    #[test]
    fn detect_path_reads_extension() {
        assert_eq!(detect_path(Path::new("conf/app.YML"), b""), Some(FormatTag::Yaml));
        assert_eq!(detect_path(Path::new("conf/app"), b"a: 1"), Some(FormatTag::Yaml));
        assert_eq!(detect_path(Path::new("conf/app"), b""), None);
    }

    #[test]
    fn classify_keeps_locator_order() {
        let out = classify([
            Candidate::new("b.ini", ".ini"),
            Candidate::new("a.txt", "txt"),
            Candidate::from_path("c.json"),
        ]);
        assert_eq!(out, vec![
            (PathBuf::from("b.ini"), Some(FormatTag::Ini)),
            (PathBuf::from("a.txt"), None),
            (PathBuf::from("c.json"), Some(FormatTag::Json)),
        ]);
    }
}
