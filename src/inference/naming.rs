//! Identifier casing for inferred structs and fields.

/// Fallback when a key has no alphanumeric characters at all.
pub const FALLBACK_FIELD: &str = "Field";

/// Split on non-alphanumerics; each word gets an upper-case first letter
/// and a lower-case rest. `max_retry-count` → `MaxRetryCount`.
pub fn pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    if out.is_empty() {
        out.push_str(FALLBACK_FIELD);
    }
    out
}

/// `MaxRetryCount` → `max_retry_count`. Input is expected to be
/// [`pascal_case`] output.
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Cheap English singular for collection keys: `items` → `item`,
/// `entries` → `entry`. `None` when the key does not look plural.
pub fn singular(key: &str) -> Option<String> {
    let lower = key.to_ascii_lowercase();
    if lower.len() > 3 && lower.ends_with("ies") {
        return Some(format!("{}y", &key[..key.len() - 3]));
    }
    if lower.len() > 1
        && lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
    {
        return Some(key[..key.len() - 1].to_string());
    }
    None
}
