//! Canonical text normalization shared by the store adapter and the diff
//! engine.

/// Tokens that upstream tooling writes in place of a missing value.
const PLACEHOLDERS: [&str; 3] = ["nan", "none", "null"];

/// Trims `raw` and maps placeholder tokens to the empty string.
///
/// Placeholder matching is case-insensitive, so `"NaN"`, `"None"`, and
/// `"NULL"` all collapse to `""`.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    let trimmed = raw.trim();
    if PLACEHOLDERS
        .iter()
        .any(|placeholder| trimmed.eq_ignore_ascii_case(placeholder))
    {
        return String::new();
    }
    trimmed.to_owned()
}

/// Normalizes optional persisted text, treating `NULL` as empty.
pub(crate) fn normalize_optional(raw: Option<&str>) -> String {
    raw.map(normalize_text).unwrap_or_default()
}
