//! Storage-key sanitization.
//!
//! Raw names arrive from multipart filenames and user-typed fields and may
//! contain Windows separators, whitespace, and traversal segments. Every
//! key handed to the storage layer goes through [`sanitize_key`] first.

/// Normalize a raw name or path into a safe storage key.
///
/// Steps, in order: trim surrounding whitespace, normalize `\` to `/`,
/// collapse each whitespace run to a single `_`, delete every `../`
/// occurrence until none remain (a single pass can uncover new ones, e.g.
/// `....//`), strip leading `/` characters.
///
/// Total and pure: any input maps to some key, possibly the empty string.
/// Callers must treat an empty result as invalid input before attempting
/// an upload.
pub fn sanitize_key(raw: &str) -> String {
    let mut key = collapse_whitespace(&raw.trim().replace('\\', "/"));
    while key.contains("../") {
        key = key.replace("../", "");
    }
    key.trim_start_matches('/').to_string()
}

/// Replace each run of whitespace with a single underscore.
fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
