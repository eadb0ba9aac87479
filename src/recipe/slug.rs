//! Slug derivation
//!
//! Turns a recipe name into a URL-safe identifier: lower-case ASCII
//! alphanumerics joined by single hyphens.

use deunicode::deunicode;

/// Derive the store identifier for a recipe name.
///
/// Non-ASCII text is transliterated first, so accented and non-Latin names
/// still produce a usable id. Returns an empty string when nothing
/// alphanumeric is left.
pub fn slugify(name: &str) -> String {
    let ascii = deunicode(name);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for ch in ascii.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}
