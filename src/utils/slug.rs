//! URL slugification helpers.
//!
//! Entry roots and part slugs must be lowercase, word-separator-normalized
//! identifiers. Custom slugs supplied by the author are validated against
//! the canonical form rather than silently rewritten.

/// Convert text to a URL-safe slug (lowercase, hyphen-separated).
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}

/// Check whether `text` is already in canonical slug form.
///
/// A canonical slug survives re-slugification unchanged.
pub fn is_canonical(text: &str) -> bool {
    text == slug::slugify(text)
}
