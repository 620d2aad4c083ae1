//! URL slug derivation for wallpapers and categories.

/// Derive a URL-safe slug from a display title: lowercase ASCII
/// alphanumerics with single hyphens between words. Everything else
/// collapses into the separators.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
