//! Slug derivation for public form sharing.
//!
//! Pure string functions plus an allocation loop over an injected
//! existence predicate. The predicate is the only collaborator, so the
//! whole thing tests without a store; the persistence layer's uniqueness
//! constraint remains the authoritative guard against probe races.

const MAX_SLUG_LEN: usize = 50;

/// Derive the URL-safe base slug from a form name: lower-case, anything
/// outside `[a-z0-9]` becomes a separator, separator runs collapse to a
/// single hyphen, truncated to 50 characters. An empty result falls back
/// to `"form"`.
pub fn slugify(form_name: &str) -> String {
    let mut slug = String::with_capacity(form_name.len());
    let mut prev_hyphen = true; // suppress a leading hyphen

    for c in form_name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
        if slug.len() >= MAX_SLUG_LEN {
            break;
        }
    }

    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        "form".to_string()
    } else {
        slug.to_string()
    }
}

/// Allocate a unique slug for `form_name`, probing `exists` from the
/// normalized base and then `-1`, `-2`, … until an unused candidate is
/// found.
pub fn allocate_slug<F>(form_name: &str, mut exists: F) -> String
where
    F: FnMut(&str) -> bool,
{
    let base = slugify(form_name);

    if !exists(&base) {
        return base;
    }

    let mut counter = 1u32;
    loop {
        let candidate = format!("{base}-{counter}");
        if !exists(&candidate) {
            return candidate;
        }
        counter += 1;
    }
}
