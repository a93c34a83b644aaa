//! Slug normalization and uniqueness probing.

use std::collections::HashSet;

use formforge_core::slug::{allocate_slug, slugify};

#[test]
fn slugify_lowercases_and_hyphenates() {
    assert_eq!(slugify("Customer Feedback Survey"), "customer-feedback-survey");
}

#[test]
fn slugify_collapses_whitespace_runs() {
    assert_eq!(slugify("Event   \t Registration"), "event-registration");
}

#[test]
fn slugify_drops_url_unsafe_characters() {
    assert_eq!(slugify("Q3 Sign-up (2026)!"), "q3-sign-up-2026");
}

#[test]
fn slugify_truncates_to_fifty_characters() {
    let long = "a".repeat(80);
    assert_eq!(slugify(&long).len(), 50);
}

#[test]
fn slugify_falls_back_when_nothing_survives() {
    assert_eq!(slugify("!!! ???"), "form");
}

#[test]
fn base_slug_is_used_when_free() {
    let slug = allocate_slug("Contact Us", |_| false);
    assert_eq!(slug, "contact-us");
}

/// Allocating twice against the same growing existence set yields two
/// distinct slugs — the second appends `-1`.
#[test]
fn second_allocation_gets_a_numeric_suffix() {
    let mut taken: HashSet<String> = HashSet::new();

    let first = allocate_slug("Contact Us", |c| taken.contains(c));
    taken.insert(first.clone());
    let second = allocate_slug("Contact Us", |c| taken.contains(c));

    assert_eq!(first, "contact-us");
    assert_eq!(second, "contact-us-1");
}

#[test]
fn probing_skips_every_taken_suffix() {
    let taken: HashSet<String> = ["contact-us", "contact-us-1", "contact-us-2"]
        .into_iter()
        .map(String::from)
        .collect();

    let slug = allocate_slug("Contact Us", |c| taken.contains(c));
    assert_eq!(slug, "contact-us-3");
}
