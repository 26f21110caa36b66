//! Field Validators
//!
//! Pure predicates over scalar values scraped from the upstream source.
//! They never fail loudly: a rejected value is logged at debug level and
//! reported as `false`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Placeholder values the upstream (and our own normalization) uses for "unknown"
pub const SENTINELS: &[&str] = &["N/A", "-"];

/// Only the secure scheme is accepted
const SECURE_SCHEME: &str = "https://";

/// Allowed image suffixes (compared lowercase)
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".webp"];

const MIN_TITLE_CHARS: usize = 2;
const MAX_TITLE_CHARS: usize = 200;

static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^https://",
        r"([a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+",
        r"[a-zA-Z0-9]([a-zA-Z0-9-]*[a-zA-Z0-9])?",
        r"(/[a-zA-Z0-9_\-.~%/]+)*/?$",
    ))
    .expect("URL pattern is valid")
});

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("slug pattern is valid"));

static CAPITALIZED_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[A-Z][a-zA-Z]*\b").expect("capitalized word pattern is valid"));

static PUNCTUATION_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[.,;:!?\-_()\[\]{}<>"'`~@#$%^&*+=/\\|]{4,}"#)
        .expect("punctuation run pattern is valid")
});

static MARKUP_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("markup tag pattern is valid"));

/// True for empty strings and the "unknown" sentinels
pub fn is_sentinel(value: &str) -> bool {
    value.is_empty() || SENTINELS.contains(&value)
}

/// Validate an absolute `https://` URL with a dotted host and a restricted path alphabet
pub fn validate_url(url: &str) -> bool {
    if is_sentinel(url) {
        return false;
    }

    if !url.starts_with(SECURE_SCHEME) {
        debug!(url = %url, "URL rejected: scheme must be https");
        return false;
    }

    let valid = URL_PATTERN.is_match(url);
    if !valid {
        debug!(url = %url, "URL rejected: malformed host or path");
    }
    valid
}

/// Validate an image URL: a valid URL ending in a known image extension
pub fn validate_image_url(url: &str) -> bool {
    if !validate_url(url) {
        return false;
    }

    let lower = url.to_lowercase();
    let valid = IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));
    if !valid {
        debug!(url = %url, "Image URL rejected: unsupported extension");
    }
    valid
}

/// Validate a lowercase, hyphen-separated slug
pub fn validate_slug(slug: &str) -> bool {
    if is_sentinel(slug) {
        return false;
    }

    let valid = SLUG_PATTERN.is_match(slug);
    if !valid {
        debug!(slug = %slug, "Slug rejected");
    }
    valid
}

/// Validate a human-readable title
///
/// 2..=200 characters after trimming, at least one capitalized word,
/// no run of four or more punctuation characters, no markup tags.
pub fn validate_title(title: &str) -> bool {
    if is_sentinel(title) {
        return false;
    }

    let length = title.trim().chars().count();
    if !(MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&length) {
        debug!(title = %title, length, "Title rejected: length out of range");
        return false;
    }

    if !CAPITALIZED_WORD.is_match(title) {
        debug!(title = %title, "Title rejected: no capitalized word");
        return false;
    }

    if PUNCTUATION_RUN.is_match(title) {
        debug!(title = %title, "Title rejected: excessive punctuation");
        return false;
    }

    if MARKUP_TAG.is_match(title) {
        debug!(title = %title, "Title rejected: contains markup");
        return false;
    }

    true
}
