//! Field rules shared by catalog entities.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::item::ItemKind;

/// Maximum length of titles and slugs, in characters.
pub const MAX_FIELD_LEN: usize = 200;

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is a valid regex")
});

/// Errors for catalog data that breaks a field rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title cannot be empty")]
    EmptyTitle,

    #[error("Title is too long: {length} characters (maximum {max})")]
    TitleTooLong { length: usize, max: usize },

    #[error("Slug cannot be empty")]
    EmptySlug,

    #[error("Slug is too long: {length} characters (maximum {max})")]
    SlugTooLong { length: usize, max: usize },

    #[error("Invalid slug '{slug}': only letters, digits, '-' and '_' are allowed")]
    InvalidSlug { slug: String },

    #[error("Missing translation for default language '{language}'")]
    MissingTranslation { language: String },

    #[error("Invalid video URL '{url}': must be an absolute http(s) URL")]
    InvalidVideoUrl { url: String },

    #[error("Invalid upload path '{path}': expected it under '{expected_prefix}/'")]
    InvalidUploadPath {
        path: String,
        expected_prefix: String,
    },

    #[error("File '{path}' is not an image (detected {mime})")]
    NotAnImage { path: String, mime: String },

    #[error("Cannot change a {from} item into a {to} item")]
    KindChanged { from: ItemKind, to: ItemKind },
}

/// Checks a title against the non-blank and length rules.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }

    let length = title.chars().count();
    if length > MAX_FIELD_LEN {
        return Err(ValidationError::TitleTooLong {
            length,
            max: MAX_FIELD_LEN,
        });
    }

    Ok(())
}

/// Checks a slug against the length and character rules.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::EmptySlug);
    }

    let length = slug.chars().count();
    if length > MAX_FIELD_LEN {
        return Err(ValidationError::SlugTooLong {
            length,
            max: MAX_FIELD_LEN,
        });
    }

    if !SLUG_PATTERN.is_match(slug) {
        return Err(ValidationError::InvalidSlug {
            slug: slug.to_string(),
        });
    }

    Ok(())
}
