//! Localized text values with default-language fallback.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{ValidationError, validate_title};

/// Text available in one or more languages.
///
/// Always holds a value for its default language; lookups for a language
/// without a translation fall back to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LocalizedFields")]
pub struct Localized {
    default_language: String,
    translations: BTreeMap<String, String>,
}

/// Wire shape of [`Localized`], checked before it becomes one.
#[derive(Deserialize)]
struct LocalizedFields {
    default_language: String,
    translations: BTreeMap<String, String>,
}

impl TryFrom<LocalizedFields> for Localized {
    type Error = ValidationError;

    fn try_from(fields: LocalizedFields) -> Result<Self, Self::Error> {
        Localized::from_translations(fields.default_language, fields.translations)
    }
}

impl Localized {
    /// Creates a value holding only the default-language text.
    pub fn new(default_language: impl Into<String>, text: impl Into<String>) -> Self {
        let default_language = default_language.into();
        let mut translations = BTreeMap::new();
        translations.insert(default_language.clone(), text.into());
        Self {
            default_language,
            translations,
        }
    }

    /// Builds a value from a full translation map.
    ///
    /// # Errors
    /// - `ValidationError::MissingTranslation` - No entry for the default language
    pub fn from_translations(
        default_language: impl Into<String>,
        translations: BTreeMap<String, String>,
    ) -> Result<Self, ValidationError> {
        let default_language = default_language.into();
        if !translations.contains_key(&default_language) {
            return Err(ValidationError::MissingTranslation {
                language: default_language,
            });
        }
        Ok(Self {
            default_language,
            translations,
        })
    }

    /// Adds or replaces a translation.
    pub fn with_translation(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.set(language, text);
        self
    }

    /// Adds or replaces a translation in place.
    pub fn set(&mut self, language: impl Into<String>, text: impl Into<String>) {
        self.translations.insert(language.into(), text.into());
    }

    /// Text for `language`, or the default-language text when untranslated.
    pub fn get(&self, language: &str) -> &str {
        self.translations
            .get(language)
            .or_else(|| self.translations.get(&self.default_language))
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Text in the default language.
    pub fn default_text(&self) -> &str {
        self.get(&self.default_language)
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Languages with a translation, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.keys().map(String::as_str)
    }

    /// Applies the title rules to every translation.
    pub(crate) fn validate_as_title(&self) -> Result<(), ValidationError> {
        self.translations
            .values()
            .try_for_each(|text| validate_title(text))
    }
}

impl fmt::Display for Localized {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_text())
    }
}
