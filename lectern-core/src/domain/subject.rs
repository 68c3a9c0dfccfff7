//! Subjects group courses by field of study.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ids::SubjectId;
use crate::domain::localized::Localized;
use crate::domain::validation::{ValidationError, validate_slug};

/// A field of study. Listed by slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    id: SubjectId,
    slug: String,
    title: Localized,
}

impl Subject {
    /// Creates a new subject.
    ///
    /// # Errors
    /// - `ValidationError` - Slug or any title translation breaks a field rule
    pub fn new(slug: impl Into<String>, title: Localized) -> Result<Self, ValidationError> {
        let slug = slug.into();
        validate_slug(&slug)?;
        title.validate_as_title()?;

        Ok(Self {
            id: SubjectId::new(),
            slug,
            title,
        })
    }

    pub fn id(&self) -> SubjectId {
        self.id
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn title(&self) -> &Localized {
        &self.title
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
