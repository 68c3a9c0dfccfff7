//! Courses and their enrolled students.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{CourseId, SubjectId, UserId};
use crate::domain::localized::Localized;
use crate::domain::validation::{ValidationError, validate_slug};

/// Input for creating a course.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCourse {
    pub subject: SubjectId,
    pub owner: UserId,
    pub slug: String,
    pub title: Localized,
    pub overview: Localized,
}

/// A course owned by an instructor and filed under a subject.
///
/// Listed newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    id: CourseId,
    slug: String,
    title: Localized,
    overview: Localized,
    owner: UserId,
    subject: SubjectId,
    created: DateTime<Utc>,
    students: BTreeSet<UserId>,
}

impl Course {
    /// Creates a new course stamped with the current time.
    ///
    /// # Errors
    /// - `ValidationError` - Slug or any title translation breaks a field rule
    pub fn new(new: NewCourse) -> Result<Self, ValidationError> {
        validate_slug(&new.slug)?;
        new.title.validate_as_title()?;

        Ok(Self {
            id: CourseId::new(),
            slug: new.slug,
            title: new.title,
            overview: new.overview,
            owner: new.owner,
            subject: new.subject,
            created: Utc::now(),
            students: BTreeSet::new(),
        })
    }

    /// Enrolls a student. Returns false when already enrolled.
    pub fn enroll(&mut self, student: UserId) -> bool {
        self.students.insert(student)
    }

    /// Removes a student. Returns false when the student was not enrolled.
    pub fn unenroll(&mut self, student: UserId) -> bool {
        self.students.remove(&student)
    }

    pub fn is_enrolled(&self, student: UserId) -> bool {
        self.students.contains(&student)
    }

    // Getters
    pub fn id(&self) -> CourseId {
        self.id
    }
    pub fn slug(&self) -> &str {
        &self.slug
    }
    pub fn title(&self) -> &Localized {
        &self.title
    }
    pub fn overview(&self) -> &Localized {
        &self.overview
    }
    pub fn owner(&self) -> UserId {
        self.owner
    }
    pub fn subject(&self) -> SubjectId {
        self.subject
    }
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }
    pub fn students(&self) -> impl Iterator<Item = UserId> + '_ {
        self.students.iter().copied()
    }
    pub fn student_count(&self) -> usize {
        self.students.len()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
