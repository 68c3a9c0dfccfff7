//! Catalog storage layer.
//!
//! Defines the storage interface for subjects, courses, modules, content
//! entries and items, with an in-memory implementation. Stores own
//! referential integrity, slug uniqueness, cascade deletion, listing order,
//! and order assignment for new modules and content entries.

pub mod demo;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

pub use demo::{DEMO_COURSE_SLUG, DemoCatalog, seed_demo_catalog};
pub use memory::MemoryCatalog;

use crate::domain::{
    Content, ContentId, Course, CourseId, Item, ItemId, ItemKind, ItemPayload, Module, ModuleId,
    NewContent, NewCourse, NewItem, NewModule, Subject, SubjectId, UserId, ValidationError,
};
use crate::ordering::{Order, OrderOverflow};

/// Kinds of stored entity, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Subject,
    Course,
    Module,
    Content,
    Item,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Subject => "subject",
            EntityKind::Course => "course",
            EntityKind::Module => "module",
            EntityKind::Content => "content",
            EntityKind::Item => "item",
        };
        f.write_str(name)
    }
}

/// Errors that occur during catalog operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of the missing entity
        entity: EntityKind,
        /// Identifier or slug that was looked up
        id: String,
    },

    /// Slug is already taken by another entity of the same kind
    #[error("{entity} slug '{slug}' already exists")]
    DuplicateSlug {
        /// Kind of entity whose slug collided
        entity: EntityKind,
        /// The colliding slug
        slug: String,
    },

    /// Item reference names a different kind than the stored item
    #[error("Item kind mismatch: reference says {expected}, stored item is {found}")]
    ItemKindMismatch {
        /// Kind named by the reference
        expected: ItemKind,
        /// Kind of the stored item
        found: ItemKind,
    },

    /// Content entry points at an item that no longer exists
    #[error("Content {content} references missing item {item}")]
    DanglingItem {
        /// The content entry
        content: ContentId,
        /// The missing item
        item: ItemId,
    },

    /// Input failed a field rule
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Automatic ordering ran past the last position of a scope
    #[error(transparent)]
    OrderOverflow(#[from] OrderOverflow),
}

impl CatalogError {
    pub(crate) fn not_found(entity: EntityKind, id: impl fmt::Display) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Changes applied by [`CatalogStore::update_item`].
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub payload: Option<ItemPayload>,
}

/// Number of rows removed by a cascading delete, the target included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub courses: usize,
    pub modules: usize,
    pub contents: usize,
}

/// A content entry with its resolved item (`None` when dangling).
#[derive(Debug, Clone, Serialize)]
pub struct ContentEntry {
    pub content: Content,
    pub item: Option<Item>,
}

/// A module with its ordered content.
#[derive(Debug, Clone, Serialize)]
pub struct ModuleOutline {
    pub module: Module,
    pub contents: Vec<ContentEntry>,
}

/// A course with its ordered modules and their content.
#[derive(Debug, Clone, Serialize)]
pub struct CourseOutline {
    pub course: Course,
    pub modules: Vec<ModuleOutline>,
}

/// Storage operations for the course catalog.
///
/// Listings come back in catalog order: subjects by slug, courses newest
/// first, modules and content by ascending order.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Stores a new subject.
    ///
    /// # Errors
    ///
    /// - `CatalogError::DuplicateSlug` - Slug already used by another subject
    async fn create_subject(&self, subject: Subject) -> Result<Subject, CatalogError>;

    /// Loads a subject.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No subject with this id
    async fn subject(&self, id: SubjectId) -> Result<Subject, CatalogError>;

    /// Loads a subject by slug.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No subject with this slug
    async fn subject_by_slug(&self, slug: &str) -> Result<Subject, CatalogError>;

    /// All subjects, by slug.
    async fn subjects(&self) -> Vec<Subject>;

    /// Deletes a subject together with its courses, their modules and content.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No subject with this id
    async fn delete_subject(&self, id: SubjectId) -> Result<CascadeSummary, CatalogError>;

    /// Creates a course under an existing subject.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - Subject does not exist
    /// - `CatalogError::DuplicateSlug` - Slug already used by another course
    /// - `CatalogError::Validation` - Slug or title breaks a field rule
    async fn create_course(&self, course: NewCourse) -> Result<Course, CatalogError>;

    /// Loads a course.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No course with this id
    async fn course(&self, id: CourseId) -> Result<Course, CatalogError>;

    /// Loads a course by slug.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No course with this slug
    async fn course_by_slug(&self, slug: &str) -> Result<Course, CatalogError>;

    /// All courses, newest first.
    async fn courses(&self) -> Vec<Course>;

    /// Courses filed under a subject, newest first.
    async fn courses_for_subject(&self, subject: SubjectId) -> Vec<Course>;

    /// Courses owned by a user, newest first.
    async fn courses_owned_by(&self, owner: UserId) -> Vec<Course>;

    /// Courses a user is enrolled in, newest first.
    async fn courses_joined_by(&self, student: UserId) -> Vec<Course>;

    /// Enrolls a student. Returns false when already enrolled.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No course with this id
    async fn enroll_student(&self, course: CourseId, student: UserId)
    -> Result<bool, CatalogError>;

    /// Removes a student. Returns false when the student was not enrolled.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No course with this id
    async fn unenroll_student(
        &self,
        course: CourseId,
        student: UserId,
    ) -> Result<bool, CatalogError>;

    /// Deletes a course together with its modules and their content.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No course with this id
    async fn delete_course(&self, id: CourseId) -> Result<CascadeSummary, CatalogError>;

    /// Creates a module, appending it to its course unless an order is given.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - Course does not exist
    /// - `CatalogError::Validation` - Title breaks a field rule
    /// - `CatalogError::OrderOverflow` - No automatic order left in the course
    async fn create_module(&self, module: NewModule) -> Result<Module, CatalogError>;

    /// Loads a module.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No module with this id
    async fn module(&self, id: ModuleId) -> Result<Module, CatalogError>;

    /// Modules of a course, by order.
    async fn modules_for_course(&self, course: CourseId) -> Vec<Module>;

    /// Sets a module's order explicitly without renumbering its siblings.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No module with this id
    async fn move_module(&self, id: ModuleId, order: Order) -> Result<Module, CatalogError>;

    /// Deletes a module together with its content. Items are kept.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No module with this id
    async fn delete_module(&self, id: ModuleId) -> Result<CascadeSummary, CatalogError>;

    /// Stores a new item.
    ///
    /// # Errors
    ///
    /// - `CatalogError::Validation` - Title or payload breaks a field rule
    async fn create_item(&self, item: NewItem) -> Result<Item, CatalogError>;

    /// Loads an item.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No item with this id
    async fn item(&self, id: ItemId) -> Result<Item, CatalogError>;

    /// Updates an item's title and/or payload, keeping its kind.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No item with this id
    /// - `CatalogError::Validation` - Change breaks a field rule or the item's kind
    async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<Item, CatalogError>;

    /// Deletes an item. Content entries referencing it are kept and dangle.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No item with this id
    async fn delete_item(&self, id: ItemId) -> Result<(), CatalogError>;

    /// Attaches an item to a module, appending it unless an order is given.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - Module or item does not exist
    /// - `CatalogError::ItemKindMismatch` - Reference kind differs from the stored item
    async fn create_content(&self, content: NewContent) -> Result<Content, CatalogError>;

    /// Loads a content entry.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No content entry with this id
    async fn content(&self, id: ContentId) -> Result<Content, CatalogError>;

    /// Content entries of a module, by order.
    async fn contents_for_module(&self, module: ModuleId) -> Vec<Content>;

    /// Sets a content entry's order explicitly without renumbering its siblings.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No content entry with this id
    async fn move_content(&self, id: ContentId, order: Order) -> Result<Content, CatalogError>;

    /// Detaches a content entry from its module. The item is kept.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No content entry with this id
    async fn delete_content(&self, id: ContentId) -> Result<(), CatalogError>;

    /// Loads the item behind a content entry.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No content entry with this id
    /// - `CatalogError::DanglingItem` - The referenced item was deleted
    async fn resolve_item(&self, content: ContentId) -> Result<Item, CatalogError>;

    /// A course with its modules and content, items resolved.
    ///
    /// # Errors
    ///
    /// - `CatalogError::NotFound` - No course with this id
    async fn outline(&self, course: CourseId) -> Result<CourseOutline, CatalogError>;
}
