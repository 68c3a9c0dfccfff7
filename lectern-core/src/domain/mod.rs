//! Core domain models of the course catalog.
//!
//! Contains the entities and value objects of the catalog: subjects,
//! courses, their ordered modules, and the content items attached to them.

pub mod content;
pub mod course;
pub mod ids;
pub mod item;
pub mod localized;
pub mod module;
pub mod subject;
pub mod validation;

// Re-export core domain types
pub use content::{Content, NewContent};
pub use course::{Course, NewCourse};
pub use ids::{ContentId, CourseId, ItemId, ModuleId, SubjectId, UserId};
pub use item::{BlobRef, Item, ItemBase, ItemKind, ItemPayload, ItemRef, NewItem};
pub use localized::Localized;
pub use module::{Module, NewModule};
pub use subject::Subject;
pub use validation::ValidationError;
