//! Lectern Core - Course catalog domain and ordering
//!
//! This crate provides the building blocks of the Lectern course catalog:
//! subjects, courses, ordered modules and polymorphic content items, the
//! scoped ordering assigner, the catalog storage contract with an in-memory
//! implementation, the content rendering contract, and configuration.

pub mod catalog;
pub mod config;
pub mod domain;
pub mod ordering;
pub mod render;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use catalog::{CatalogError, CatalogStore, MemoryCatalog};
pub use config::LecternConfig;
pub use domain::ValidationError;
pub use ordering::{Order, OrderScope};
pub use render::{ContentRenderer, RenderError};

/// Core errors that can bubble up from any Lectern subsystem.
///
/// High-level error types representing failures in core functionality.
#[derive(Debug, thiserror::Error)]
pub enum LecternError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LecternError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            LecternError::Catalog(e) => match e {
                CatalogError::NotFound { entity, .. } => format!("{entity} not found"),
                CatalogError::DuplicateSlug { entity, slug } => {
                    format!("A {entity} with slug '{slug}' already exists")
                }
                CatalogError::ItemKindMismatch { expected, found } => {
                    format!("Expected a {expected} item but found a {found} item")
                }
                CatalogError::DanglingItem { .. } => {
                    "The item behind this content no longer exists".to_string()
                }
                CatalogError::Validation(e) => e.to_string(),
                CatalogError::OrderOverflow(_) => {
                    "No position is left at the end of this list, pass an explicit order"
                        .to_string()
                }
            },
            LecternError::Validation(e) => e.to_string(),
            LecternError::Render(_) => "Content could not be displayed".to_string(),
            LecternError::Configuration { .. } => "Configuration error occurred".to_string(),
            LecternError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LecternError::Validation(_)
                | LecternError::Configuration { .. }
                | LecternError::Catalog(
                    CatalogError::Validation(_)
                        | CatalogError::DuplicateSlug { .. }
                        | CatalogError::ItemKindMismatch { .. }
                        | CatalogError::OrderOverflow(_)
                )
        )
    }
}

pub type Result<T> = std::result::Result<T, LecternError>;
