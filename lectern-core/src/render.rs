//! Rendering contract for content items.
//!
//! Turning an item into HTML is delegated to a collaborator that picks a
//! template by the item's kind (see [`crate::domain::ItemKind::template_name`])
//! and renders it with the item as context.

use crate::domain::Item;

/// Renders content items into HTML fragments.
pub trait ContentRenderer: Send + Sync {
    /// Renders `item` with the template selected by its kind.
    ///
    /// # Errors
    /// - `RenderError::TemplateNotFound` - No template registered for the item's kind
    /// - `RenderError::Context` - The item could not be turned into template context
    fn render(&self, item: &Item) -> Result<String, RenderError>;
}

/// Errors raised while rendering content items.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Template '{name}' not found")]
    TemplateNotFound { name: String },

    #[error("Failed to build template context: {reason}")]
    Context { reason: String },
}

impl From<serde_json::Error> for RenderError {
    fn from(error: serde_json::Error) -> Self {
        RenderError::Context {
            reason: error.to_string(),
        }
    }
}
