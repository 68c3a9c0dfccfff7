//! Lectern Web - course pages and JSON API server
//!
//! Serves the catalog over HTTP: JSON endpoints under `/api` for subjects,
//! courses, modules and their content, plus server-rendered course pages
//! whose content items are rendered through the kind-selected templates.

#![warn(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]

pub mod handlers;
pub mod server;
pub mod templates;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lectern_core::{CatalogError, RenderError};
use serde_json::json;

// Re-export main types
pub use server::{AppState, router, run_server};
pub use templates::TemplateEngine;

/// Web layer errors.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Template rendering error: {reason}")]
    TemplateError { reason: String },

    #[error("Failed to start web server on {address}: {reason}")]
    ServerStartFailed { address: String, reason: String },
}

impl WebError {
    /// HTTP status the error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
            WebError::Catalog(
                CatalogError::DuplicateSlug { .. }
                | CatalogError::ItemKindMismatch { .. }
                | CatalogError::Validation(_)
                | CatalogError::OrderOverflow(_),
            ) => StatusCode::UNPROCESSABLE_ENTITY,
            WebError::Catalog(CatalogError::DanglingItem { .. })
            | WebError::Render(_)
            | WebError::TemplateError { .. }
            | WebError::ServerStartFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use lectern_core::ValidationError;
    use lectern_core::catalog::EntityKind;

    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let error = WebError::from(CatalogError::NotFound {
            entity: EntityKind::Course,
            id: "missing".to_string(),
        });
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_rule_violations_map_to_422() {
        let duplicate = WebError::from(CatalogError::DuplicateSlug {
            entity: EntityKind::Subject,
            slug: "math".to_string(),
        });
        let invalid = WebError::from(CatalogError::Validation(ValidationError::EmptyTitle));

        assert_eq!(duplicate.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_template_error_maps_to_500() {
        let error = WebError::TemplateError {
            reason: "Missing template".to_string(),
        };

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.to_string().contains("Template rendering error"));
    }
}
