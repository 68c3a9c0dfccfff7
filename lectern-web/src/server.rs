//! HTTP server for course pages and the JSON API

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get};
use lectern_core::config::LecternConfig;
use lectern_core::{CatalogStore, ContentRenderer};
use tower_http::cors::CorsLayer;

use crate::WebError;
use crate::handlers::{
    api_course, api_course_modules, api_courses, api_create_module, api_delete_module,
    api_module_contents, api_subjects, course_page,
};
use crate::templates::TemplateEngine;

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogStore>,
    pub renderer: Arc<dyn ContentRenderer>,
    pub templates: Arc<TemplateEngine>,
    pub config: Arc<LecternConfig>,
}

impl AppState {
    /// Builds state whose content renderer is the configured template engine.
    pub fn new(catalog: Arc<dyn CatalogStore>, config: LecternConfig) -> Self {
        let templates = Arc::new(TemplateEngine::from_config(&config.templates));
        Self {
            catalog,
            renderer: templates.clone(),
            templates,
            config: Arc::new(config),
        }
    }

    /// Replaces the content renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn ContentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/courses/{slug}", get(course_page))
        // JSON API
        .route("/api/subjects", get(api_subjects))
        .route("/api/courses", get(api_courses))
        .route("/api/courses/{slug}", get(api_course))
        .route(
            "/api/courses/{slug}/modules",
            get(api_course_modules).post(api_create_module),
        )
        .route("/api/modules/{id}", delete(api_delete_module))
        .route("/api/modules/{id}/contents", get(api_module_contents))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves the catalog on the configured address until the process stops.
///
/// # Errors
/// - `WebError::ServerStartFailed` - Address could not be bound or serving failed
pub async fn run_server(
    config: LecternConfig,
    catalog: Arc<dyn CatalogStore>,
) -> Result<(), WebError> {
    let address = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(catalog, config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| WebError::ServerStartFailed {
            address: address.clone(),
            reason: e.to_string(),
        })?;

    let local = listener
        .local_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| address.clone());
    tracing::info!(address = %local, "Lectern server listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| WebError::ServerStartFailed {
            address,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use lectern_core::MemoryCatalog;
    use lectern_core::catalog::{DEMO_COURSE_SLUG, DemoCatalog, seed_demo_catalog};
    use lectern_core::domain::ItemId;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn seeded() -> (Arc<MemoryCatalog>, DemoCatalog, Router) {
        let catalog = Arc::new(MemoryCatalog::new());
        let demo = seed_demo_catalog(catalog.as_ref(), "en").await.unwrap();
        let state = AppState::new(catalog.clone(), LecternConfig::for_testing());
        (catalog, demo, router(state))
    }

    async fn send(
        app: Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, String) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_list_courses_and_filter_by_subject() {
        let (_, _, app) = seeded().await;

        let (status, body) = send(app.clone(), Method::GET, "/api/courses", None).await;
        assert_eq!(status, StatusCode::OK);
        let courses: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(courses.as_array().unwrap().len(), 1);
        assert_eq!(courses[0]["slug"], DEMO_COURSE_SLUG);

        let (status, body) = send(
            app.clone(),
            Method::GET,
            "/api/courses?subject=programming",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let filtered: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(filtered.as_array().unwrap().len(), 1);

        let (status, _) = send(app, Method::GET, "/api/courses?subject=history", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_module_appends_after_last() {
        let (_, _, app) = seeded().await;
        let uri = format!("/api/courses/{DEMO_COURSE_SLUG}/modules");

        let (status, body) = send(
            app.clone(),
            Method::POST,
            &uri,
            Some(json!({"title": "Concurrency"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let module: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(module["order"], 3);

        let (status, body) = send(
            app.clone(),
            Method::POST,
            &uri,
            Some(json!({"title": "Appendix", "order": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["order"], 10);

        let (_, body) = send(app, Method::GET, &uri, None).await;
        let modules: Value = serde_json::from_str(&body).unwrap();
        let orders: Vec<u64> = modules
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["order"].as_u64().unwrap())
            .collect();
        assert_eq!(orders, vec![0, 1, 2, 3, 10]);
    }

    #[tokio::test]
    async fn test_invalid_module_title_is_unprocessable() {
        let (_, _, app) = seeded().await;

        let (status, body) = send(
            app,
            Method::POST,
            &format!("/api/courses/{DEMO_COURSE_SLUG}/modules"),
            Some(json!({"title": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(serde_json::from_str::<Value>(&body).unwrap()["error"].is_string());
    }

    #[tokio::test]
    async fn test_module_after_last_order_is_unprocessable() {
        let (_, _, app) = seeded().await;
        let uri = format!("/api/courses/{DEMO_COURSE_SLUG}/modules");

        let (status, _) = send(
            app.clone(),
            Method::POST,
            &uri,
            Some(json!({"title": "Final", "order": u32::MAX})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app.clone(),
            Method::POST,
            &uri,
            Some(json!({"title": "Beyond"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("No order left"));

        let (_, body) = send(app, Method::GET, &uri, None).await;
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap().as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_course_is_not_found() {
        let (_, _, app) = seeded().await;

        let (status, body) = send(app, Method::GET, "/api/courses/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let error: Value = serde_json::from_str(&body).unwrap();
        assert!(error["error"].as_str().unwrap().contains("not found"));
    }

    #[tokio::test]
    async fn test_module_contents_and_delete() {
        let (_, demo, app) = seeded().await;
        let module = demo.modules[1];

        let (status, body) = send(
            app.clone(),
            Method::GET,
            &format!("/api/modules/{module}/contents"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let entries: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(entries.as_array().unwrap().len(), 2);
        assert_eq!(entries[0]["item"]["payload"]["kind"], "image");
        assert_eq!(entries[1]["item"]["payload"]["kind"], "file");

        let (status, body) = send(
            app.clone(),
            Method::DELETE,
            &format!("/api/modules/{module}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_str::<Value>(&body).unwrap()["contents"], 2);

        let (status, _) = send(
            app,
            Method::GET,
            &format!("/api/modules/{module}/contents"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_course_page_renders_items_by_kind() {
        let (_, _, app) = seeded().await;

        let (status, html) = send(
            app,
            Method::GET,
            &format!("/courses/{DEMO_COURSE_SLUG}?lang=es"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Fundamentos de Rust"));
        assert!(html.contains("content-text"));
        assert!(html.contains("content-video"));
        assert!(html.contains("/media/images/ownership.png"));
        assert!(html.contains("/media/files/borrowing.pdf"));

        let getting_started = html.find("0. Getting Started").unwrap();
        let traits = html.find("2. Traits").unwrap();
        assert!(getting_started < traits);
    }

    #[tokio::test]
    async fn test_course_page_shows_placeholder_for_deleted_item() {
        let (catalog, demo, app) = seeded().await;
        let deleted: ItemId = demo.items[0];
        catalog.delete_item(deleted).await.unwrap();

        let (status, html) = send(
            app,
            Method::GET,
            &format!("/courses/{DEMO_COURSE_SLUG}"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("content-missing"));
        assert!(!html.contains("Welcome to the course!"));
    }
}
