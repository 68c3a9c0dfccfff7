//! Course pages rendered through the router with configured templates

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use lectern_core::catalog::{DEMO_COURSE_SLUG, MemoryCatalog, seed_demo_catalog};
use lectern_core::config::LecternConfig;
use lectern_core::domain::Item;
use lectern_core::{ContentRenderer, RenderError};
use lectern_web::{AppState, router};
use tower::ServiceExt;

struct BrokenRenderer;

impl ContentRenderer for BrokenRenderer {
    fn render(&self, item: &Item) -> Result<String, RenderError> {
        Err(RenderError::TemplateNotFound {
            name: format!("broken/{}.html", item.kind()),
        })
    }
}

async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn seeded_catalog() -> Arc<MemoryCatalog> {
    let catalog = Arc::new(MemoryCatalog::new());
    seed_demo_catalog(catalog.as_ref(), "en").await.unwrap();
    catalog
}

#[tokio::test]
async fn test_template_directory_overrides_item_markup() {
    let dir = tempfile::tempdir().unwrap();
    let video_dir = dir.path().join("courses/content");
    std::fs::create_dir_all(&video_dir).unwrap();
    std::fs::write(
        video_dir.join("video.html"),
        r#"<iframe class="player" src="{{item.payload.url}}" title="{{item.title}}"></iframe>"#,
    )
    .unwrap();

    let mut config = LecternConfig::for_testing();
    config.templates.template_dir = Some(dir.path().to_path_buf());
    config.templates.media_url = "https://cdn.example.com/".to_string();
    let state = AppState::new(seeded_catalog().await, config);

    let (status, html) = get(state, &format!("/courses/{DEMO_COURSE_SLUG}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(
        r#"<iframe class="player" src="https://videos.example.com/install-rust" title="Installing Rust"></iframe>"#
    ));
    assert!(html.contains("https://cdn.example.com/images/ownership.png"));
    assert!(html.contains("<title>Rust Fundamentals | Lectern</title>"));
}

#[tokio::test]
async fn test_renderer_failure_is_a_server_error() {
    let state = AppState::new(seeded_catalog().await, LecternConfig::for_testing())
        .with_renderer(Arc::new(BrokenRenderer));

    let (status, body) = get(state, &format!("/courses/{DEMO_COURSE_SLUG}")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("broken/text.html"));
}

#[tokio::test]
async fn test_api_outline_matches_page_order() {
    let state = AppState::new(seeded_catalog().await, LecternConfig::for_testing());

    let (status, body) = get(state, &format!("/api/courses/{DEMO_COURSE_SLUG}")).await;
    assert_eq!(status, StatusCode::OK);

    let outline: serde_json::Value = serde_json::from_str(&body).unwrap();
    let titles: Vec<&str> = outline["modules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["module"]["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Getting Started", "Ownership", "Traits"]);
    assert_eq!(outline["course"]["title"]["translations"]["es"], "Fundamentos de Rust");
}
