//! JSON API handlers for the course catalog

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use lectern_core::catalog::{CascadeSummary, ContentEntry, CourseOutline};
use lectern_core::domain::{Course, Module, ModuleId, NewModule, Subject};
use lectern_core::{CatalogError, Order};
use serde::Deserialize;

use crate::WebError;
use crate::server::AppState;

/// Filters for the course listing.
#[derive(Debug, Default, Deserialize)]
pub struct CoursesQuery {
    /// Only courses filed under the subject with this slug
    pub subject: Option<String>,
}

/// Body of a module creation request.
///
/// Leave `order` out to append the module after the course's last one.
#[derive(Debug, Deserialize)]
pub struct CreateModuleRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: Option<Order>,
}

pub async fn api_subjects(State(state): State<AppState>) -> Json<Vec<Subject>> {
    Json(state.catalog.subjects().await)
}

/// # Errors
/// - `WebError::Catalog` - Subject filter names an unknown subject
pub async fn api_courses(
    State(state): State<AppState>,
    Query(query): Query<CoursesQuery>,
) -> Result<Json<Vec<Course>>, WebError> {
    let courses = match query.subject {
        Some(slug) => {
            let subject = state.catalog.subject_by_slug(&slug).await?;
            state.catalog.courses_for_subject(subject.id()).await
        }
        None => state.catalog.courses().await,
    };

    Ok(Json(courses))
}

/// Course with its ordered modules and resolved content.
///
/// # Errors
/// - `WebError::Catalog` - No course with this slug
pub async fn api_course(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CourseOutline>, WebError> {
    let course = state.catalog.course_by_slug(&slug).await?;
    let outline = state.catalog.outline(course.id()).await?;
    Ok(Json(outline))
}

/// # Errors
/// - `WebError::Catalog` - No course with this slug
pub async fn api_course_modules(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<Module>>, WebError> {
    let course = state.catalog.course_by_slug(&slug).await?;
    Ok(Json(state.catalog.modules_for_course(course.id()).await))
}

/// Creates a module and returns it with its assigned order.
///
/// # Errors
/// - `WebError::Catalog` - No course with this slug, or the title breaks a field rule
pub async fn api_create_module(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(request): Json<CreateModuleRequest>,
) -> Result<(StatusCode, Json<Module>), WebError> {
    let course = state.catalog.course_by_slug(&slug).await?;

    let mut new_module =
        NewModule::new(course.id(), request.title).with_description(request.description);
    new_module.order = request.order;

    let module = state.catalog.create_module(new_module).await?;
    Ok((StatusCode::CREATED, Json(module)))
}

/// Content entries of a module with their items. Dangling entries carry `"item": null`.
///
/// # Errors
/// - `WebError::Catalog` - No module with this id
pub async fn api_module_contents(
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> Result<Json<Vec<ContentEntry>>, WebError> {
    state.catalog.module(id).await?;

    let mut entries = Vec::new();
    for content in state.catalog.contents_for_module(id).await {
        let item = match state.catalog.resolve_item(content.id()).await {
            Ok(item) => Some(item),
            Err(CatalogError::DanglingItem { .. }) => None,
            Err(e) => return Err(e.into()),
        };
        entries.push(ContentEntry { content, item });
    }

    Ok(Json(entries))
}

/// # Errors
/// - `WebError::Catalog` - No module with this id
pub async fn api_delete_module(
    State(state): State<AppState>,
    Path(id): Path<ModuleId>,
) -> Result<Json<CascadeSummary>, WebError> {
    let summary = state.catalog.delete_module(id).await?;
    Ok(Json(summary))
}
