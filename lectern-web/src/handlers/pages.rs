//! Server-rendered course pages

use axum::extract::{Path, Query, State};
use axum::response::Html;
use lectern_core::ContentRenderer;
use lectern_core::catalog::{CourseOutline, ModuleOutline};
use lectern_core::ordering::Ordered;
use serde::Deserialize;

use crate::WebError;
use crate::server::AppState;
use crate::templates::escape_html;

const MISSING_ITEM_HTML: &str = r#"<article class="content content-missing">
  <p>This content is no longer available.</p>
</article>"#;

/// Query parameters of page requests.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Language of localized titles, defaults to the catalog language
    pub lang: Option<String>,
}

/// Renders a course outline with every content item in module order.
///
/// # Errors
/// - `WebError::Catalog` - No course with this slug
/// - `WebError::Render` - An item's template is missing
pub async fn course_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, WebError> {
    let course = state.catalog.course_by_slug(&slug).await?;
    let outline = state.catalog.outline(course.id()).await?;

    let lang = query
        .lang
        .unwrap_or_else(|| state.config.catalog.default_language.clone());

    let content = course_content(&outline, &lang, state.renderer.as_ref())?;
    let page = state
        .templates
        .render_page(outline.course.title().get(&lang), &lang, &content)?;

    Ok(Html(page))
}

fn course_content(
    outline: &CourseOutline,
    lang: &str,
    renderer: &dyn ContentRenderer,
) -> Result<String, WebError> {
    let modules = outline
        .modules
        .iter()
        .map(|module| module_section(module, renderer))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(format!(
        r#"<header class="course-header">
  <h1>{title}</h1>
  <p class="overview">{overview}</p>
</header>
{modules}"#,
        title = escape_html(outline.course.title().get(lang)),
        overview = escape_html(outline.course.overview().get(lang)),
        modules = modules.join("\n"),
    ))
}

fn module_section(
    outline: &ModuleOutline,
    renderer: &dyn ContentRenderer,
) -> Result<String, WebError> {
    let module = &outline.module;

    let mut items = Vec::with_capacity(outline.contents.len());
    for entry in &outline.contents {
        match &entry.item {
            Some(item) => items.push(renderer.render(item)?),
            None => {
                tracing::warn!(
                    content = %entry.content.id(),
                    "Rendering placeholder for missing item"
                );
                items.push(MISSING_ITEM_HTML.to_string());
            }
        }
    }

    Ok(format!(
        r#"<section class="module" id="module-{order}">
  <h2>{order}. {title}</h2>
  <p class="description">{description}</p>
{items}
</section>"#,
        order = module.order(),
        title = escape_html(module.title()),
        description = escape_html(module.description()),
        items = items.join("\n"),
    ))
}
