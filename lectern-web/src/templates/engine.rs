//! Template engine backing content item rendering

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use lectern_core::ContentRenderer;
use lectern_core::RenderError;
use lectern_core::config::TemplateConfig;
use lectern_core::domain::{Item, ItemKind};
use serde_json::{Value, json};

use super::rendering::{interpolate_template, wrap_in_base};

/// Name of the page layout template.
pub const BASE_TEMPLATE_NAME: &str = "base.html";

const BASE_TEMPLATE: &str = include_str!("../../templates/base.html");
const TEXT_TEMPLATE: &str = include_str!("../../templates/courses/content/text.html");
const FILE_TEMPLATE: &str = include_str!("../../templates/courses/content/file.html");
const IMAGE_TEMPLATE: &str = include_str!("../../templates/courses/content/image.html");
const VIDEO_TEMPLATE: &str = include_str!("../../templates/courses/content/video.html");

/// Template store with embedded defaults and optional on-disk overrides.
///
/// Content templates are registered under the name each item kind selects,
/// `{content_prefix}/{kind}.html`.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    templates: HashMap<String, String>,
    content_prefix: String,
    media_url: String,
    template_dir: Option<PathBuf>,
}

impl TemplateEngine {
    /// Creates an engine holding only the embedded templates.
    pub fn embedded(content_prefix: &str, media_url: &str) -> Self {
        let mut templates = HashMap::new();
        templates.insert(BASE_TEMPLATE_NAME.to_string(), BASE_TEMPLATE.to_string());
        for kind in ItemKind::ALL {
            templates.insert(
                kind.template_name(content_prefix),
                Self::embedded_content_template(kind).to_string(),
            );
        }

        Self {
            templates,
            content_prefix: content_prefix.to_string(),
            media_url: media_url.to_string(),
            template_dir: None,
        }
    }

    /// Creates an engine from configuration, preferring templates found in
    /// the configured directory over the embedded ones.
    pub fn from_config(config: &TemplateConfig) -> Self {
        let engine = Self::embedded(&config.content_prefix, &config.media_url);
        match &config.template_dir {
            Some(dir) => engine.load_directory(dir),
            None => engine,
        }
    }

    /// Replaces registered templates with files of the same name under `dir`.
    ///
    /// Templates without a file keep their current body.
    pub fn load_directory<P: AsRef<Path>>(mut self, dir: P) -> Self {
        let dir = dir.as_ref();
        let names: Vec<String> = self.templates.keys().cloned().collect();

        for name in names {
            let path = dir.join(&name);
            match fs::read_to_string(&path) {
                Ok(content) => {
                    tracing::debug!(
                        template = %name,
                        path = %path.display(),
                        "Loaded template override"
                    );
                    self.templates.insert(name, content);
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        template = %name,
                        path = %path.display(),
                        error = %e,
                        "Failed to read template, using embedded default"
                    );
                }
            }
        }

        self.template_dir = Some(dir.to_path_buf());
        self
    }

    /// Registers or replaces a template.
    pub fn with_template(mut self, name: impl Into<String>, body: impl Into<String>) -> Self {
        self.templates.insert(name.into(), body.into());
        self
    }

    /// Removes a template, returning whether it was registered.
    pub fn remove_template(&mut self, name: &str) -> bool {
        self.templates.remove(name).is_some()
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn content_prefix(&self) -> &str {
        &self.content_prefix
    }

    pub fn template_dir(&self) -> Option<&Path> {
        self.template_dir.as_deref()
    }

    /// Renders a registered template with `context`.
    ///
    /// # Errors
    /// - `RenderError::TemplateNotFound` - No template registered under `name`
    pub fn render_template(&self, name: &str, context: &Value) -> Result<String, RenderError> {
        let template = self
            .templates
            .get(name)
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: name.to_string(),
            })?;

        Ok(interpolate_template(template, context))
    }

    /// Wraps rendered page content in the base layout.
    ///
    /// # Errors
    /// - `RenderError::TemplateNotFound` - Base layout was removed
    pub fn render_page(
        &self,
        title: &str,
        lang: &str,
        content: &str,
    ) -> Result<String, RenderError> {
        let base = self
            .templates
            .get(BASE_TEMPLATE_NAME)
            .ok_or_else(|| RenderError::TemplateNotFound {
                name: BASE_TEMPLATE_NAME.to_string(),
            })?;

        Ok(wrap_in_base(base, content, &json!({ "title": title, "lang": lang })))
    }

    fn embedded_content_template(kind: ItemKind) -> &'static str {
        match kind {
            ItemKind::Text => TEXT_TEMPLATE,
            ItemKind::File => FILE_TEMPLATE,
            ItemKind::Image => IMAGE_TEMPLATE,
            ItemKind::Video => VIDEO_TEMPLATE,
        }
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::from_config(&TemplateConfig::default())
    }
}

impl ContentRenderer for TemplateEngine {
    fn render(&self, item: &Item) -> Result<String, RenderError> {
        let name = item.template_name(&self.content_prefix);
        let context = json!({
            "item": serde_json::to_value(item)?,
            "media_url": self.media_url,
        });

        self.render_template(&name, &context)
    }
}

#[cfg(test)]
mod tests {
    use lectern_core::domain::{ItemPayload, NewItem, UserId};

    use super::*;

    fn engine() -> TemplateEngine {
        TemplateEngine::embedded("courses/content", "/media/")
    }

    fn item(title: &str, payload: ItemPayload) -> Item {
        Item::new(NewItem::new(UserId::new(), title, payload)).unwrap()
    }

    #[test]
    fn test_embedded_templates_cover_every_kind() {
        let engine = engine();

        assert!(engine.has_template(BASE_TEMPLATE_NAME));
        for kind in ItemKind::ALL {
            assert!(engine.has_template(&format!("courses/content/{kind}.html")));
        }
    }

    #[test]
    fn test_template_selected_by_kind() {
        let engine = engine();

        let text = engine
            .render(&item("Welcome", ItemPayload::text("Hello <world>")))
            .unwrap();
        assert!(text.contains("content-text"));
        assert!(text.contains("Hello &lt;world&gt;"));

        let image = engine
            .render(&item("Diagram", ItemPayload::image("diagram.png")))
            .unwrap();
        assert!(image.contains("content-image"));
        assert!(image.contains("src=\"/media/images/diagram.png\""));

        let file = engine
            .render(&item("Slides", ItemPayload::file("slides.pdf")))
            .unwrap();
        assert!(file.contains("href=\"/media/files/slides.pdf\""));

        let video = engine
            .render(&item(
                "Lecture",
                ItemPayload::video("https://videos.example.com/lecture").unwrap(),
            ))
            .unwrap();
        assert!(video.contains("href=\"https://videos.example.com/lecture\""));
    }

    #[test]
    fn test_missing_template_is_reported() {
        let mut engine = engine();
        assert!(engine.remove_template("courses/content/video.html"));

        let result = engine.render(&item(
            "Lecture",
            ItemPayload::video("https://videos.example.com/lecture").unwrap(),
        ));
        assert!(matches!(
            result,
            Err(RenderError::TemplateNotFound { name }) if name == "courses/content/video.html"
        ));
    }

    #[test]
    fn test_custom_prefix_changes_template_names() {
        let engine = TemplateEngine::embedded("lessons", "/media/");

        assert!(engine.has_template("lessons/text.html"));
        assert!(!engine.has_template("courses/content/text.html"));
        assert!(engine.render(&item("Notes", ItemPayload::text("n"))).is_ok());
    }

    #[test]
    fn test_directory_overrides_embedded_template() {
        let dir = tempfile::tempdir().unwrap();
        let content_dir = dir.path().join("courses/content");
        std::fs::create_dir_all(&content_dir).unwrap();
        std::fs::write(
            content_dir.join("text.html"),
            "<section>{{item.title}}: {{item.payload.content}}</section>",
        )
        .unwrap();

        let engine = engine().load_directory(dir.path());

        let html = engine
            .render(&item("Notes", ItemPayload::text("read me")))
            .unwrap();
        assert_eq!(html, "<section>Notes: read me</section>");

        let image = engine
            .render(&item("Diagram", ItemPayload::image("diagram.png")))
            .unwrap();
        assert!(image.contains("content-image"));
        assert_eq!(engine.template_dir(), Some(dir.path()));
    }

    #[test]
    fn test_render_page_wraps_content() {
        let page = engine()
            .render_page("Rust <Fundamentals>", "es", "<p>body</p>")
            .unwrap();

        assert!(page.contains("<html lang=\"es\">"));
        assert!(page.contains("Rust &lt;Fundamentals&gt;"));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_render_page_title_cannot_inject_content() {
        let page = engine()
            .render_page("Learn {{content}} syntax", "en", "<p>body</p>")
            .unwrap();

        assert_eq!(page.matches("<p>body</p>").count(), 1);
        assert!(page.contains("Learn {{content}} syntax"));
    }
}
