//! Centralized configuration for Lectern.
//!
//! All tunable parameters and settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::path::PathBuf;

/// Central configuration for all Lectern components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct LecternConfig {
    pub catalog: CatalogConfig,
    pub templates: TemplateConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Catalog content configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Language every localized field must provide, used as lookup fallback
    pub default_language: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_language: "en".to_string(),
        }
    }
}

/// Content template configuration.
///
/// Controls where item templates are loaded from and how template names
/// are derived from item kinds.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    /// Directory holding template overrides (None = embedded templates only)
    pub template_dir: Option<PathBuf>,
    /// Prefix of content item template names, e.g. `courses/content/text.html`
    pub content_prefix: String,
    /// Public URL prefix of uploaded blobs
    pub media_url: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            template_dir: Some(PathBuf::from("lectern-web/templates")),
            content_prefix: "courses/content".to_string(),
            media_url: "/media/".to_string(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to bind to (0 = ephemeral)
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Directory receiving the debug log of the last run
    pub logs_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl LecternConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(language) = std::env::var("LECTERN_DEFAULT_LANGUAGE")
            && !language.trim().is_empty()
        {
            config.catalog.default_language = language.trim().to_string();
        }

        if let Ok(dir) = std::env::var("LECTERN_TEMPLATE_DIR") {
            config.templates.template_dir = if dir.is_empty() {
                None
            } else {
                Some(PathBuf::from(dir))
            };
        }

        if let Ok(host) = std::env::var("LECTERN_HOST") {
            config.server.host = host;
        }

        if let Ok(port) = std::env::var("LECTERN_PORT")
            && let Ok(port) = port.parse::<u16>()
        {
            config.server.port = port;
        }

        if let Ok(dir) = std::env::var("LECTERN_LOGS_DIR")
            && !dir.trim().is_empty()
        {
            config.logging.logs_dir = PathBuf::from(dir.trim());
        }

        config
    }

    /// Creates a configuration optimized for testing.
    ///
    /// Uses embedded templates only and an ephemeral port.
    pub fn for_testing() -> Self {
        Self {
            templates: TemplateConfig {
                template_dir: None,
                ..Default::default()
            },
            server: ServerConfig {
                port: 0,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}
