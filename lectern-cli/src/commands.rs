//! CLI command implementations

use std::sync::Arc;

use anyhow::Context;
use clap::Subcommand;
use lectern_core::catalog::{CourseOutline, seed_demo_catalog};
use lectern_core::config::LecternConfig;
use lectern_core::ordering::Ordered;
use lectern_core::{CatalogStore, LecternError, MemoryCatalog};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to (defaults to LECTERN_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (defaults to LECTERN_PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,
        /// Load the demo catalog before serving
        #[arg(long)]
        seed: bool,
    },
    /// Seed the demo catalog and print its identifiers
    Seed,
    /// Print the outline of a course from the demo catalog
    Outline {
        /// Course slug
        slug: String,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the failure of the command that ran, with user-facing context
pub async fn handle_command(command: Commands, config: LecternConfig) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port, seed } => serve(config, host, port, seed).await,
        Commands::Seed => seed(&config).await,
        Commands::Outline { slug } => outline(&config, &slug).await,
    }
}

/// Serves the catalog over HTTP until interrupted.
///
/// # Errors
/// - Seeding failed or the server could not bind its address
pub async fn serve(
    mut config: LecternConfig,
    host: Option<String>,
    port: Option<u16>,
    seed: bool,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let catalog = Arc::new(MemoryCatalog::new());
    if seed {
        let demo = seed_demo_catalog(catalog.as_ref(), &config.catalog.default_language)
            .await
            .map_err(user_error)?;
        tracing::info!(course = %demo.course, modules = demo.modules.len(), "Seeded demo catalog");
    }

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        templates = ?config.templates.template_dir,
        "Starting Lectern"
    );
    lectern_web::run_server(config, catalog).await?;
    Ok(())
}

/// Seeds a fresh in-memory catalog and prints what was created.
///
/// # Errors
/// - Demo data was rejected by the catalog
pub async fn seed(config: &LecternConfig) -> anyhow::Result<()> {
    let catalog = MemoryCatalog::new();
    let demo = seed_demo_catalog(&catalog, &config.catalog.default_language)
        .await
        .map_err(user_error)?;
    tracing::info!(
        course = %demo.course,
        modules = demo.modules.len(),
        items = demo.items.len(),
        "Seeded demo catalog"
    );

    println!("Seeded demo catalog");
    println!("  Subject: {}", demo.subject);
    println!("  Course:  {}", demo.course);
    println!("  Owner:   {}", demo.owner);
    println!("  Student: {}", demo.student);
    for module in &demo.modules {
        println!("  Module:  {module}");
    }
    println!("  Items:   {}", demo.items.len());
    Ok(())
}

/// Prints the demo catalog's outline for `slug`.
///
/// # Errors
/// - No course with this slug in the demo catalog
pub async fn outline(config: &LecternConfig, slug: &str) -> anyhow::Result<()> {
    let catalog = MemoryCatalog::new();
    seed_demo_catalog(&catalog, &config.catalog.default_language)
        .await
        .map_err(user_error)?;

    let course = catalog.course_by_slug(slug).await.map_err(|e| {
        tracing::debug!(%slug, error = %e, "Outline requested for unknown course");
        user_error(e)
    })?;
    let outline = catalog
        .outline(course.id())
        .await
        .with_context(|| format!("Failed to load outline of '{slug}'"))?;

    for line in outline_lines(&outline, &config.catalog.default_language) {
        println!("{line}");
    }
    Ok(())
}

/// Outline as text: the course title, then one `"{order}. {title}"` line
/// per module followed by its items.
pub fn outline_lines(outline: &CourseOutline, lang: &str) -> Vec<String> {
    let mut lines = vec![outline.course.title().get(lang).to_string()];

    for module in &outline.modules {
        lines.push(format!("{}. {}", module.module.order(), module.module.title()));
        for entry in &module.contents {
            let line = match &entry.item {
                Some(item) => format!("   - [{}] {}", item.kind(), item.title()),
                None => format!("   - [{}] (missing)", entry.content.item().kind),
            };
            lines.push(line);
        }
    }
    lines
}

fn user_error(error: impl Into<LecternError>) -> anyhow::Error {
    let error = error.into();
    anyhow::anyhow!(error.user_message())
}
