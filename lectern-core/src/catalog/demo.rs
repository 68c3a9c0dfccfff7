//! Demo catalog used by the CLI, the development server and tests.

use super::{CatalogError, CatalogStore};
use crate::domain::{
    CourseId, ItemId, ItemPayload, Localized, ModuleId, NewContent, NewCourse, NewItem, NewModule,
    Subject, SubjectId, UserId,
};

/// Slug of the seeded demo course.
pub const DEMO_COURSE_SLUG: &str = "rust-fundamentals";

/// Identifiers of the seeded demo data.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    pub subject: SubjectId,
    pub course: CourseId,
    pub owner: UserId,
    pub student: UserId,
    pub modules: Vec<ModuleId>,
    pub items: Vec<ItemId>,
}

/// Seeds one subject with one course of three modules, covering every item kind.
///
/// # Errors
/// - `CatalogError::DuplicateSlug` - Store already holds the demo slugs
/// - `CatalogError::Validation` - Demo data breaks a field rule
pub async fn seed_demo_catalog(
    store: &dyn CatalogStore,
    default_language: &str,
) -> Result<DemoCatalog, CatalogError> {
    let owner = UserId::new();
    let student = UserId::new();

    let subject = store
        .create_subject(Subject::new(
            "programming",
            Localized::new(default_language, "Programming").with_translation("es", "Programación"),
        )?)
        .await?;

    let course = store
        .create_course(NewCourse {
            subject: subject.id(),
            owner,
            slug: DEMO_COURSE_SLUG.to_string(),
            title: Localized::new(default_language, "Rust Fundamentals")
                .with_translation("es", "Fundamentos de Rust"),
            overview: Localized::new(
                default_language,
                "Ownership, borrowing and the type system, one module at a time.",
            ),
        })
        .await?;
    store.enroll_student(course.id(), student).await?;

    let lessons = [
        (
            "Getting Started",
            "Toolchain and first program",
            vec![
                NewItem::new(owner, "Welcome", ItemPayload::text("Welcome to the course!")),
                NewItem::new(
                    owner,
                    "Installing Rust",
                    ItemPayload::video("https://videos.example.com/install-rust")?,
                ),
            ],
        ),
        (
            "Ownership",
            "Moves, borrows and lifetimes",
            vec![
                NewItem::new(owner, "Ownership diagram", ItemPayload::image("ownership.png")),
                NewItem::new(owner, "Borrowing cheatsheet", ItemPayload::file("borrowing.pdf")),
            ],
        ),
        (
            "Traits",
            "Shared behavior",
            vec![NewItem::new(
                owner,
                "Trait objects",
                ItemPayload::text("Use dyn Trait for dynamic dispatch."),
            )],
        ),
    ];

    let mut modules = Vec::new();
    let mut items = Vec::new();
    for (title, description, lesson_items) in lessons {
        let module = store
            .create_module(NewModule::new(course.id(), title).with_description(description))
            .await?;

        for new_item in lesson_items {
            let item = store.create_item(new_item).await?;
            store
                .create_content(NewContent::new(module.id(), item.item_ref()))
                .await?;
            items.push(item.id());
        }
        modules.push(module.id());
    }

    tracing::info!(
        course = DEMO_COURSE_SLUG,
        modules = modules.len(),
        items = items.len(),
        "Seeded demo catalog"
    );

    Ok(DemoCatalog {
        subject: subject.id(),
        course: course.id(),
        owner,
        student,
        modules,
        items,
    })
}
