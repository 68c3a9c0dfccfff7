//! Full catalog lifecycle: creation, enrollment, updates and cascades

use lectern_core::LecternError;
use lectern_core::catalog::{CatalogError, CatalogStore, ItemUpdate, MemoryCatalog};
use lectern_core::domain::{
    ItemKind, ItemPayload, ItemRef, Localized, NewContent, NewCourse, NewItem, NewModule, Subject,
    UserId, ValidationError,
};

#[tokio::test]
async fn test_course_lifecycle_end_to_end() {
    let catalog = MemoryCatalog::new();
    let instructor = UserId::new();
    let student = UserId::new();

    let subject = catalog
        .create_subject(
            Subject::new(
                "mathematics",
                Localized::new("en", "Mathematics").with_translation("es", "Matemáticas"),
            )
            .unwrap(),
        )
        .await
        .unwrap();
    let course = catalog
        .create_course(NewCourse {
            subject: subject.id(),
            owner: instructor,
            slug: "linear-algebra".to_string(),
            title: Localized::new("en", "Linear Algebra"),
            overview: Localized::new("en", "Vectors and matrices"),
        })
        .await
        .unwrap();

    assert!(catalog.enroll_student(course.id(), student).await.unwrap());
    assert_eq!(catalog.courses_joined_by(student).await.len(), 1);
    assert_eq!(catalog.courses_owned_by(instructor).await.len(), 1);

    let vectors = catalog
        .create_module(NewModule::new(course.id(), "Vectors"))
        .await
        .unwrap();
    let notes = catalog
        .create_item(NewItem::new(instructor, "Notes", ItemPayload::text("A vector is...")))
        .await
        .unwrap();
    let figure = catalog
        .create_item(NewItem::new(instructor, "Figure", ItemPayload::image("vectors.svg")))
        .await
        .unwrap();
    let notes_entry = catalog
        .create_content(NewContent::new(vectors.id(), notes.item_ref()))
        .await
        .unwrap();
    catalog
        .create_content(NewContent::new(vectors.id(), figure.item_ref()))
        .await
        .unwrap();

    let renamed = catalog
        .update_item(
            notes.id(),
            ItemUpdate {
                title: Some("Lecture notes".to_string()),
                payload: Some(ItemPayload::text("A vector has magnitude and direction.")),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title(), "Lecture notes");
    assert!(renamed.base().updated >= renamed.base().created);

    let kind_change = catalog
        .update_item(
            notes.id(),
            ItemUpdate {
                title: None,
                payload: Some(ItemPayload::file("notes.pdf")),
            },
        )
        .await;
    assert!(matches!(
        kind_change,
        Err(CatalogError::Validation(ValidationError::KindChanged {
            from: ItemKind::Text,
            to: ItemKind::File
        }))
    ));

    catalog.delete_item(figure.id()).await.unwrap();
    let outline = catalog.outline(course.id()).await.unwrap();
    let entries = &outline.modules[0].contents;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].item.as_ref().unwrap().title(), "Lecture notes");
    assert!(entries[1].item.is_none());
    assert_eq!(
        catalog.resolve_item(notes_entry.id()).await.unwrap().id(),
        notes.id()
    );

    let summary = catalog.delete_subject(subject.id()).await.unwrap();
    assert_eq!(summary.courses, 1);
    assert_eq!(summary.modules, 1);
    assert_eq!(summary.contents, 2);
    assert!(catalog.courses().await.is_empty());
    assert!(catalog.item(notes.id()).await.is_ok());
}

#[tokio::test]
async fn test_mismatched_reference_is_rejected_with_user_message() {
    let catalog = MemoryCatalog::new();
    let subject = catalog
        .create_subject(Subject::new("music", Localized::new("en", "Music")).unwrap())
        .await
        .unwrap();
    let course = catalog
        .create_course(NewCourse {
            subject: subject.id(),
            owner: UserId::new(),
            slug: "harmony".to_string(),
            title: Localized::new("en", "Harmony"),
            overview: Localized::new("en", "Chords"),
        })
        .await
        .unwrap();
    let module = catalog
        .create_module(NewModule::new(course.id(), "Intervals"))
        .await
        .unwrap();
    let video = catalog
        .create_item(NewItem::new(
            UserId::new(),
            "Lecture",
            ItemPayload::video("https://videos.example.com/intervals").unwrap(),
        ))
        .await
        .unwrap();

    let error = catalog
        .create_content(NewContent::new(
            module.id(),
            ItemRef::new(ItemKind::Text, video.id()),
        ))
        .await
        .unwrap_err();

    let error = LecternError::from(error);
    assert!(error.is_user_error());
    assert_eq!(
        error.user_message(),
        "Expected a text item but found a video item"
    );
}

#[tokio::test]
async fn test_invalid_inputs_never_reach_the_store() {
    let catalog = MemoryCatalog::new();

    assert!(Subject::new("no spaces", Localized::new("en", "Bad")).is_err());
    assert!(ItemPayload::video("ftp://files.example.com/lecture").is_err());

    let bad_image = catalog
        .create_item(NewItem::new(
            UserId::new(),
            "Not an image",
            ItemPayload::image("slides.pdf"),
        ))
        .await;
    assert!(matches!(
        bad_image,
        Err(CatalogError::Validation(ValidationError::NotAnImage { .. }))
    ));
}
