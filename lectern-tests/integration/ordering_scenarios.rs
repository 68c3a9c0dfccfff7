//! Ordering of modules and content entries through the catalog store

use std::sync::Arc;

use lectern_core::catalog::{CatalogStore, MemoryCatalog};
use lectern_core::domain::{
    Course, ItemPayload, Localized, NewContent, NewCourse, NewItem, NewModule, Subject, UserId,
};
use lectern_core::ordering::{Order, Ordered};
use proptest::prelude::*;

async fn course(catalog: &MemoryCatalog, slug: &str) -> Course {
    let subject = match catalog.subject_by_slug("science").await {
        Ok(subject) => subject,
        Err(_) => catalog
            .create_subject(Subject::new("science", Localized::new("en", "Science")).unwrap())
            .await
            .unwrap(),
    };

    catalog
        .create_course(NewCourse {
            subject: subject.id(),
            owner: UserId::new(),
            slug: slug.to_string(),
            title: Localized::new("en", slug),
            overview: Localized::new("en", "Overview"),
        })
        .await
        .unwrap()
}

fn module_orders(modules: &[impl Ordered]) -> Vec<u32> {
    modules.iter().map(|m| m.order().value()).collect()
}

#[tokio::test]
async fn test_intro_basics_advanced_scenario() {
    let catalog = MemoryCatalog::new();
    let course = course(&catalog, "physics").await;

    let intro = catalog
        .create_module(NewModule::new(course.id(), "Intro"))
        .await
        .unwrap();
    let basics = catalog
        .create_module(NewModule::new(course.id(), "Basics"))
        .await
        .unwrap();
    assert_eq!(intro.order(), Order::new(0));
    assert_eq!(basics.order(), Order::new(1));

    catalog.delete_module(intro.id()).await.unwrap();
    let advanced = catalog
        .create_module(NewModule::new(course.id(), "Advanced"))
        .await
        .unwrap();
    assert_eq!(advanced.order(), Order::new(2));

    let remaining = catalog.modules_for_course(course.id()).await;
    assert_eq!(module_orders(&remaining), vec![1, 2]);
}

#[tokio::test]
async fn test_explicit_zero_is_kept_and_duplicates_are_allowed() {
    let catalog = MemoryCatalog::new();
    let course = course(&catalog, "chemistry").await;

    catalog
        .create_module(NewModule::new(course.id(), "First"))
        .await
        .unwrap();
    let explicit = catalog
        .create_module(NewModule::new(course.id(), "Also first").with_order(0))
        .await
        .unwrap();
    assert_eq!(explicit.order(), Order::FIRST);

    let next = catalog
        .create_module(NewModule::new(course.id(), "Second"))
        .await
        .unwrap();
    assert_eq!(next.order(), Order::new(1));
}

#[tokio::test]
async fn test_concurrent_content_creation_in_one_module() {
    let catalog = Arc::new(MemoryCatalog::new());
    let course = course(&catalog, "biology").await;
    let module = catalog
        .create_module(NewModule::new(course.id(), "Cells"))
        .await
        .unwrap();
    let owner = UserId::new();

    let mut handles = Vec::new();
    for i in 0..16 {
        let catalog = catalog.clone();
        let module = module.id();
        handles.push(tokio::spawn(async move {
            let item = catalog
                .create_item(NewItem::new(owner, format!("Note {i}"), ItemPayload::text("...")))
                .await
                .unwrap();
            catalog
                .create_content(NewContent::new(module, item.item_ref()))
                .await
                .unwrap()
                .order()
        }));
    }

    let mut orders = Vec::new();
    for handle in handles {
        orders.push(handle.await.unwrap().value());
    }
    orders.sort_unstable();
    assert_eq!(orders, (0..16).collect::<Vec<u32>>());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_auto_orders_follow_creation_sequence(count in 1usize..12) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let orders = runtime.block_on(async {
            let catalog = MemoryCatalog::new();
            let course = course(&catalog, "geology").await;
            for i in 0..count {
                catalog
                    .create_module(NewModule::new(course.id(), format!("Module {i}")))
                    .await
                    .unwrap();
            }
            module_orders(&catalog.modules_for_course(course.id()).await)
        });

        prop_assert_eq!(orders, (0..count as u32).collect::<Vec<_>>());
    }

    #[test]
    fn prop_explicit_order_then_auto_is_one_past(explicit in 0u32..1000) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (placed, next) = runtime.block_on(async {
            let catalog = MemoryCatalog::new();
            let course = course(&catalog, "astronomy").await;
            let placed = catalog
                .create_module(NewModule::new(course.id(), "Placed").with_order(explicit))
                .await
                .unwrap();
            let next = catalog
                .create_module(NewModule::new(course.id(), "Next"))
                .await
                .unwrap();
            (placed.order(), next.order())
        });

        prop_assert_eq!(placed, Order::new(explicit));
        prop_assert_eq!(next, Order::new(explicit + 1));
    }
}
