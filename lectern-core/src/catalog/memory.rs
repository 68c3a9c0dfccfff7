//! In-memory catalog store.
//!
//! All state sits behind one async `RwLock`. Creating a module or content
//! entry holds the write lock from the sibling-maximum read through the
//! insert, so concurrent creations in one scope never receive the same
//! automatic order.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{
    CascadeSummary, CatalogError, CatalogStore, ContentEntry, CourseOutline, EntityKind,
    ItemUpdate, ModuleOutline,
};
use crate::domain::{
    Content, ContentId, Course, CourseId, Item, ItemId, Module, ModuleId, NewContent, NewCourse,
    NewItem, NewModule, Subject, SubjectId, UserId,
};
use crate::ordering::{Order, Ordered, order_for};

#[derive(Debug)]
struct StoredCourse {
    course: Course,
    /// Insertion sequence, breaks ties between equal creation timestamps
    sequence: u64,
}

#[derive(Debug, Default)]
struct CatalogState {
    subjects: HashMap<SubjectId, Subject>,
    courses: HashMap<CourseId, StoredCourse>,
    modules: HashMap<ModuleId, Module>,
    contents: HashMap<ContentId, Content>,
    items: HashMap<ItemId, Item>,
    next_sequence: u64,
}

impl CatalogState {
    fn course(&self, id: CourseId) -> Result<&Course, CatalogError> {
        self.courses
            .get(&id)
            .map(|stored| &stored.course)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Course, id))
    }

    fn course_mut(&mut self, id: CourseId) -> Result<&mut Course, CatalogError> {
        self.courses
            .get_mut(&id)
            .map(|stored| &mut stored.course)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Course, id))
    }

    /// Courses matching `filter`, newest first.
    fn courses_where(&self, filter: impl Fn(&Course) -> bool) -> Vec<Course> {
        let mut matching: Vec<&StoredCourse> = self
            .courses
            .values()
            .filter(|stored| filter(&stored.course))
            .collect();
        matching.sort_by(|a, b| {
            b.course
                .created()
                .cmp(&a.course.created())
                .then_with(|| b.sequence.cmp(&a.sequence))
        });
        matching
            .into_iter()
            .map(|stored| stored.course.clone())
            .collect()
    }

    fn modules_of(&self, course: CourseId) -> Vec<Module> {
        let mut modules: Vec<Module> = self
            .modules
            .values()
            .filter(|module| module.course() == course)
            .cloned()
            .collect();
        modules.sort_by_key(Ordered::order);
        modules
    }

    fn contents_of(&self, module: ModuleId) -> Vec<Content> {
        let mut contents: Vec<Content> = self
            .contents
            .values()
            .filter(|content| content.module() == module)
            .cloned()
            .collect();
        contents.sort_by_key(Ordered::order);
        contents
    }

    fn remove_module_cascade(&mut self, id: ModuleId) -> CascadeSummary {
        let before = self.contents.len();
        self.contents.retain(|_, content| content.module() != id);
        let removed_module = self.modules.remove(&id).is_some();

        CascadeSummary {
            courses: 0,
            modules: usize::from(removed_module),
            contents: before - self.contents.len(),
        }
    }

    fn remove_course_cascade(&mut self, id: CourseId) -> CascadeSummary {
        let module_ids: Vec<ModuleId> = self
            .modules
            .values()
            .filter(|module| module.course() == id)
            .map(Module::id)
            .collect();

        let mut summary = CascadeSummary {
            courses: usize::from(self.courses.remove(&id).is_some()),
            ..Default::default()
        };
        for module_id in module_ids {
            let removed = self.remove_module_cascade(module_id);
            summary.modules += removed.modules;
            summary.contents += removed.contents;
        }
        summary
    }
}

/// Catalog store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    state: RwLock<CatalogState>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn create_subject(&self, subject: Subject) -> Result<Subject, CatalogError> {
        let mut state = self.state.write().await;
        if state
            .subjects
            .values()
            .any(|existing| existing.slug() == subject.slug())
        {
            return Err(CatalogError::DuplicateSlug {
                entity: EntityKind::Subject,
                slug: subject.slug().to_string(),
            });
        }

        state.subjects.insert(subject.id(), subject.clone());
        tracing::info!(subject_id = %subject.id(), slug = subject.slug(), "Created subject");
        Ok(subject)
    }

    async fn subject(&self, id: SubjectId) -> Result<Subject, CatalogError> {
        let state = self.state.read().await;
        state
            .subjects
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Subject, id))
    }

    async fn subject_by_slug(&self, slug: &str) -> Result<Subject, CatalogError> {
        let state = self.state.read().await;
        state
            .subjects
            .values()
            .find(|subject| subject.slug() == slug)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Subject, slug))
    }

    async fn subjects(&self) -> Vec<Subject> {
        let state = self.state.read().await;
        let mut subjects: Vec<Subject> = state.subjects.values().cloned().collect();
        subjects.sort_by(|a, b| a.slug().cmp(b.slug()));
        subjects
    }

    async fn delete_subject(&self, id: SubjectId) -> Result<CascadeSummary, CatalogError> {
        let mut state = self.state.write().await;
        if state.subjects.remove(&id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Subject, id));
        }

        let course_ids: Vec<CourseId> = state
            .courses
            .values()
            .filter(|stored| stored.course.subject() == id)
            .map(|stored| stored.course.id())
            .collect();

        let mut summary = CascadeSummary::default();
        for course_id in course_ids {
            let removed = state.remove_course_cascade(course_id);
            summary.courses += removed.courses;
            summary.modules += removed.modules;
            summary.contents += removed.contents;
        }

        tracing::info!(subject_id = %id, ?summary, "Deleted subject");
        Ok(summary)
    }

    async fn create_course(&self, course: NewCourse) -> Result<Course, CatalogError> {
        let mut state = self.state.write().await;
        if !state.subjects.contains_key(&course.subject) {
            return Err(CatalogError::not_found(EntityKind::Subject, course.subject));
        }
        if state
            .courses
            .values()
            .any(|stored| stored.course.slug() == course.slug)
        {
            return Err(CatalogError::DuplicateSlug {
                entity: EntityKind::Course,
                slug: course.slug,
            });
        }

        let course = Course::new(course)?;
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.courses.insert(
            course.id(),
            StoredCourse {
                course: course.clone(),
                sequence,
            },
        );

        tracing::info!(course_id = %course.id(), slug = course.slug(), "Created course");
        Ok(course)
    }

    async fn course(&self, id: CourseId) -> Result<Course, CatalogError> {
        let state = self.state.read().await;
        state.course(id).cloned()
    }

    async fn course_by_slug(&self, slug: &str) -> Result<Course, CatalogError> {
        let state = self.state.read().await;
        state
            .courses
            .values()
            .map(|stored| &stored.course)
            .find(|course| course.slug() == slug)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Course, slug))
    }

    async fn courses(&self) -> Vec<Course> {
        self.state.read().await.courses_where(|_| true)
    }

    async fn courses_for_subject(&self, subject: SubjectId) -> Vec<Course> {
        self.state
            .read()
            .await
            .courses_where(|course| course.subject() == subject)
    }

    async fn courses_owned_by(&self, owner: UserId) -> Vec<Course> {
        self.state
            .read()
            .await
            .courses_where(|course| course.owner() == owner)
    }

    async fn courses_joined_by(&self, student: UserId) -> Vec<Course> {
        self.state
            .read()
            .await
            .courses_where(|course| course.is_enrolled(student))
    }

    async fn enroll_student(
        &self,
        course: CourseId,
        student: UserId,
    ) -> Result<bool, CatalogError> {
        let mut state = self.state.write().await;
        let enrolled = state.course_mut(course)?.enroll(student);
        if enrolled {
            tracing::debug!(course_id = %course, student_id = %student, "Enrolled student");
        }
        Ok(enrolled)
    }

    async fn unenroll_student(
        &self,
        course: CourseId,
        student: UserId,
    ) -> Result<bool, CatalogError> {
        let mut state = self.state.write().await;
        Ok(state.course_mut(course)?.unenroll(student))
    }

    async fn delete_course(&self, id: CourseId) -> Result<CascadeSummary, CatalogError> {
        let mut state = self.state.write().await;
        state.course(id)?;

        let summary = state.remove_course_cascade(id);
        tracing::info!(course_id = %id, ?summary, "Deleted course");
        Ok(summary)
    }

    async fn create_module(&self, module: NewModule) -> Result<Module, CatalogError> {
        let mut state = self.state.write().await;
        state.course(module.course)?;

        let order = order_for(&state.modules, &module)?;
        let module = Module::place(module, order)?;
        state.modules.insert(module.id(), module.clone());

        tracing::info!(
            module_id = %module.id(),
            course_id = %module.course(),
            order = %module.order(),
            "Created module"
        );
        Ok(module)
    }

    async fn module(&self, id: ModuleId) -> Result<Module, CatalogError> {
        let state = self.state.read().await;
        state
            .modules
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Module, id))
    }

    async fn modules_for_course(&self, course: CourseId) -> Vec<Module> {
        self.state.read().await.modules_of(course)
    }

    async fn move_module(&self, id: ModuleId, order: Order) -> Result<Module, CatalogError> {
        let mut state = self.state.write().await;
        let module = state
            .modules
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Module, id))?;

        module.set_order(order);
        tracing::debug!(module_id = %id, %order, "Moved module");
        Ok(module.clone())
    }

    async fn delete_module(&self, id: ModuleId) -> Result<CascadeSummary, CatalogError> {
        let mut state = self.state.write().await;
        if !state.modules.contains_key(&id) {
            return Err(CatalogError::not_found(EntityKind::Module, id));
        }

        let summary = state.remove_module_cascade(id);
        tracing::info!(module_id = %id, ?summary, "Deleted module");
        Ok(summary)
    }

    async fn create_item(&self, item: NewItem) -> Result<Item, CatalogError> {
        let item = Item::new(item)?;
        let mut state = self.state.write().await;
        state.items.insert(item.id(), item.clone());

        tracing::info!(item_id = %item.id(), kind = %item.kind(), "Created item");
        Ok(item)
    }

    async fn item(&self, id: ItemId) -> Result<Item, CatalogError> {
        let state = self.state.read().await;
        state
            .items
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Item, id))
    }

    async fn update_item(&self, id: ItemId, update: ItemUpdate) -> Result<Item, CatalogError> {
        let mut state = self.state.write().await;
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Item, id))?;

        item.update(update.title, update.payload)?;
        Ok(item.clone())
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), CatalogError> {
        let mut state = self.state.write().await;
        if state.items.remove(&id).is_none() {
            return Err(CatalogError::not_found(EntityKind::Item, id));
        }

        let referencing = state
            .contents
            .values()
            .filter(|content| content.item().id == id)
            .count();
        if referencing > 0 {
            tracing::warn!(item_id = %id, referencing, "Deleted item still referenced by content");
        } else {
            tracing::info!(item_id = %id, "Deleted item");
        }
        Ok(())
    }

    async fn create_content(&self, content: NewContent) -> Result<Content, CatalogError> {
        let mut state = self.state.write().await;
        if !state.modules.contains_key(&content.module) {
            return Err(CatalogError::not_found(EntityKind::Module, content.module));
        }

        let item = state
            .items
            .get(&content.item.id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Item, content.item.id))?;
        if item.kind() != content.item.kind {
            return Err(CatalogError::ItemKindMismatch {
                expected: content.item.kind,
                found: item.kind(),
            });
        }

        let order = order_for(&state.contents, &content)?;
        let content = Content::place(content, order);
        state.contents.insert(content.id(), content.clone());

        tracing::info!(
            content_id = %content.id(),
            module_id = %content.module(),
            item = %content.item(),
            order = %content.order(),
            "Created content"
        );
        Ok(content)
    }

    async fn content(&self, id: ContentId) -> Result<Content, CatalogError> {
        let state = self.state.read().await;
        state
            .contents
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::not_found(EntityKind::Content, id))
    }

    async fn contents_for_module(&self, module: ModuleId) -> Vec<Content> {
        self.state.read().await.contents_of(module)
    }

    async fn move_content(&self, id: ContentId, order: Order) -> Result<Content, CatalogError> {
        let mut state = self.state.write().await;
        let content = state
            .contents
            .get_mut(&id)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Content, id))?;

        content.set_order(order);
        tracing::debug!(content_id = %id, %order, "Moved content");
        Ok(content.clone())
    }

    async fn delete_content(&self, id: ContentId) -> Result<(), CatalogError> {
        let mut state = self.state.write().await;
        state
            .contents
            .remove(&id)
            .map(|_| tracing::info!(content_id = %id, "Deleted content"))
            .ok_or_else(|| CatalogError::not_found(EntityKind::Content, id))
    }

    async fn resolve_item(&self, content: ContentId) -> Result<Item, CatalogError> {
        let state = self.state.read().await;
        let entry = state
            .contents
            .get(&content)
            .ok_or_else(|| CatalogError::not_found(EntityKind::Content, content))?;

        state.items.get(&entry.item().id).cloned().ok_or_else(|| {
            tracing::warn!(content_id = %content, item = %entry.item(), "Content item is dangling");
            CatalogError::DanglingItem {
                content,
                item: entry.item().id,
            }
        })
    }

    async fn outline(&self, course: CourseId) -> Result<CourseOutline, CatalogError> {
        let state = self.state.read().await;
        let course = state.course(course)?.clone();

        let modules = state
            .modules_of(course.id())
            .into_iter()
            .map(|module| {
                let contents = state
                    .contents_of(module.id())
                    .into_iter()
                    .map(|content| ContentEntry {
                        item: state.items.get(&content.item().id).cloned(),
                        content,
                    })
                    .collect();
                ModuleOutline { module, contents }
            })
            .collect();

        Ok(CourseOutline { course, modules })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::{ItemKind, ItemPayload, ItemRef, Localized};

    struct Fixture {
        catalog: MemoryCatalog,
        subject: SubjectId,
        course: CourseId,
        owner: UserId,
    }

    impl Fixture {
        async fn new() -> Self {
            let catalog = MemoryCatalog::new();
            let owner = UserId::new();
            let subject = catalog
                .create_subject(
                    Subject::new("programming", Localized::new("en", "Programming")).unwrap(),
                )
                .await
                .unwrap()
                .id();
            let course = catalog
                .create_course(new_course(subject, owner, "rust-basics"))
                .await
                .unwrap()
                .id();

            Self {
                catalog,
                subject,
                course,
                owner,
            }
        }

        async fn module(&self, title: &str) -> Module {
            self.catalog
                .create_module(NewModule::new(self.course, title))
                .await
                .unwrap()
        }

        async fn text_item(&self, title: &str) -> Item {
            self.catalog
                .create_item(NewItem::new(self.owner, title, ItemPayload::text("Body")))
                .await
                .unwrap()
        }
    }

    fn new_course(subject: SubjectId, owner: UserId, slug: &str) -> NewCourse {
        NewCourse {
            subject,
            owner,
            slug: slug.to_string(),
            title: Localized::new("en", slug),
            overview: Localized::new("en", "Overview"),
        }
    }

    #[tokio::test]
    async fn test_deleted_module_leaves_gap_in_course_order() {
        let fixture = Fixture::new().await;

        let intro = fixture.module("Intro").await;
        let basics = fixture.module("Basics").await;
        assert_eq!(intro.order(), Order::new(0));
        assert_eq!(basics.order(), Order::new(1));

        fixture.catalog.delete_module(intro.id()).await.unwrap();
        let advanced = fixture.module("Advanced").await;
        assert_eq!(advanced.order(), Order::new(2));

        let titles: Vec<String> = fixture
            .catalog
            .modules_for_course(fixture.course)
            .await
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(titles, vec!["1. Basics", "2. Advanced"]);
    }

    #[tokio::test]
    async fn test_explicit_order_then_auto_order() {
        let fixture = Fixture::new().await;

        let explicit = fixture
            .catalog
            .create_module(NewModule::new(fixture.course, "Appendix").with_order(5))
            .await
            .unwrap();
        assert_eq!(explicit.order(), Order::new(5));

        let next = fixture.module("Epilogue").await;
        assert_eq!(next.order(), Order::new(6));
    }

    #[tokio::test]
    async fn test_auto_order_after_maximum_is_rejected() {
        let fixture = Fixture::new().await;
        fixture
            .catalog
            .create_module(NewModule::new(fixture.course, "Last").with_order(u32::MAX))
            .await
            .unwrap();

        let result = fixture
            .catalog
            .create_module(NewModule::new(fixture.course, "Overflow"))
            .await;
        assert!(matches!(
            result,
            Err(CatalogError::OrderOverflow(overflow)) if overflow.last == Order::new(u32::MAX)
        ));
        assert_eq!(fixture.catalog.modules_for_course(fixture.course).await.len(), 1);

        let module = fixture.catalog.modules_for_course(fixture.course).await[0].id();
        let item = fixture.text_item("Notes").await;
        fixture
            .catalog
            .create_content(NewContent::new(module, item.item_ref()).with_order(u32::MAX))
            .await
            .unwrap();
        assert!(matches!(
            fixture
                .catalog
                .create_content(NewContent::new(module, item.item_ref()))
                .await,
            Err(CatalogError::OrderOverflow(_))
        ));
    }

    #[tokio::test]
    async fn test_module_orders_are_independent_per_course() {
        let fixture = Fixture::new().await;
        let other = fixture
            .catalog
            .create_course(new_course(fixture.subject, fixture.owner, "rust-advanced"))
            .await
            .unwrap()
            .id();

        fixture.module("A1").await;
        for title in ["B1", "B2", "B3"] {
            fixture
                .catalog
                .create_module(NewModule::new(other, title))
                .await
                .unwrap();
        }

        assert_eq!(fixture.module("A2").await.order(), Order::new(1));
    }

    #[tokio::test]
    async fn test_move_module_does_not_renumber_siblings() {
        let fixture = Fixture::new().await;
        let first = fixture.module("First").await;
        let second = fixture.module("Second").await;

        let moved = fixture
            .catalog
            .move_module(first.id(), Order::new(1))
            .await
            .unwrap();
        assert_eq!(moved.order(), Order::new(1));
        assert_eq!(
            fixture.catalog.module(second.id()).await.unwrap().order(),
            Order::new(1)
        );
        assert_eq!(fixture.module("Third").await.order(), Order::new(2));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_module_creation_yields_distinct_orders() {
        let fixture = Fixture::new().await;
        let course = fixture.course;
        let catalog = Arc::new(fixture.catalog);

        let tasks: Vec<_> = (0..32)
            .map(|index| {
                let catalog = Arc::clone(&catalog);
                tokio::spawn(async move {
                    catalog
                        .create_module(NewModule::new(course, format!("Module {index}")))
                        .await
                        .unwrap()
                        .order()
                        .value()
                })
            })
            .collect();

        let mut orders = Vec::new();
        for task in tasks {
            orders.push(task.await.unwrap());
        }
        orders.sort_unstable();

        assert_eq!(orders, (0..32).collect::<Vec<u32>>());
    }

    #[tokio::test]
    async fn test_content_orders_scoped_to_module() {
        let fixture = Fixture::new().await;
        let intro = fixture.module("Intro").await;
        let basics = fixture.module("Basics").await;
        let item = fixture.text_item("Welcome").await;

        let first = fixture
            .catalog
            .create_content(NewContent::new(intro.id(), item.item_ref()))
            .await
            .unwrap();
        let second = fixture
            .catalog
            .create_content(NewContent::new(intro.id(), item.item_ref()))
            .await
            .unwrap();
        let elsewhere = fixture
            .catalog
            .create_content(NewContent::new(basics.id(), item.item_ref()))
            .await
            .unwrap();

        assert_eq!(first.order(), Order::new(0));
        assert_eq!(second.order(), Order::new(1));
        assert_eq!(elsewhere.order(), Order::new(0));
    }

    #[tokio::test]
    async fn test_content_requires_matching_item_kind() {
        let fixture = Fixture::new().await;
        let module = fixture.module("Intro").await;
        let item = fixture.text_item("Welcome").await;

        let result = fixture
            .catalog
            .create_content(NewContent::new(
                module.id(),
                ItemRef::new(ItemKind::Video, item.id()),
            ))
            .await;
        assert!(matches!(
            result,
            Err(CatalogError::ItemKindMismatch {
                expected: ItemKind::Video,
                found: ItemKind::Text
            })
        ));

        let missing = fixture
            .catalog
            .create_content(NewContent::new(
                module.id(),
                ItemRef::new(ItemKind::Text, ItemId::new()),
            ))
            .await;
        assert!(matches!(
            missing,
            Err(CatalogError::NotFound {
                entity: EntityKind::Item,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_deleting_item_leaves_content_dangling() {
        let fixture = Fixture::new().await;
        let module = fixture.module("Intro").await;
        let item = fixture.text_item("Welcome").await;
        let content = fixture
            .catalog
            .create_content(NewContent::new(module.id(), item.item_ref()))
            .await
            .unwrap();

        assert_eq!(
            fixture.catalog.resolve_item(content.id()).await.unwrap(),
            item
        );

        fixture.catalog.delete_item(item.id()).await.unwrap();

        assert!(fixture.catalog.content(content.id()).await.is_ok());
        assert!(matches!(
            fixture.catalog.resolve_item(content.id()).await,
            Err(CatalogError::DanglingItem { .. })
        ));

        let outline = fixture.catalog.outline(fixture.course).await.unwrap();
        assert!(outline.modules[0].contents[0].item.is_none());
    }

    #[tokio::test]
    async fn test_course_deletion_cascades_but_keeps_items() {
        let fixture = Fixture::new().await;
        let intro = fixture.module("Intro").await;
        let basics = fixture.module("Basics").await;
        let item = fixture.text_item("Welcome").await;
        for module in [&intro, &basics, &basics] {
            fixture
                .catalog
                .create_content(NewContent::new(module.id(), item.item_ref()))
                .await
                .unwrap();
        }

        let summary = fixture.catalog.delete_course(fixture.course).await.unwrap();
        assert_eq!(
            summary,
            CascadeSummary {
                courses: 1,
                modules: 2,
                contents: 3
            }
        );

        assert!(fixture.catalog.module(intro.id()).await.is_err());
        assert!(fixture.catalog.contents_for_module(basics.id()).await.is_empty());
        assert!(fixture.catalog.item(item.id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_subject_deletion_cascades_to_courses() {
        let fixture = Fixture::new().await;
        fixture.module("Intro").await;

        let summary = fixture.catalog.delete_subject(fixture.subject).await.unwrap();
        assert_eq!(summary.courses, 1);
        assert_eq!(summary.modules, 1);
        assert!(fixture.catalog.courses().await.is_empty());
    }

    #[tokio::test]
    async fn test_listings_follow_catalog_order() {
        let fixture = Fixture::new().await;
        for slug in ["web", "data", "systems"] {
            fixture
                .catalog
                .create_subject(Subject::new(slug, Localized::new("en", slug)).unwrap())
                .await
                .unwrap();
        }
        let slugs: Vec<String> = fixture
            .catalog
            .subjects()
            .await
            .iter()
            .map(|subject| subject.slug().to_string())
            .collect();
        assert_eq!(slugs, vec!["data", "programming", "systems", "web"]);

        fixture
            .catalog
            .create_course(new_course(fixture.subject, fixture.owner, "newer"))
            .await
            .unwrap();
        let courses: Vec<String> = fixture
            .catalog
            .courses()
            .await
            .iter()
            .map(|course| course.slug().to_string())
            .collect();
        assert_eq!(courses, vec!["newer", "rust-basics"]);
    }

    #[tokio::test]
    async fn test_duplicate_slugs_are_rejected() {
        let fixture = Fixture::new().await;

        let subject = fixture
            .catalog
            .create_subject(Subject::new("programming", Localized::new("en", "Again")).unwrap())
            .await;
        assert!(matches!(subject, Err(CatalogError::DuplicateSlug { .. })));

        let course = fixture
            .catalog
            .create_course(new_course(fixture.subject, fixture.owner, "rust-basics"))
            .await;
        assert!(matches!(
            course,
            Err(CatalogError::DuplicateSlug {
                entity: EntityKind::Course,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_enrollment_queries() {
        let fixture = Fixture::new().await;
        let student = UserId::new();

        assert!(fixture.catalog.enroll_student(fixture.course, student).await.unwrap());
        assert!(!fixture.catalog.enroll_student(fixture.course, student).await.unwrap());

        let joined = fixture.catalog.courses_joined_by(student).await;
        assert_eq!(joined.len(), 1);
        assert_eq!(fixture.catalog.courses_owned_by(fixture.owner).await.len(), 1);
        assert!(fixture.catalog.courses_owned_by(student).await.is_empty());

        assert!(fixture.catalog.unenroll_student(fixture.course, student).await.unwrap());
        assert!(fixture.catalog.courses_joined_by(student).await.is_empty());
    }

    #[tokio::test]
    async fn test_module_requires_existing_course() {
        let catalog = MemoryCatalog::new();
        let result = catalog
            .create_module(NewModule::new(CourseId::new(), "Orphan"))
            .await;

        assert!(matches!(
            result,
            Err(CatalogError::NotFound {
                entity: EntityKind::Course,
                ..
            })
        ));
    }
}
