//! Course modules, ordered within their course.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{CourseId, ModuleId};
use crate::domain::validation::{ValidationError, validate_title};
use crate::ordering::{Order, OrderScope, Ordered, Placeable, Sequenced};

/// Scope field modules are ordered by.
pub const MODULE_SCOPE_FIELD: &str = "course";

/// Input for creating a module.
///
/// Leave `order` empty to append the module after its course's last module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewModule {
    pub course: CourseId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: Option<Order>,
}

impl NewModule {
    pub fn new(course: CourseId, title: impl Into<String>) -> Self {
        Self {
            course,
            title: title.into(),
            description: String::new(),
            order: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_order(mut self, order: impl Into<Order>) -> Self {
        self.order = Some(order.into());
        self
    }
}

impl Sequenced for NewModule {
    fn order_scope(&self) -> OrderScope {
        OrderScope::new(MODULE_SCOPE_FIELD, self.course)
    }
}

impl Placeable for NewModule {
    fn requested_order(&self) -> Option<Order> {
        self.order
    }
}

/// A titled section of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    id: ModuleId,
    course: CourseId,
    title: String,
    description: String,
    order: Order,
}

impl Module {
    /// Builds the module for `new` at its resolved `order`.
    ///
    /// # Errors
    /// - `ValidationError` - Title breaks a field rule
    pub fn place(new: NewModule, order: Order) -> Result<Self, ValidationError> {
        validate_title(&new.title)?;

        Ok(Self {
            id: ModuleId::new(),
            course: new.course,
            title: new.title,
            description: new.description,
            order,
        })
    }

    /// Moves the module to an explicit position. Siblings are left untouched.
    pub fn set_order(&mut self, order: Order) {
        self.order = order;
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn course(&self) -> CourseId {
        self.course
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl Sequenced for Module {
    fn order_scope(&self) -> OrderScope {
        OrderScope::new(MODULE_SCOPE_FIELD, self.course)
    }
}

impl Ordered for Module {
    fn order(&self) -> Order {
        self.order
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.order, self.title)
    }
}
