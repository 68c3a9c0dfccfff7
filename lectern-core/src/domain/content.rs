//! Module content entries pointing at items, ordered within their module.

use serde::{Deserialize, Serialize};

use crate::domain::ids::{ContentId, ModuleId};
use crate::domain::item::ItemRef;
use crate::ordering::{Order, OrderScope, Ordered, Placeable, Sequenced};

/// Scope field content entries are ordered by.
pub const CONTENT_SCOPE_FIELD: &str = "module";

/// Input for attaching an item to a module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContent {
    pub module: ModuleId,
    pub item: ItemRef,
    #[serde(default)]
    pub order: Option<Order>,
}

impl NewContent {
    pub fn new(module: ModuleId, item: ItemRef) -> Self {
        Self {
            module,
            item,
            order: None,
        }
    }

    pub fn with_order(mut self, order: impl Into<Order>) -> Self {
        self.order = Some(order.into());
        self
    }
}

impl Sequenced for NewContent {
    fn order_scope(&self) -> OrderScope {
        OrderScope::new(CONTENT_SCOPE_FIELD, self.module)
    }
}

impl Placeable for NewContent {
    fn requested_order(&self) -> Option<Order> {
        self.order
    }
}

/// An item placed in a module.
///
/// The referenced item is not owned: deleting it leaves this entry dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    id: ContentId,
    module: ModuleId,
    item: ItemRef,
    order: Order,
}

impl Content {
    /// Builds the entry for `new` at its resolved `order`.
    pub fn place(new: NewContent, order: Order) -> Self {
        Self {
            id: ContentId::new(),
            module: new.module,
            item: new.item,
            order,
        }
    }

    /// Moves the entry to an explicit position. Siblings are left untouched.
    pub fn set_order(&mut self, order: Order) {
        self.order = order;
    }

    pub fn id(&self) -> ContentId {
        self.id
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn item(&self) -> ItemRef {
        self.item
    }
}

impl Sequenced for Content {
    fn order_scope(&self) -> OrderScope {
        OrderScope::new(CONTENT_SCOPE_FIELD, self.module)
    }
}

impl Ordered for Content {
    fn order(&self) -> Order {
        self.order
    }
}
