//! Scoped ordering of sibling entities.
//!
//! Modules are ordered within their course and content entries within their
//! module. A new entity either carries an explicit [`Order`] or receives the
//! next position in its [`OrderScope`]: `0` for the first sibling, otherwise
//! one past the highest order currently present. Orders are never compacted,
//! so deleting a sibling leaves a gap.
//!
//! The assignment is a read of the sibling maximum followed by the caller's
//! write. It is only free of duplicates when the caller keeps other writers
//! out between the two, as [`crate::catalog::MemoryCatalog`] does by holding
//! its write lock across both.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of an entity among its siblings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Order(u32);

impl Order {
    /// Order of the first entity in an empty scope.
    pub const FIRST: Order = Order(0);

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The position right after this one, or `None` past `u32::MAX`.
    pub fn next(self) -> Option<Order> {
        self.0.checked_add(1).map(Order)
    }
}

impl From<u32> for Order {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One equality constraint of a scope: a parent field and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeField {
    pub name: &'static str,
    pub value: uuid::Uuid,
}

/// The parent field values that partition siblings into independent sequences.
///
/// Two entities are siblings when their scopes are equal field by field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OrderScope {
    fields: Vec<ScopeField>,
}

impl OrderScope {
    /// Scope over a single parent field.
    pub fn new(name: &'static str, value: impl Into<uuid::Uuid>) -> Self {
        Self {
            fields: vec![ScopeField {
                name,
                value: value.into(),
            }],
        }
    }

    /// Adds another parent field to the scope.
    pub fn and(mut self, name: &'static str, value: impl Into<uuid::Uuid>) -> Self {
        self.fields.push(ScopeField {
            name,
            value: value.into(),
        });
        self
    }

    pub fn fields(&self) -> &[ScopeField] {
        &self.fields
    }
}

impl fmt::Display for OrderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", field.name, field.value)?;
        }
        Ok(())
    }
}

/// An entity whose order is scoped to parent fields.
pub trait Sequenced {
    /// The scope this entity is ordered within.
    fn order_scope(&self) -> OrderScope;
}

/// A stored entity with its assigned order.
pub trait Ordered: Sequenced {
    fn order(&self) -> Order;
}

/// An entity about to be created, possibly carrying an explicit order.
pub trait Placeable: Sequenced {
    /// Explicitly requested order, if any. `Some(Order::FIRST)` counts as explicit.
    fn requested_order(&self) -> Option<Order>;
}

/// Datastore query used by the assigner: the highest order within a scope.
pub trait SiblingOrders {
    /// Maximum order among entities in `scope`, or `None` when there are none.
    fn max_order(&self, scope: &OrderScope) -> Option<Order>;
}

impl<T: Ordered> SiblingOrders for [T] {
    fn max_order(&self, scope: &OrderScope) -> Option<Order> {
        max_within(self.iter(), scope)
    }
}

impl<T: Ordered> SiblingOrders for Vec<T> {
    fn max_order(&self, scope: &OrderScope) -> Option<Order> {
        max_within(self.iter(), scope)
    }
}

impl<K, T: Ordered> SiblingOrders for HashMap<K, T> {
    fn max_order(&self, scope: &OrderScope) -> Option<Order> {
        max_within(self.values(), scope)
    }
}

fn max_within<'a, T: Ordered + 'a>(
    entities: impl Iterator<Item = &'a T>,
    scope: &OrderScope,
) -> Option<Order> {
    entities
        .filter(|entity| entity.order_scope() == *scope)
        .map(Ordered::order)
        .max()
}

/// The highest order in a scope is taken, so no later position exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No order left after {last} in scope {scope}")]
pub struct OrderOverflow {
    pub scope: OrderScope,
    pub last: Order,
}

/// Order for a new entity in `scope`.
///
/// An explicit order is returned unchanged. Otherwise the result is
/// [`Order::FIRST`] for an empty scope and one past the sibling maximum
/// otherwise.
///
/// # Errors
/// - `OrderOverflow` - A sibling already holds `u32::MAX`
pub fn assign_order<S: SiblingOrders + ?Sized>(
    siblings: &S,
    scope: &OrderScope,
    explicit: Option<Order>,
) -> Result<Order, OrderOverflow> {
    if let Some(order) = explicit {
        tracing::trace!(%scope, %order, "Keeping explicit order");
        return Ok(order);
    }

    let order = match siblings.max_order(scope) {
        Some(last) => last.next().ok_or_else(|| OrderOverflow {
            scope: scope.clone(),
            last,
        })?,
        None => Order::FIRST,
    };
    tracing::debug!(%scope, %order, "Assigned next order in scope");
    Ok(order)
}

/// Order for a pending entity, honoring its requested order.
///
/// # Errors
/// - `OrderOverflow` - No automatic order is left in the pending entity's scope
pub fn order_for<S, P>(siblings: &S, pending: &P) -> Result<Order, OrderOverflow>
where
    S: SiblingOrders + ?Sized,
    P: Placeable + ?Sized,
{
    assign_order(siblings, &pending.order_scope(), pending.requested_order())
}
