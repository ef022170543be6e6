//! Entities and relation slots.
//!
//! The engine treats entities abstractly: an entity is anything that exposes
//! its class name, its identifier and an accessor table over its relation
//! fields. Accessor tables stand in for runtime reflection; a derive macro or
//! hand-written impl provides them per domain type.
//!
//! Relation slots are classified by `RelationValue`, the closed set the
//! detach/attach engine switches over. Value-typed attributes are not exposed
//! through the accessor table and are therefore invisible to the engine.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collection::{CollectionRef, PlainCollection};
use crate::proxy::ProxyRef;
use crate::value::Value;

/// Shared handle to a type-erased entity. Identity is pointer identity.
pub type EntityRef = Rc<RefCell<dyn Entity>>;

/// A persistent domain object, as seen by the engine.
///
/// `relations()` lists relation fields in declared order; walks over an
/// entity are deterministic given a fixed table. `relation`/`set_relation`
/// return `None`/`false` for unknown fields so callers can surface a
/// structural error without panicking.
pub trait Entity: Any + fmt::Debug {
    /// Entity class name, as registered with the session factory.
    fn entity_name(&self) -> &'static str;

    /// Identifier value of this instance.
    fn identifier(&self) -> Value;

    /// Relation field names in declared order.
    fn relations(&self) -> &'static [&'static str];

    /// Current value of the named relation field.
    fn relation(&self, property: &str) -> Option<RelationValue>;

    /// Assign the named relation field. Returns `false` for unknown fields.
    ///
    /// Runs through the owner's own accessor, so any interception the owner
    /// performs on normal assignment happens here too.
    fn set_relation(&mut self, property: &str, value: RelationValue) -> bool;

    /// Up-cast for downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable up-cast for downcasting to the concrete type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Value of a relation field.
#[derive(Debug, Clone, Default)]
pub enum RelationValue {
    /// Nothing assigned.
    #[default]
    Null,
    /// A plain loaded entity.
    Entity(EntityRef),
    /// A lazy scalar stand-in, initialized or not.
    Proxy(ProxyRef),
    /// A session-aware collection handle, initialized or not.
    Collection(CollectionRef),
    /// A plain container never tied to a session.
    Plain(PlainCollection),
}

impl RelationValue {
    /// Whether nothing is assigned.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, RelationValue::Null)
    }

    /// The contained entity, if this is a loaded entity slot.
    #[must_use]
    pub fn as_entity(&self) -> Option<&EntityRef> {
        match self {
            RelationValue::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// The contained proxy, if any.
    #[must_use]
    pub fn as_proxy(&self) -> Option<&ProxyRef> {
        match self {
            RelationValue::Proxy(proxy) => Some(proxy),
            _ => None,
        }
    }

    /// The contained persistent collection handle, if any.
    #[must_use]
    pub fn as_collection(&self) -> Option<&CollectionRef> {
        match self {
            RelationValue::Collection(collection) => Some(collection),
            _ => None,
        }
    }

    /// The contained plain container, if any.
    #[must_use]
    pub fn as_plain(&self) -> Option<&PlainCollection> {
        match self {
            RelationValue::Plain(plain) => Some(plain),
            _ => None,
        }
    }

    /// Short label for diagnostics.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            RelationValue::Null => "null",
            RelationValue::Entity(_) => "entity",
            RelationValue::Proxy(_) => "proxy",
            RelationValue::Collection(_) => "persistent collection",
            RelationValue::Plain(_) => "plain collection",
        }
    }
}
