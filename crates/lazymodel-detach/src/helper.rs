//! Accessor and proxy helper functions.

use lazymodel_core::{EntityRef, Error, RelationValue, Result};

/// Read `property` from `owner` through its accessor table.
pub fn read(owner: &EntityRef, property: &str) -> Result<RelationValue> {
    let guard = owner.borrow();
    guard
        .relation(property)
        .ok_or_else(|| Error::missing_field(guard.entity_name(), property))
}

/// Write `value` into `owner`'s `property` through its accessor table, so
/// owner-side interception runs as it would on a normal assignment.
pub fn write(owner: &EntityRef, property: &str, value: RelationValue) -> Result<()> {
    let mut guard = owner.borrow_mut();
    if guard.set_relation(property, value) {
        Ok(())
    } else {
        Err(Error::missing_field(guard.entity_name(), property))
    }
}

/// Unwrap an initialized proxy to its underlying entity; anything else passes
/// through unchanged. Never forces initialization of an uninitialized proxy.
#[must_use]
pub fn unwrap(value: RelationValue) -> RelationValue {
    match value {
        RelationValue::Proxy(proxy) => match proxy.initializer().implementation() {
            Some(entity) => RelationValue::Entity(entity),
            None => RelationValue::Proxy(proxy),
        },
        other => other,
    }
}
