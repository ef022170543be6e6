//! Entity-graph detacher.
//!
//! Walks a live graph and strips everything that ties it to a session:
//! uninitialized proxies and collection handles become [`DetachedProperty`]
//! records on the model's callback, initialized proxies are unwrapped in
//! place, and initialized persistent collections are replaced by plain
//! containers holding the same element references. What remains is plain
//! data plus the records to rebuild the stripped relations later.

use lazymodel_core::{
    CollectionKind, CollectionRef, EntityRef, Error, ProxyRef, RelationValue, Result,
};

use crate::callback::ModelCallback;
use crate::helper;
use crate::property::{CollectionProperty, DetachedProperty, ScalarProperty};
use crate::seen::Seen;

/// One-shot graph walker recording stripped relations on a callback.
pub struct Detacher<'a> {
    callback: &'a mut ModelCallback,
}

impl<'a> Detacher<'a> {
    /// Detacher recording onto `callback`.
    pub fn new(callback: &'a mut ModelCallback) -> Self {
        Self { callback }
    }

    /// Strip every lazy reference reachable from `root`.
    ///
    /// Field-level failures are logged and skipped; the pass aborts only on
    /// state errors (a proxy whose identifier cannot be read without
    /// initialization indicates an inconsistent collaborator).
    pub fn detach(&mut self, root: &EntityRef) -> Result<()> {
        let mut seen = Seen::new();
        self.walk(root, &mut seen)
    }

    fn walk(&mut self, entity: &EntityRef, seen: &mut Seen) -> Result<()> {
        if seen.contains(entity) {
            return Ok(());
        }
        seen.add(entity);

        let (entity_name, relations) = {
            let guard = entity.borrow();
            (guard.entity_name(), guard.relations())
        };
        tracing::debug!(target: "lazymodel::detach", entity = entity_name, "walking entity");

        for &property in relations {
            if let Err(error) = self.detach_field(entity, entity_name, property, seen) {
                if matches!(error, Error::Structure(_)) {
                    tracing::error!(
                        target: "lazymodel::detach",
                        entity = entity_name,
                        property,
                        error = %error,
                        "skipping field"
                    );
                } else {
                    return Err(error);
                }
            }
        }

        seen.remove(entity);
        Ok(())
    }

    fn detach_field(
        &mut self,
        entity: &EntityRef,
        entity_name: &str,
        property: &'static str,
        seen: &mut Seen,
    ) -> Result<()> {
        match helper::read(entity, property)? {
            RelationValue::Null => Ok(()),
            RelationValue::Proxy(proxy) => self.detach_proxy(entity, property, &proxy, seen),
            RelationValue::Entity(target) => self.walk(&target, seen),
            RelationValue::Collection(collection) => {
                if collection.was_initialized() {
                    self.replace_with_plain(entity, property, &collection, seen)
                } else {
                    self.record_collection(entity, entity_name, property, &collection)
                }
            }
            RelationValue::Plain(plain) => {
                for element in plain.elements() {
                    self.walk(&element, seen)?;
                }
                Ok(())
            }
        }
    }

    /// An uninitialized proxy is recorded and nulled; an initialized one is
    /// unwrapped in place so no proxy object survives the pass.
    fn detach_proxy(
        &mut self,
        entity: &EntityRef,
        property: &'static str,
        proxy: &ProxyRef,
        seen: &mut Seen,
    ) -> Result<()> {
        let initializer = proxy.initializer();
        if let Some(target) = initializer.implementation() {
            helper::write(entity, property, RelationValue::Entity(target.clone()))?;
            return self.walk(&target, seen);
        }

        let id = initializer.identifier();
        if id.is_null() {
            return Err(Error::unreadable_proxy(initializer.entity_name(), property));
        }

        self.callback.record(
            entity,
            DetachedProperty::Scalar(ScalarProperty {
                property: property.to_owned(),
                entity_name: initializer.entity_name().to_owned(),
                id,
            }),
        );
        helper::write(entity, property, RelationValue::Null)
    }

    fn record_collection(
        &mut self,
        entity: &EntityRef,
        entity_name: &str,
        property: &'static str,
        collection: &CollectionRef,
    ) -> Result<()> {
        let Some(role) = collection.role() else {
            return Err(Error::unclassifiable_collection(entity_name, property));
        };
        let kind = CollectionKind::classify(collection);

        self.callback.record(
            entity,
            DetachedProperty::Collection(CollectionProperty {
                property: property.to_owned(),
                role,
                kind,
            }),
        );
        helper::write(entity, property, RelationValue::Null)
    }

    /// Swap an initialized persistent collection for a plain container of the
    /// matching shape, then descend into its elements.
    fn replace_with_plain(
        &mut self,
        entity: &EntityRef,
        property: &'static str,
        collection: &CollectionRef,
        seen: &mut Seen,
    ) -> Result<()> {
        let plain = collection.plain_copy();
        helper::write(entity, property, RelationValue::Plain(plain.clone()))?;
        for element in plain.elements() {
            self.walk(&element, seen)?;
        }
        Ok(())
    }
}
