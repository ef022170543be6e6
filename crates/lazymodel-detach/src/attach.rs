//! Detached-relation attacher.
//!
//! The inverse of the detacher: given one [`DetachedProperty`] record and a
//! fresh session located through the injected [`SessionFinder`], it
//! materializes the object that belongs back in the owner's stripped field —
//! a proxy for scalar relations, an uninitialized persistent handle for
//! to-many relations — registering it in the session's persistence context.
//! Attach is idempotent per `(session, key)`.

use lazymodel_core::{
    CollectionKey, EntityKey, EntityRef, RelationValue, Result, SessionFinder,
};

use crate::property::{CollectionProperty, DetachedProperty, ScalarProperty};

/// Re-materializes stripped relations against fresh sessions.
pub struct Attacher<'a> {
    finder: &'a dyn SessionFinder,
}

impl<'a> Attacher<'a> {
    /// Attacher resolving sessions through `finder`.
    pub fn new(finder: &'a dyn SessionFinder) -> Self {
        Self { finder }
    }

    /// Materialize the object that belongs back in `owner`'s stripped field.
    pub fn attach(&self, owner: &EntityRef, record: &DetachedProperty) -> Result<RelationValue> {
        match record {
            DetachedProperty::Scalar(def) => self.attach_scalar(def),
            DetachedProperty::Collection(def) => self.attach_collection(owner, def),
        }
    }

    /// A managed instance under the key wins over any proxy; an existing
    /// proxy wins over a new one. Otherwise mint a proxy, queue it for batch
    /// loading and register it, unifying identity per `(class, id)`.
    fn attach_scalar(&self, def: &ScalarProperty) -> Result<RelationValue> {
        let session = self.finder.find(&def.entity_name)?;
        let persister = session.factory().entity_persister(&def.entity_name)?;
        let key = EntityKey::new(def.entity_name.clone(), def.id.clone());

        if let Some(entity) = session.context().get_entity(&key) {
            return Ok(RelationValue::Entity(entity));
        }
        if let Some(proxy) = session.context().get_proxy(&key) {
            return Ok(RelationValue::Proxy(proxy));
        }

        let proxy = persister.create_proxy(def.id.clone(), &session);
        let mut context = session.context_mut();
        context.batch_fetch_queue_mut().add_batch_loadable(key.clone());
        context.add_proxy(key, proxy.clone());
        tracing::debug!(
            target: "lazymodel::attach",
            entity = %def.entity_name,
            id = %def.id,
            "registered new proxy"
        );
        Ok(RelationValue::Proxy(proxy))
    }

    /// An existing collection under `(role, owner id)` wins. Otherwise mint
    /// an uninitialized handle of the recorded shape, mark it
    /// detached-but-known via a snapshot, and register it as both an
    /// uninitialized detached and an unowned collection.
    fn attach_collection(
        &self,
        owner: &EntityRef,
        def: &CollectionProperty,
    ) -> Result<RelationValue> {
        let owner_name = owner.borrow().entity_name();
        let session = self.finder.find(owner_name)?;
        let persister = session.factory().collection_persister(&def.role)?;
        let metadata = session.factory().class_metadata(owner_name)?;
        let owner_id = metadata.identifier_of(owner);
        let key = CollectionKey::new(def.role.clone(), owner_id.clone());

        if let Some(existing) = session.context().get_collection(&key) {
            return Ok(RelationValue::Collection(existing));
        }

        let collection = def.kind.new_uninitialized(&session);
        collection.set_snapshot(owner_id, &def.role, None);
        let mut context = session.context_mut();
        context.add_uninitialized_detached_collection(persister.as_ref(), collection.clone());
        context.add_unowned_collection(key, collection.clone());
        tracing::debug!(
            target: "lazymodel::attach",
            role = %def.role,
            shape = def.kind.shape_name(),
            "registered uninitialized collection"
        );
        Ok(RelationValue::Collection(collection))
    }
}
