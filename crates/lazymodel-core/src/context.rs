//! The per-session persistence context.
//!
//! An identity map over managed entities plus registries of proxies and
//! collections, keyed by `EntityKey` and `CollectionKey`. The attach side
//! consults it before minting anything, which is what makes attach idempotent
//! per `(session, key)` and unifies identity within one session.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::collection::CollectionRef;
use crate::entity::EntityRef;
use crate::proxy::ProxyRef;
use crate::session::CollectionPersister;
use crate::value::Value;

// ============================================================================
// Keys
// ============================================================================

/// Identity of a managed entity or proxy: `(class, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    /// Entity class name.
    pub entity_name: String,
    /// Identifier value.
    pub id: Value,
}

impl EntityKey {
    /// Key for `(entity_name, id)`.
    #[must_use]
    pub fn new(entity_name: impl Into<String>, id: Value) -> Self {
        Self {
            entity_name: entity_name.into(),
            id,
        }
    }
}

/// Identity of a collection: `(role, owner id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollectionKey {
    /// Fully qualified association name.
    pub role: String,
    /// Identifier of the owning entity.
    pub owner_id: Value,
}

impl CollectionKey {
    /// Key for `(role, owner_id)`.
    #[must_use]
    pub fn new(role: impl Into<String>, owner_id: Value) -> Self {
        Self {
            role: role.into(),
            owner_id,
        }
    }
}

// ============================================================================
// Batch fetch queue
// ============================================================================

/// Entity keys queued for batch loading.
#[derive(Debug, Default)]
pub struct BatchFetchQueue {
    batch_loadable: HashSet<EntityKey>,
}

impl BatchFetchQueue {
    /// Queue a key for batch loading. Duplicates collapse.
    pub fn add_batch_loadable(&mut self, key: EntityKey) {
        self.batch_loadable.insert(key);
    }

    /// Whether `key` is queued.
    #[must_use]
    pub fn contains(&self, key: &EntityKey) -> bool {
        self.batch_loadable.contains(key)
    }

    /// Number of queued keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.batch_loadable.len()
    }

    /// Whether the queue is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch_loadable.is_empty()
    }
}

// ============================================================================
// Persistence context
// ============================================================================

#[derive(Debug)]
struct DetachedCollectionEntry {
    role: String,
    collection: CollectionRef,
}

/// Per-session identity map plus proxy and collection registries.
#[derive(Debug, Default)]
pub struct PersistenceContext {
    entities_by_key: HashMap<EntityKey, EntityRef>,
    proxies_by_key: HashMap<EntityKey, ProxyRef>,
    collections_by_key: HashMap<CollectionKey, CollectionRef>,
    unowned_collections: HashMap<CollectionKey, CollectionRef>,
    detached_collections: Vec<DetachedCollectionEntry>,
    batch_fetch_queue: BatchFetchQueue,
}

impl PersistenceContext {
    /// The managed entity under `key`, if any.
    #[must_use]
    pub fn get_entity(&self, key: &EntityKey) -> Option<EntityRef> {
        self.entities_by_key.get(key).cloned()
    }

    /// Track a managed entity under `key`.
    pub fn add_entity(&mut self, key: EntityKey, entity: EntityRef) {
        self.entities_by_key.insert(key, entity);
    }

    /// The registered proxy under `key`, if any.
    #[must_use]
    pub fn get_proxy(&self, key: &EntityKey) -> Option<ProxyRef> {
        self.proxies_by_key.get(key).cloned()
    }

    /// Register a proxy under `key`.
    pub fn add_proxy(&mut self, key: EntityKey, proxy: ProxyRef) {
        self.proxies_by_key.insert(key, proxy);
    }

    /// The collection registered under `key`, owned or unowned.
    #[must_use]
    pub fn get_collection(&self, key: &CollectionKey) -> Option<CollectionRef> {
        self.collections_by_key
            .get(key)
            .or_else(|| self.unowned_collections.get(key))
            .cloned()
    }

    /// Register a loaded collection under `key`.
    pub fn add_collection(&mut self, key: CollectionKey, collection: CollectionRef) {
        self.collections_by_key.insert(key, collection);
    }

    /// Track an uninitialized detached collection under its persister's role.
    pub fn add_uninitialized_detached_collection(
        &mut self,
        persister: &dyn CollectionPersister,
        collection: CollectionRef,
    ) {
        self.detached_collections.push(DetachedCollectionEntry {
            role: persister.role().to_owned(),
            collection,
        });
    }

    /// Register a collection no owner has claimed yet.
    pub fn add_unowned_collection(&mut self, key: CollectionKey, collection: CollectionRef) {
        self.unowned_collections.insert(key, collection);
    }

    /// The batch-fetch queue.
    #[must_use]
    pub fn batch_fetch_queue(&self) -> &BatchFetchQueue {
        &self.batch_fetch_queue
    }

    /// Mutable batch-fetch queue.
    #[must_use]
    pub fn batch_fetch_queue_mut(&mut self) -> &mut BatchFetchQueue {
        &mut self.batch_fetch_queue
    }

    /// Uninitialized detached collections tracked for `role`.
    #[must_use]
    pub fn detached_collections_of(&self, role: &str) -> Vec<CollectionRef> {
        self.detached_collections
            .iter()
            .filter(|entry| entry.role == role)
            .map(|entry| entry.collection.clone())
            .collect()
    }

    /// Dump registry sizes for debugging.
    #[must_use]
    pub fn debug_state(&self) -> ContextDebugInfo {
        ContextDebugInfo {
            entities: self.entities_by_key.len(),
            proxies: self.proxies_by_key.len(),
            collections: self.collections_by_key.len() + self.unowned_collections.len(),
            detached_collections: self.detached_collections.len(),
            batch_loadable: self.batch_fetch_queue.len(),
        }
    }
}

/// Debug information about context registries.
#[derive(Debug, Clone)]
pub struct ContextDebugInfo {
    /// Managed entities.
    pub entities: usize,
    /// Registered proxies.
    pub proxies: usize,
    /// Registered collections, owned and unowned.
    pub collections: usize,
    /// Uninitialized detached collection entries.
    pub detached_collections: usize,
    /// Keys queued for batch loading.
    pub batch_loadable: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::CollectionKind;
    use crate::session::{Session, SessionFactory};
    use crate::testutil::stub;
    use std::rc::Rc;

    struct BagPersister;

    impl CollectionPersister for BagPersister {
        fn role(&self) -> &str {
            "Stub.items"
        }

        fn kind(&self) -> CollectionKind {
            CollectionKind::Bag
        }
    }

    #[test]
    fn test_entity_registry_round_trip() {
        let mut context = PersistenceContext::default();
        let key = EntityKey::new("Stub", Value::Int(1));
        assert!(context.get_entity(&key).is_none());

        let entity = stub(1);
        context.add_entity(key.clone(), entity.clone());
        let found = context.get_entity(&key).unwrap();
        assert!(Rc::ptr_eq(&found, &entity));
    }

    #[test]
    fn test_unowned_collection_visible_through_get() {
        let mut context = PersistenceContext::default();
        let session = Session::open(Rc::new(SessionFactory::new()));
        let key = CollectionKey::new("Stub.items", Value::Int(1));
        let collection = CollectionKind::Bag.new_uninitialized(&session);

        context.add_unowned_collection(key.clone(), collection.clone());
        let found = context.get_collection(&key).unwrap();
        assert!(Rc::ptr_eq(&found, &collection));
    }

    #[test]
    fn test_detached_collections_tracked_by_role() {
        let mut context = PersistenceContext::default();
        let session = Session::open(Rc::new(SessionFactory::new()));
        let collection = CollectionKind::Bag.new_uninitialized(&session);

        context.add_uninitialized_detached_collection(&BagPersister, collection.clone());
        let tracked = context.detached_collections_of("Stub.items");
        assert_eq!(tracked.len(), 1);
        assert!(Rc::ptr_eq(&tracked[0], &collection));
        assert!(context.detached_collections_of("Stub.other").is_empty());
    }

    #[test]
    fn test_batch_fetch_queue_collapses_duplicates() {
        let mut queue = BatchFetchQueue::default();
        let key = EntityKey::new("Stub", Value::Int(1));
        queue.add_batch_loadable(key.clone());
        queue.add_batch_loadable(key.clone());
        assert_eq!(queue.len(), 1);
        assert!(queue.contains(&key));
    }

    #[test]
    fn test_collection_keys_are_structural() {
        let a = CollectionKey::new("Stub.items", Value::Int(1));
        let b = CollectionKey::new("Stub.items", Value::Int(1));
        assert_eq!(a, b);
    }
}
