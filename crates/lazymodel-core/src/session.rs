//! Sessions, the session factory and its catalogs.
//!
//! A `Session` is the request-scoped handle the attach side works against: it
//! owns a `PersistenceContext` and shares a `SessionFactory` holding the
//! persister and metadata catalogs. The engine never opens sessions itself;
//! an injected `SessionFinder` locates one per entity class.
//!
//! # Design Philosophy
//!
//! - **Borrowed, never owned**: the engine holds sessions only for the
//!   duration of one attach call.
//! - **Traits at the seams**: persisters and the finder are trait objects so
//!   any persistence tier can plug in.
//! - **No global state**: the finder is injected, not looked up.

use std::cell::{Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::collection::CollectionKind;
use crate::context::PersistenceContext;
use crate::entity::EntityRef;
use crate::error::{Error, Result};
use crate::proxy::ProxyRef;
use crate::value::Value;

/// Shared handle to a live session.
pub type SessionHandle = Rc<Session>;

/// Locates a live session for a persistent entity class.
///
/// Failure is fatal for the operation that needed the session.
pub trait SessionFinder {
    /// A live session able to serve `entity_name`.
    fn find(&self, entity_name: &str) -> Result<SessionHandle>;
}

/// A live, request-scoped persistence session.
#[derive(Debug)]
pub struct Session {
    factory: Rc<SessionFactory>,
    context: RefCell<PersistenceContext>,
}

impl Session {
    /// Open a session over the given factory with an empty context.
    #[must_use]
    pub fn open(factory: Rc<SessionFactory>) -> SessionHandle {
        Rc::new(Self {
            factory,
            context: RefCell::new(PersistenceContext::default()),
        })
    }

    /// The factory backing this session.
    #[must_use]
    pub fn factory(&self) -> &SessionFactory {
        &self.factory
    }

    /// Shared view of the persistence context.
    #[must_use]
    pub fn context(&self) -> Ref<'_, PersistenceContext> {
        self.context.borrow()
    }

    /// Exclusive view of the persistence context.
    #[must_use]
    pub fn context_mut(&self) -> RefMut<'_, PersistenceContext> {
        self.context.borrow_mut()
    }
}

// ============================================================================
// Persisters and metadata
// ============================================================================

/// Mints proxies for one entity class.
pub trait EntityPersister {
    /// Entity class this persister serves.
    fn entity_name(&self) -> &str;

    /// Mint an uninitialized proxy for `(entity_name, id)` bound to `session`.
    fn create_proxy(&self, id: Value, session: &SessionHandle) -> ProxyRef;
}

/// Describes one to-many association.
pub trait CollectionPersister {
    /// Fully qualified association name.
    fn role(&self) -> &str;

    /// Shape of the association.
    fn kind(&self) -> CollectionKind;
}

/// Per-class metadata exposed by the factory.
#[derive(Debug, Clone)]
pub struct ClassMetadata {
    entity_name: String,
}

impl ClassMetadata {
    /// Metadata for the named entity class.
    #[must_use]
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
        }
    }

    /// Entity class this metadata describes.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Identifier of `owner`, read through its accessor table.
    #[must_use]
    pub fn identifier_of(&self, owner: &EntityRef) -> Value {
        owner.borrow().identifier()
    }
}

// ============================================================================
// Session factory
// ============================================================================

/// Catalogs shared by every session of one persistence tier: entity
/// persisters by class name, collection persisters by role, class metadata
/// by class name.
#[derive(Default)]
pub struct SessionFactory {
    entity_persisters: HashMap<String, Rc<dyn EntityPersister>>,
    collection_persisters: HashMap<String, Rc<dyn CollectionPersister>>,
    metadata: HashMap<String, Rc<ClassMetadata>>,
}

impl SessionFactory {
    /// Empty factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity persister under its class name.
    pub fn register_entity_persister(&mut self, persister: Rc<dyn EntityPersister>) {
        tracing::debug!(
            target: "lazymodel::session",
            entity = persister.entity_name(),
            "registering entity persister"
        );
        self.entity_persisters
            .insert(persister.entity_name().to_owned(), persister);
    }

    /// Register a collection persister under its role.
    pub fn register_collection_persister(&mut self, persister: Rc<dyn CollectionPersister>) {
        tracing::debug!(
            target: "lazymodel::session",
            role = persister.role(),
            shape = persister.kind().shape_name(),
            "registering collection persister"
        );
        self.collection_persisters
            .insert(persister.role().to_owned(), persister);
    }

    /// Register class metadata under its entity name.
    pub fn register_metadata(&mut self, metadata: ClassMetadata) {
        self.metadata
            .insert(metadata.entity_name().to_owned(), Rc::new(metadata));
    }

    /// The entity persister for `entity_name`.
    pub fn entity_persister(&self, entity_name: &str) -> Result<Rc<dyn EntityPersister>> {
        self.entity_persisters
            .get(entity_name)
            .cloned()
            .ok_or_else(|| Error::missing_persister(entity_name))
    }

    /// The collection persister for `role`.
    pub fn collection_persister(&self, role: &str) -> Result<Rc<dyn CollectionPersister>> {
        self.collection_persisters
            .get(role)
            .cloned()
            .ok_or_else(|| Error::missing_persister(role))
    }

    /// The class metadata for `entity_name`.
    pub fn class_metadata(&self, entity_name: &str) -> Result<Rc<ClassMetadata>> {
        self.metadata
            .get(entity_name)
            .cloned()
            .ok_or_else(|| Error::missing_metadata(entity_name))
    }
}

impl fmt::Debug for SessionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionFactory")
            .field("entity_persisters", &self.entity_persisters.len())
            .field("collection_persisters", &self.collection_persisters.len())
            .field("metadata", &self.metadata.len())
            .finish()
    }
}
