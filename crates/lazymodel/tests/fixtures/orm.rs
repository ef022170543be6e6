//! Mock persistence collaborators for integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use lazymodel::prelude::*;

use super::entities::{HERO_POWERS, HERO_TROPHIES, TEAM_HEROES};

/// Entity persister minting plain uninitialized proxies.
pub struct MockEntityPersister {
    entity_name: &'static str,
}

impl MockEntityPersister {
    pub fn new(entity_name: &'static str) -> Rc<Self> {
        Rc::new(Self { entity_name })
    }
}

impl EntityPersister for MockEntityPersister {
    fn entity_name(&self) -> &str {
        self.entity_name
    }

    fn create_proxy(&self, id: Value, session: &SessionHandle) -> ProxyRef {
        Proxy::uninitialized(self.entity_name, id, session)
    }
}

/// Collection persister describing one association of the test domain.
pub struct MockCollectionPersister {
    role: &'static str,
    kind: CollectionKind,
}

impl MockCollectionPersister {
    pub fn new(role: &'static str, kind: CollectionKind) -> Rc<Self> {
        Rc::new(Self { role, kind })
    }
}

impl CollectionPersister for MockCollectionPersister {
    fn role(&self) -> &str {
        self.role
    }

    fn kind(&self) -> CollectionKind {
        self.kind
    }
}

/// Factory over the full test domain.
pub fn test_factory() -> Rc<SessionFactory> {
    let mut factory = SessionFactory::new();
    for entity in ["Hero", "Team", "Power"] {
        factory.register_entity_persister(MockEntityPersister::new(entity));
        factory.register_metadata(ClassMetadata::new(entity));
    }
    factory.register_collection_persister(MockCollectionPersister::new(
        TEAM_HEROES,
        CollectionKind::Bag,
    ));
    factory.register_collection_persister(MockCollectionPersister::new(
        HERO_POWERS,
        CollectionKind::Set,
    ));
    factory.register_collection_persister(MockCollectionPersister::new(
        HERO_TROPHIES,
        CollectionKind::SortedSet,
    ));
    Rc::new(factory)
}

/// Finder handing out one current session, renewable between "requests".
pub struct RenewableSessionFinder {
    factory: Rc<SessionFactory>,
    current: RefCell<SessionHandle>,
}

impl RenewableSessionFinder {
    pub fn new() -> Rc<Self> {
        let factory = test_factory();
        let current = RefCell::new(Session::open(factory.clone()));
        Rc::new(Self { factory, current })
    }

    /// The session serving the current "request".
    pub fn current(&self) -> SessionHandle {
        self.current.borrow().clone()
    }

    /// Simulate a request boundary: discard the session, open a fresh one.
    pub fn renew(&self) -> SessionHandle {
        let session = Session::open(self.factory.clone());
        *self.current.borrow_mut() = session.clone();
        session
    }
}

impl SessionFinder for RenewableSessionFinder {
    fn find(&self, _entity_name: &str) -> Result<SessionHandle> {
        Ok(self.current())
    }
}

/// Finder with no sessions to hand out.
pub struct NoSessionFinder;

impl SessionFinder for NoSessionFinder {
    fn find(&self, entity_name: &str) -> Result<SessionHandle> {
        Err(Error::no_session(entity_name))
    }
}
