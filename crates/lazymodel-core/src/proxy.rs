//! Lazy scalar references.
//!
//! A `Proxy` stands in for an entity whose state has not been loaded. Its
//! `LazyInitializer` knows the target class and identifier without touching
//! the database; the resolved entity appears only once a collaborator loads
//! it. Reading the class or identifier never forces initialization.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::entity::EntityRef;
use crate::session::{Session, SessionHandle};
use crate::value::Value;

/// Shared handle to a proxy.
pub type ProxyRef = Rc<Proxy>;

/// Stand-in for a not-yet-loaded entity.
#[derive(Debug)]
pub struct Proxy {
    initializer: LazyInitializer,
}

impl Proxy {
    /// Mint an uninitialized proxy for `(entity_name, id)` bound to `session`.
    #[must_use]
    pub fn uninitialized(
        entity_name: impl Into<String>,
        id: Value,
        session: &SessionHandle,
    ) -> ProxyRef {
        Rc::new(Self {
            initializer: LazyInitializer::new(entity_name, id, Rc::downgrade(session)),
        })
    }

    /// The initializer carrying this proxy's lazy state.
    #[must_use]
    pub fn initializer(&self) -> &LazyInitializer {
        &self.initializer
    }
}

/// Lazy state of a proxy: target class, identifier, optional resolved entity
/// and the session the proxy is bound to.
#[derive(Debug)]
pub struct LazyInitializer {
    entity_name: String,
    id: Value,
    target: RefCell<Option<EntityRef>>,
    session: RefCell<Weak<Session>>,
}

impl LazyInitializer {
    fn new(entity_name: impl Into<String>, id: Value, session: Weak<Session>) -> Self {
        Self {
            entity_name: entity_name.into(),
            id,
            target: RefCell::new(None),
            session: RefCell::new(session),
        }
    }

    /// Target entity class. Never forces initialization.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Target identifier. Never forces initialization.
    #[must_use]
    pub fn identifier(&self) -> Value {
        self.id.clone()
    }

    /// Whether the underlying entity has not been resolved yet.
    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        self.target.borrow().is_none()
    }

    /// The resolved entity, when present.
    #[must_use]
    pub fn implementation(&self) -> Option<EntityRef> {
        self.target.borrow().clone()
    }

    /// Install the resolved entity, marking the proxy initialized.
    pub fn set_implementation(&self, entity: EntityRef) {
        *self.target.borrow_mut() = Some(entity);
    }

    /// The session this proxy is bound to, if still alive.
    #[must_use]
    pub fn session(&self) -> Option<SessionHandle> {
        self.session.borrow().upgrade()
    }

    /// Re-bind the proxy to another live session.
    pub fn bind_session(&self, session: &SessionHandle) {
        *self.session.borrow_mut() = Rc::downgrade(session);
    }
}
