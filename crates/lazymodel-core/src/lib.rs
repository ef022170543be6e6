//! Core contracts and data model for lazymodel.
//!
//! `lazymodel-core` is the **foundation layer** for the workspace. It defines
//! the types a detachable view-side model and its ORM collaborators agree on.
//!
//! # Role In The Architecture
//!
//! - **Contract layer**: `Entity`, `SessionFinder`, `EntityPersister` and
//!   `CollectionPersister` are the seams between the detach/attach engine and
//!   the surrounding persistence tier.
//! - **Data model**: `Value`, `RelationValue`, `Proxy`, `PersistentCollection`
//!   and the `CollectionKind` catalog describe relation slots the way the
//!   engine classifies them.
//! - **Session surface**: `Session`, `SessionFactory` and the
//!   `PersistenceContext` registries mirror what a live persistence session
//!   exposes to code that re-binds detached state.
//!
//! # Who Uses This Crate
//!
//! - `lazymodel-detach` walks `Entity` graphs and talks to sessions through
//!   the contracts defined here.
//! - The `lazymodel` facade exposes `Model`/`ListModel` over these types.
//! - Host applications implement `Entity` for their domain types and
//!   `SessionFinder` for their session scoping.
//!
//! Most applications should use the `lazymodel` facade; reach for
//! `lazymodel-core` directly when wiring a custom persistence collaborator.

pub mod collection;
pub mod context;
pub mod entity;
pub mod error;
pub mod proxy;
pub mod session;
#[cfg(test)]
mod testutil;
pub mod value;

pub use collection::{
    CollectionKind, CollectionRef, CollectionSnapshot, Element, PersistentCollection,
    PlainCollection,
};
pub use context::{BatchFetchQueue, CollectionKey, ContextDebugInfo, EntityKey, PersistenceContext};
pub use entity::{Entity, EntityRef, RelationValue};
pub use error::{
    Error, Result, SessionError, StateError, StateErrorKind, StructureError, StructureErrorKind,
};
pub use proxy::{LazyInitializer, Proxy, ProxyRef};
pub use session::{
    ClassMetadata, CollectionPersister, EntityPersister, Session, SessionFactory, SessionFinder,
    SessionHandle,
};
pub use value::Value;
