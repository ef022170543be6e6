//! Detachable view-side models for lazy ORM entity graphs.
//!
//! A view tier that survives stateless request/response cycles cannot keep a
//! live persistence session — or the uninitialized lazy references bound to
//! it — alive between requests. `lazymodel` wraps a persistent entity (or a
//! list of them) in a model that:
//!
//! - **detaches** before serialization: every uninitialized proxy or
//!   persistent collection handle reachable from the root is replaced by a
//!   compact serializable record, and session-bound state is stripped;
//! - **attaches** on first access of the next request: each record is turned
//!   back into a proxy or an uninitialized collection handle against a fresh
//!   session, so lazy loading resumes transparently.
//!
//! # Example
//!
//! ```ignore
//! let mut model = Model::new(finder.clone(), hero);
//!
//! // End of request: strip lazy references, then serialize the view state.
//! model.detach()?;
//!
//! // Next request: first access re-binds against a fresh session.
//! let hero = model.get()?.expect("root present");
//! ```
//!
//! The engine lives in `lazymodel-detach`, the collaborator contracts in
//! `lazymodel-core`; this crate adds the `Model`/`ListModel` adapters and
//! re-exports the full surface.

pub mod list_model;
pub mod model;

pub use list_model::ListModel;
pub use model::Model;

pub use lazymodel_core::{
    BatchFetchQueue, ClassMetadata, CollectionKey, CollectionKind, CollectionPersister,
    CollectionRef, CollectionSnapshot, ContextDebugInfo, Element, Entity, EntityKey,
    EntityPersister, EntityRef, Error, LazyInitializer, PersistenceContext, PersistentCollection,
    PlainCollection, Proxy, ProxyRef, RelationValue, Result, Session, SessionError,
    SessionFactory, SessionFinder, SessionHandle, StateError, StateErrorKind, StructureError,
    StructureErrorKind, Value,
};
pub use lazymodel_detach::{
    helper, Attacher, CollectionProperty, DetachedProperty, Detacher, ModelCallback,
    ScalarProperty, Seen,
};

/// Common imports for applications using lazymodel.
pub mod prelude {
    pub use crate::{
        Attacher, ClassMetadata, CollectionKey, CollectionKind, CollectionPersister,
        CollectionProperty, CollectionRef, DetachedProperty, Detacher, Entity, EntityKey,
        EntityPersister, EntityRef, Error, ListModel, Model, ModelCallback, PersistentCollection,
        PlainCollection, Proxy, ProxyRef, RelationValue, Result, ScalarProperty, Session,
        SessionFactory, SessionFinder, SessionHandle, Value,
    };
}
