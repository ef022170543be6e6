//! Error types for lazymodel.
//!
//! Three categories, matching how failures propagate:
//!
//! - **Structure**: the metadata catalog and an entity disagree (missing
//!   field, missing persister, unclassifiable collection). Best-effort
//!   callers log these and continue with the next field.
//! - **State**: a collaborator object is in a state the engine cannot work
//!   with, e.g. a proxy whose identifier cannot be read without forcing
//!   initialization. Fatal for the current pass.
//! - **Session**: no live session is available for a required entity class.
//!   Fatal; surfaced to the caller of the model.

use std::fmt;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Catalog/entity mismatch; recoverable per field.
    Structure(StructureError),
    /// Collaborator object in an unusable state; fatal for the pass.
    State(StateError),
    /// No session available; fatal.
    Session(SessionError),
}

/// Kind of structural failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureErrorKind {
    /// The owner's accessor table has no such field.
    MissingField,
    /// No entity or collection persister registered under the name/role.
    MissingPersister,
    /// No class metadata registered for the entity.
    MissingMetadata,
    /// A persistent collection whose shape cannot be determined.
    UnclassifiableCollection,
}

/// Catalog/entity mismatch detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureError {
    /// What went wrong.
    pub kind: StructureErrorKind,
    /// Entity class, collection role or field the failure concerns.
    pub subject: String,
    /// Human-readable detail.
    pub detail: String,
}

/// Kind of state failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateErrorKind {
    /// A proxy's identifier is unavailable without initialization.
    UnreadableProxy,
}

/// Collaborator-state failure detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateError {
    /// What went wrong.
    pub kind: StateErrorKind,
    /// Human-readable detail.
    pub detail: String,
}

/// Missing-session failure detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionError {
    /// Entity class a session was required for.
    pub entity: String,
    /// Human-readable detail.
    pub detail: String,
}

impl Error {
    /// The owner's accessor table has no field named `property`.
    #[must_use]
    pub fn missing_field(entity: &str, property: &str) -> Self {
        Error::Structure(StructureError {
            kind: StructureErrorKind::MissingField,
            subject: format!("{entity}.{property}"),
            detail: format!("entity {entity} declares no field {property}"),
        })
    }

    /// No persister registered under `name` (an entity class or a role).
    #[must_use]
    pub fn missing_persister(name: &str) -> Self {
        Error::Structure(StructureError {
            kind: StructureErrorKind::MissingPersister,
            subject: name.to_owned(),
            detail: format!("no persister registered for {name}"),
        })
    }

    /// No class metadata registered for `entity`.
    #[must_use]
    pub fn missing_metadata(entity: &str) -> Self {
        Error::Structure(StructureError {
            kind: StructureErrorKind::MissingMetadata,
            subject: entity.to_owned(),
            detail: format!("no class metadata registered for {entity}"),
        })
    }

    /// A persistent collection in `field` carries no role to reattach under.
    #[must_use]
    pub fn unclassifiable_collection(entity: &str, property: &str) -> Self {
        Error::Structure(StructureError {
            kind: StructureErrorKind::UnclassifiableCollection,
            subject: format!("{entity}.{property}"),
            detail: format!("persistent collection in {entity}.{property} has no role"),
        })
    }

    /// A proxy's identifier cannot be read without forcing initialization.
    #[must_use]
    pub fn unreadable_proxy(entity: &str, property: &str) -> Self {
        Error::State(StateError {
            kind: StateErrorKind::UnreadableProxy,
            detail: format!("proxy for {entity} in field {property} exposes no identifier"),
        })
    }

    /// No live session is available for `entity`.
    #[must_use]
    pub fn no_session(entity: &str) -> Self {
        Error::Session(SessionError {
            entity: entity.to_owned(),
            detail: format!("no session available for entity class {entity}"),
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Structure(e) => write!(f, "structure error ({:?}): {}", e.kind, e.detail),
            Error::State(e) => write!(f, "state error ({:?}): {}", e.kind, e.detail),
            Error::Session(e) => write!(f, "session error: {}", e.detail),
        }
    }
}

impl std::error::Error for Error {}
