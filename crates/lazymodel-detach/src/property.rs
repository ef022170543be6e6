//! Detached-property records.
//!
//! A record is everything needed to rebuild one stripped relation in a future
//! session: the owner's field name plus identity material. Records hold no
//! live references to sessions, proxies, persisters or collection handles, so
//! they serialize with the host's serializer as plain data. The owning entity
//! is carried by the [`crate::ModelCallback`] entry holding the record.

use serde::{Deserialize, Serialize};

use lazymodel_core::{CollectionKind, Value};

/// Serializable description of a relation stripped off an owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DetachedProperty {
    /// A stripped scalar lazy reference.
    Scalar(ScalarProperty),
    /// A stripped to-many lazy reference.
    Collection(CollectionProperty),
}

impl DetachedProperty {
    /// The owner field the relation was stripped from.
    #[must_use]
    pub fn property(&self) -> &str {
        match self {
            DetachedProperty::Scalar(def) => &def.property,
            DetachedProperty::Collection(def) => &def.property,
        }
    }
}

/// Identity of a stripped scalar relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalarProperty {
    /// Owner field the proxy was stripped from.
    pub property: String,
    /// Declared relation class, not a subtype.
    pub entity_name: String,
    /// Target identifier. Never `Value::Null`.
    pub id: Value,
}

/// Identity of a stripped to-many relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionProperty {
    /// Owner field the handle was stripped from.
    pub property: String,
    /// Fully qualified association name understood by the collection catalog.
    pub role: String,
    /// Shape to rebuild the handle with.
    pub kind: CollectionKind,
}
