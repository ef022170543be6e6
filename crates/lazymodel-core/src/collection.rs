//! Persistent collections and the collection-kind catalog.
//!
//! A `PersistentCollection` is a session-aware handle: it knows its role and
//! whether it has been initialized, and it backs its elements with a plain
//! container of the matching shape. The `CollectionKind` catalog classifies
//! handles and constructs both persistent handles and plain containers.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::entity::EntityRef;
use crate::session::{Session, SessionHandle};
use crate::value::Value;

/// Shared handle to a persistent collection.
pub type CollectionRef = Rc<PersistentCollection>;

// ============================================================================
// Collection kinds
// ============================================================================

/// Shape of a to-many association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollectionKind {
    /// Unordered, duplicates allowed.
    Bag,
    /// Unordered, unique elements.
    Set,
    /// Unique elements in element order.
    SortedSet,
    /// Keyed by a value.
    Map,
}

impl CollectionKind {
    /// Classify a persistent collection by the shape of its backing store.
    ///
    /// The sorted variant is checked before the plain set (it satisfies the
    /// set shape as well), set before bag, and map is the fall-through.
    #[must_use]
    pub fn classify(collection: &PersistentCollection) -> Self {
        match &*collection.store.borrow() {
            PlainCollection::SortedSet(_) => CollectionKind::SortedSet,
            PlainCollection::Set(_) => CollectionKind::Set,
            PlainCollection::Bag(_) => CollectionKind::Bag,
            PlainCollection::Map(_) => CollectionKind::Map,
        }
    }

    /// Construct an empty uninitialized persistent handle bound to `session`.
    #[must_use]
    pub fn new_uninitialized(self, session: &SessionHandle) -> CollectionRef {
        PersistentCollection::uninitialized(self, session)
    }

    /// Construct an empty plain container of this shape.
    #[must_use]
    pub fn new_plain(self) -> PlainCollection {
        match self {
            CollectionKind::Bag => PlainCollection::Bag(Vec::new()),
            CollectionKind::Set => PlainCollection::Set(HashSet::new()),
            CollectionKind::SortedSet => PlainCollection::SortedSet(BTreeSet::new()),
            CollectionKind::Map => PlainCollection::Map(HashMap::new()),
        }
    }

    /// Short label for diagnostics.
    #[must_use]
    pub fn shape_name(self) -> &'static str {
        match self {
            CollectionKind::Bag => "bag",
            CollectionKind::Set => "set",
            CollectionKind::SortedSet => "sorted set",
            CollectionKind::Map => "map",
        }
    }
}

// ============================================================================
// Plain containers
// ============================================================================

/// Entity reference usable in set shapes: equality and hashing by pointer
/// identity, ordering by `(identifier, pointer)`.
#[derive(Debug, Clone)]
pub struct Element(pub EntityRef);

impl Element {
    fn addr(&self) -> usize {
        Rc::as_ptr(&self.0).cast::<()>() as usize
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl Hash for Element {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addr().hash(state);
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Element {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.0.borrow().identifier();
        let rhs = other.0.borrow().identifier();
        lhs.cmp(&rhs).then_with(|| self.addr().cmp(&other.addr()))
    }
}

/// A plain container with no session awareness.
#[derive(Debug, Clone)]
pub enum PlainCollection {
    /// Array-list shape.
    Bag(Vec<EntityRef>),
    /// Hash-set shape.
    Set(HashSet<Element>),
    /// Tree-set shape.
    SortedSet(BTreeSet<Element>),
    /// Hash-map shape.
    Map(HashMap<Value, EntityRef>),
}

impl PlainCollection {
    /// Number of contained elements.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            PlainCollection::Bag(v) => v.len(),
            PlainCollection::Set(s) => s.len(),
            PlainCollection::SortedSet(s) => s.len(),
            PlainCollection::Map(m) => m.len(),
        }
    }

    /// Whether the container holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape of this container.
    #[must_use]
    pub fn kind(&self) -> CollectionKind {
        match self {
            PlainCollection::Bag(_) => CollectionKind::Bag,
            PlainCollection::Set(_) => CollectionKind::Set,
            PlainCollection::SortedSet(_) => CollectionKind::SortedSet,
            PlainCollection::Map(_) => CollectionKind::Map,
        }
    }

    /// Contained entities; map values for the map shape.
    #[must_use]
    pub fn elements(&self) -> Vec<EntityRef> {
        match self {
            PlainCollection::Bag(v) => v.clone(),
            PlainCollection::Set(s) => s.iter().map(|e| e.0.clone()).collect(),
            PlainCollection::SortedSet(s) => s.iter().map(|e| e.0.clone()).collect(),
            PlainCollection::Map(m) => m.values().cloned().collect(),
        }
    }

    /// Add an entity. The map shape keys by the entity's identifier.
    pub fn add(&mut self, entity: EntityRef) {
        match self {
            PlainCollection::Bag(v) => v.push(entity),
            PlainCollection::Set(s) => {
                s.insert(Element(entity));
            }
            PlainCollection::SortedSet(s) => {
                s.insert(Element(entity));
            }
            PlainCollection::Map(m) => {
                let key = entity.borrow().identifier();
                m.insert(key, entity);
            }
        }
    }

    /// Insert under an explicit key; only meaningful for the map shape, where
    /// it replaces the identifier-derived key of `add`.
    pub fn insert_keyed(&mut self, key: Value, entity: EntityRef) {
        match self {
            PlainCollection::Map(m) => {
                m.insert(key, entity);
            }
            other => other.add(entity),
        }
    }

    /// Whether the container holds `entity`, by pointer identity.
    #[must_use]
    pub fn contains(&self, entity: &EntityRef) -> bool {
        match self {
            PlainCollection::Bag(v) => v.iter().any(|e| Rc::ptr_eq(e, entity)),
            PlainCollection::Set(s) => s.contains(&Element(entity.clone())),
            PlainCollection::SortedSet(s) => s.iter().any(|e| Rc::ptr_eq(&e.0, entity)),
            PlainCollection::Map(m) => m.values().any(|e| Rc::ptr_eq(e, entity)),
        }
    }
}

// ============================================================================
// Persistent handles
// ============================================================================

/// Snapshot marking a collection as detached-but-known: the engine installs
/// `(owner id, role, no stored state)` when minting handles at attach time.
#[derive(Debug, Clone)]
pub struct CollectionSnapshot {
    /// Identifier of the owning entity.
    pub owner_id: Value,
    /// Fully qualified association name.
    pub role: String,
    /// Stored element state, when the collaborator captured one.
    pub stored: Option<PlainCollection>,
}

/// A session-aware collection handle.
#[derive(Debug)]
pub struct PersistentCollection {
    role: RefCell<Option<String>>,
    initialized: Cell<bool>,
    snapshot: RefCell<Option<CollectionSnapshot>>,
    store: RefCell<PlainCollection>,
    session: RefCell<Weak<Session>>,
}

impl PersistentCollection {
    /// Empty uninitialized handle of the given shape, bound to `session`.
    #[must_use]
    pub fn uninitialized(kind: CollectionKind, session: &SessionHandle) -> CollectionRef {
        Rc::new(Self {
            role: RefCell::new(None),
            initialized: Cell::new(false),
            snapshot: RefCell::new(None),
            store: RefCell::new(kind.new_plain()),
            session: RefCell::new(Rc::downgrade(session)),
        })
    }

    /// Fully loaded handle, as a collaborator load would produce.
    #[must_use]
    pub fn initialized(
        role: impl Into<String>,
        store: PlainCollection,
        session: &SessionHandle,
    ) -> CollectionRef {
        Rc::new(Self {
            role: RefCell::new(Some(role.into())),
            initialized: Cell::new(true),
            snapshot: RefCell::new(None),
            store: RefCell::new(store),
            session: RefCell::new(Rc::downgrade(session)),
        })
    }

    /// Fully qualified association name, when known.
    #[must_use]
    pub fn role(&self) -> Option<String> {
        self.role.borrow().clone()
    }

    /// Assign the association name.
    pub fn set_role(&self, role: impl Into<String>) {
        *self.role.borrow_mut() = Some(role.into());
    }

    /// Whether elements have been loaded.
    #[must_use]
    pub fn was_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Install a snapshot, also fixing the role.
    pub fn set_snapshot(&self, owner_id: Value, role: &str, stored: Option<PlainCollection>) {
        *self.role.borrow_mut() = Some(role.to_owned());
        *self.snapshot.borrow_mut() = Some(CollectionSnapshot {
            owner_id,
            role: role.to_owned(),
            stored,
        });
    }

    /// The installed snapshot, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<CollectionSnapshot> {
        self.snapshot.borrow().clone()
    }

    /// Plain container of the matching shape with element references copied
    /// across. Severs the serialization tie to the originating session.
    #[must_use]
    pub fn plain_copy(&self) -> PlainCollection {
        self.store.borrow().clone()
    }

    /// The session this handle is bound to, if still alive.
    #[must_use]
    pub fn session(&self) -> Option<SessionHandle> {
        self.session.borrow().upgrade()
    }
}
