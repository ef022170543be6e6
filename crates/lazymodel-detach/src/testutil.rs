//! In-crate test domain: a linked `Node` with one scalar and one to-many
//! relation, plus mock persisters and a fixed-session finder.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use lazymodel_core::{
    ClassMetadata, CollectionKind, CollectionPersister, Entity, EntityPersister, EntityRef,
    PersistentCollection, Proxy, ProxyRef, RelationValue, Result, Session, SessionFactory,
    SessionFinder, SessionHandle, Value,
};

#[derive(Debug)]
pub struct Node {
    pub id: i64,
    pub next: RelationValue,
    pub items: RelationValue,
}

impl Entity for Node {
    fn entity_name(&self) -> &'static str {
        "Node"
    }

    fn identifier(&self) -> Value {
        Value::Int(self.id)
    }

    fn relations(&self) -> &'static [&'static str] {
        &["next", "items"]
    }

    fn relation(&self, property: &str) -> Option<RelationValue> {
        match property {
            "next" => Some(self.next.clone()),
            "items" => Some(self.items.clone()),
            _ => None,
        }
    }

    fn set_relation(&mut self, property: &str, value: RelationValue) -> bool {
        match property {
            "next" => {
                self.next = value;
                true
            }
            "items" => {
                self.items = value;
                true
            }
            _ => false,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn node(id: i64) -> EntityRef {
    Rc::new(RefCell::new(Node {
        id,
        next: RelationValue::Null,
        items: RelationValue::Null,
    }))
}

/// Node whose `items` holds a persistent handle of `kind`, initialized or not.
pub fn node_with_items(
    id: i64,
    kind: CollectionKind,
    session: &SessionHandle,
    initialized: bool,
) -> EntityRef {
    let handle = if initialized {
        PersistentCollection::initialized("Node.items", kind.new_plain(), session)
    } else {
        let handle = kind.new_uninitialized(session);
        handle.set_role("Node.items");
        handle
    };
    let entity = node(id);
    entity
        .borrow_mut()
        .set_relation("items", RelationValue::Collection(handle));
    entity
}

struct NodePersister;

impl EntityPersister for NodePersister {
    fn entity_name(&self) -> &str {
        "Node"
    }

    fn create_proxy(&self, id: Value, session: &SessionHandle) -> ProxyRef {
        Proxy::uninitialized("Node", id, session)
    }
}

struct ItemsPersister;

impl CollectionPersister for ItemsPersister {
    fn role(&self) -> &str {
        "Node.items"
    }

    fn kind(&self) -> CollectionKind {
        CollectionKind::Bag
    }
}

fn factory() -> Rc<SessionFactory> {
    let mut factory = SessionFactory::new();
    factory.register_entity_persister(Rc::new(NodePersister));
    factory.register_collection_persister(Rc::new(ItemsPersister));
    factory.register_metadata(ClassMetadata::new("Node"));
    Rc::new(factory)
}

pub fn open_session() -> SessionHandle {
    Session::open(factory())
}

/// Finder handing out one fixed session.
pub struct FixedSessionFinder {
    session: SessionHandle,
}

impl FixedSessionFinder {
    pub fn new() -> Self {
        Self {
            session: open_session(),
        }
    }

    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }
}

impl SessionFinder for FixedSessionFinder {
    fn find(&self, _entity_name: &str) -> Result<SessionHandle> {
        Ok(self.session.clone())
    }
}
