//! Minimal entity used by in-crate unit tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::entity::{Entity, EntityRef, RelationValue};
use crate::value::Value;

#[derive(Debug)]
pub struct Stub {
    pub id: i64,
}

impl Entity for Stub {
    fn entity_name(&self) -> &'static str {
        "Stub"
    }

    fn identifier(&self) -> Value {
        Value::Int(self.id)
    }

    fn relations(&self) -> &'static [&'static str] {
        &[]
    }

    fn relation(&self, _property: &str) -> Option<RelationValue> {
        None
    }

    fn set_relation(&mut self, _property: &str, _value: RelationValue) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub fn stub(id: i64) -> EntityRef {
    Rc::new(RefCell::new(Stub { id }))
}
