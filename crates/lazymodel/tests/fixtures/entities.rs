//! Test domain: heroes, teams and powers.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use lazymodel::prelude::*;

/// Role of the `Team.heroes` bag.
pub const TEAM_HEROES: &str = "Team.heroes";
/// Role of the `Hero.powers` set.
pub const HERO_POWERS: &str = "Hero.powers";
/// Role of the `Hero.trophies` sorted set.
pub const HERO_TROPHIES: &str = "Hero.trophies";

#[derive(Debug)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub heroes: RelationValue,
}

impl Team {
    pub fn shared(id: i64, name: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            id,
            name: name.to_owned(),
            heroes: RelationValue::Null,
        }))
    }
}

impl Entity for Team {
    fn entity_name(&self) -> &'static str {
        "Team"
    }

    fn identifier(&self) -> Value {
        Value::Int(self.id)
    }

    fn relations(&self) -> &'static [&'static str] {
        &["heroes"]
    }

    fn relation(&self, property: &str) -> Option<RelationValue> {
        match property {
            "heroes" => Some(self.heroes.clone()),
            _ => None,
        }
    }

    fn set_relation(&mut self, property: &str, value: RelationValue) -> bool {
        match property {
            "heroes" => {
                self.heroes = value;
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

#[derive(Debug)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub team: RelationValue,
    pub former_team: RelationValue,
    pub rival: RelationValue,
    pub powers: RelationValue,
    pub trophies: RelationValue,
}

impl Hero {
    pub fn shared(id: i64, name: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            id,
            name: name.to_owned(),
            team: RelationValue::Null,
            former_team: RelationValue::Null,
            rival: RelationValue::Null,
            powers: RelationValue::Null,
            trophies: RelationValue::Null,
        }))
    }
}

impl Entity for Hero {
    fn entity_name(&self) -> &'static str {
        "Hero"
    }

    fn identifier(&self) -> Value {
        Value::Int(self.id)
    }

    fn relations(&self) -> &'static [&'static str] {
        &["team", "former_team", "rival", "powers", "trophies"]
    }

    fn relation(&self, property: &str) -> Option<RelationValue> {
        match property {
            "team" => Some(self.team.clone()),
            "former_team" => Some(self.former_team.clone()),
            "rival" => Some(self.rival.clone()),
            "powers" => Some(self.powers.clone()),
            "trophies" => Some(self.trophies.clone()),
            _ => None,
        }
    }

    fn set_relation(&mut self, property: &str, value: RelationValue) -> bool {
        match property {
            "team" => {
                self.team = value;
                true
            }
            "former_team" => {
                self.former_team = value;
                true
            }
            "rival" => {
                self.rival = value;
                true
            }
            "powers" => {
                self.powers = value;
                true
            }
            "trophies" => {
                self.trophies = value;
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

#[derive(Debug)]
pub struct Power {
    pub id: i64,
    pub name: String,
}

impl Power {
    pub fn shared(id: i64, name: &str) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            id,
            name: name.to_owned(),
        }))
    }
}

impl Entity for Power {
    fn entity_name(&self) -> &'static str {
        "Power"
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
