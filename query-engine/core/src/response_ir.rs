//! Response IR (Intermediate Representation): completed field values, ready for serialization.

use crate::FieldError;
use entity_value::EntityValue;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// A `key -> value` map to an IR item
pub type Map = IndexMap<String, Item>;

/// A list of IR items
pub type List = Vec<Item>;

#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Map(Map),
    List(List),
    Value(EntityValue),
}

impl Item {
    pub fn null() -> Self {
        Item::Value(EntityValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Item::Value(EntityValue::Null))
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Item::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl Serialize for Item {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Item::Map(m) => m.serialize(serializer),
            Item::List(l) => l.serialize(serializer),
            Item::Value(v) => v.serialize(serializer),
        }
    }
}

/// Data of an executed document together with every field error raised on the way.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    pub data: Item,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

impl Response {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Looks up a value by a dotted path of response keys, e.g. `token.owner.id`.
    pub fn get(&self, dotted: &str) -> Option<&Item> {
        dotted.split('.').try_fold(&self.data, |item, key| item.as_map()?.get(key))
    }
}
