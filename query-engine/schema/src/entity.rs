//! The declarative entity schema the type graph is compiled from.
//!
//! The JSON shape is the one emitted by the indexer's schema loader:
//!
//! ```json
//! {
//!   "entities": [
//!     {
//!       "name": "Account",
//!       "fields": [
//!         { "name": "id", "kind": "SCALAR", "scalarTypeName": "String", "notNull": true },
//!         { "name": "tokens", "kind": "DERIVED", "derivedFromEntityName": "Token", "derivedFromFieldName": "owner" }
//!       ]
//!     }
//!   ],
//!   "enums": [{ "name": "Color", "values": ["RED", "GREEN"] }]
//! }
//! ```

use serde::Deserialize;
use std::fmt;

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EntitySchema {
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub enums: Vec<EnumDefinition>,
}

impl EntitySchema {
    pub fn new(entities: Vec<Entity>) -> Self {
        Self {
            entities,
            enums: Vec::new(),
        }
    }

    pub fn with_enum(mut self, name: impl Into<String>, values: &[&str]) -> Self {
        self.enums.push(EnumDefinition {
            name: name.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });

        self
    }

    pub fn find_entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.name == name)
    }

    pub fn find_enum(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.iter().find(|e| e.name == name)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Entity {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Entity {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn find_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct EnumDefinition {
    pub name: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Field {
    pub name: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum FieldKind {
    Scalar {
        scalar_type_name: ScalarType,
        #[serde(default)]
        not_null: bool,
    },
    Enum {
        enum_name: String,
        #[serde(default)]
        not_null: bool,
    },
    /// Forward reference: the record stores the related record's id under the field name.
    Relationship {
        related_entity_name: String,
        #[serde(default)]
        not_null: bool,
    },
    /// Reverse one-to-many reference. Never stored, always computed.
    Derived {
        derived_from_entity_name: String,
        derived_from_field_name: String,
    },
    List {
        element: ListElement,
        #[serde(default)]
        is_list_element_not_null: bool,
        #[serde(default)]
        not_null: bool,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE", rename_all_fields = "camelCase")]
pub enum ListElement {
    Scalar { scalar_type_name: ScalarType },
    Enum { enum_name: String },
}

impl Field {
    pub fn scalar(name: impl Into<String>, scalar_type_name: ScalarType, not_null: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Scalar {
                scalar_type_name,
                not_null,
            },
        }
    }

    pub fn enumeration(name: impl Into<String>, enum_name: impl Into<String>, not_null: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Enum {
                enum_name: enum_name.into(),
                not_null,
            },
        }
    }

    pub fn relationship(name: impl Into<String>, related_entity_name: impl Into<String>, not_null: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Relationship {
                related_entity_name: related_entity_name.into(),
                not_null,
            },
        }
    }

    pub fn derived(
        name: impl Into<String>,
        derived_from_entity_name: impl Into<String>,
        derived_from_field_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Derived {
                derived_from_entity_name: derived_from_entity_name.into(),
                derived_from_field_name: derived_from_field_name.into(),
            },
        }
    }

    pub fn list(name: impl Into<String>, element: ListElement, is_list_element_not_null: bool, not_null: bool) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::List {
                element,
                is_list_element_not_null,
                not_null,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Int,
    Float,
    Boolean,
    BigInt,
    Bytes,
}

impl ScalarType {
    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "String",
            ScalarType::Int => "Int",
            ScalarType::Float => "Float",
            ScalarType::Boolean => "Boolean",
            ScalarType::BigInt => "BigInt",
            ScalarType::Bytes => "Bytes",
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
