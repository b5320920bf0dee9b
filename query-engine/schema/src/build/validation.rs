use super::query_type::root_field_names;
use crate::{
    EntitySchema, FieldKind, ListElement, SchemaError,
    constants::{ID_FIELD, QUERY_TYPE_NAME},
    is_valid_identifier,
};
use std::collections::{HashMap, HashSet};

/// Referential closure, `id` presence and name uniqueness. Returns the first violation found.
pub(crate) fn validate(schema: &EntitySchema) -> Result<(), SchemaError> {
    let mut type_names = HashSet::new();

    let names = schema
        .entities
        .iter()
        .map(|e| &e.name)
        .chain(schema.enums.iter().map(|e| &e.name));

    for name in names {
        if name == QUERY_TYPE_NAME {
            return Err(SchemaError::ReservedName { name: name.clone() });
        }

        if !is_valid_identifier(name) {
            return Err(SchemaError::InvalidIdentifier { name: name.clone() });
        }

        if !type_names.insert(name.as_str()) {
            return Err(SchemaError::DuplicateType { name: name.clone() });
        }
    }

    let mut root_fields: HashMap<String, &str> = HashMap::new();

    for entity in &schema.entities {
        match entity.find_field(ID_FIELD).map(|f| &f.kind) {
            Some(FieldKind::Scalar { .. }) => (),
            _ => {
                return Err(SchemaError::MissingId {
                    entity: entity.name.clone(),
                });
            }
        }

        for name in root_field_names(&entity.name) {
            if let Some(existing) = root_fields.get(&name) {
                return Err(SchemaError::DuplicateRootField {
                    name,
                    entity: entity.name.clone(),
                    existing: existing.to_string(),
                });
            }

            root_fields.insert(name, &entity.name);
        }

        let mut field_names = HashSet::new();

        for field in &entity.fields {
            if !is_valid_identifier(&field.name) {
                return Err(SchemaError::InvalidIdentifier {
                    name: format!("{}.{}", entity.name, field.name),
                });
            }

            if !field_names.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    entity: entity.name.clone(),
                    field: field.name.clone(),
                });
            }

            let unknown_entity = |referenced: &String| SchemaError::UnknownEntity {
                entity: entity.name.clone(),
                field: field.name.clone(),
                referenced: referenced.clone(),
            };

            let unknown_enum = |referenced: &String| SchemaError::UnknownEnum {
                entity: entity.name.clone(),
                field: field.name.clone(),
                referenced: referenced.clone(),
            };

            match &field.kind {
                FieldKind::Scalar { .. } => (),
                FieldKind::Enum { enum_name, .. }
                | FieldKind::List {
                    element: ListElement::Enum { enum_name },
                    ..
                } => {
                    if schema.find_enum(enum_name).is_none() {
                        return Err(unknown_enum(enum_name));
                    }
                }
                FieldKind::List { .. } => (),
                FieldKind::Relationship {
                    related_entity_name, ..
                } => {
                    if schema.find_entity(related_entity_name).is_none() {
                        return Err(unknown_entity(related_entity_name));
                    }
                }
                FieldKind::Derived {
                    derived_from_entity_name,
                    derived_from_field_name,
                } => {
                    let Some(source) = schema.find_entity(derived_from_entity_name) else {
                        return Err(unknown_entity(derived_from_entity_name));
                    };

                    let Some(source_field) = source.find_field(derived_from_field_name) else {
                        return Err(SchemaError::UnknownDerivedField {
                            entity: entity.name.clone(),
                            field: field.name.clone(),
                            referenced_entity: derived_from_entity_name.clone(),
                            referenced_field: derived_from_field_name.clone(),
                        });
                    };

                    let points_back = match &source_field.kind {
                        FieldKind::Scalar { .. } => true,
                        FieldKind::Relationship {
                            related_entity_name, ..
                        } => *related_entity_name == entity.name,
                        _ => false,
                    };

                    if !points_back {
                        return Err(SchemaError::InvalidDerivedField {
                            entity: entity.name.clone(),
                            field: field.name.clone(),
                            referenced_entity: derived_from_entity_name.clone(),
                            referenced_field: derived_from_field_name.clone(),
                        });
                    }
                }
            }
        }
    }

    Ok(())
}
