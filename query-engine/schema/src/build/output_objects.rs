use super::arguments;
use crate::*;
use std::sync::{Arc, Weak};

/// Allocates the object type of an entity. Field mapping is deferred until first access.
pub(crate) fn entity_object_type(registry: Weak<TypeRegistry>, entity: Arc<Entity>) -> ObjectType {
    let name = entity.name.clone();

    ObjectType::new(name, move || {
        let registry = registry.into_arc();
        tracing::trace!(entity = %entity.name, "Mapping entity fields");

        entity.fields.iter().map(|field| map_field(&registry, field)).collect()
    })
}

fn map_field(registry: &TypeRegistry, field: &Field) -> OutputField {
    match &field.kind {
        FieldKind::Scalar {
            scalar_type_name,
            not_null,
        } => OutputField::new(
            &field.name,
            OutputType::scalar(*scalar_type_name).non_null_if(*not_null),
            FieldResolver::Scalar(*scalar_type_name),
        ),

        FieldKind::Enum { enum_name, not_null } => OutputField::new(
            &field.name,
            OutputType::enum_type(map_enum_type(registry, enum_name)).non_null_if(*not_null),
            FieldResolver::Enum,
        ),

        FieldKind::Relationship {
            related_entity_name,
            not_null,
        } => OutputField::new(
            &field.name,
            OutputType::object(map_entity_object_type(registry, related_entity_name)).non_null_if(*not_null),
            FieldResolver::Relationship {
                related_entity: related_entity_name.clone(),
            },
        ),

        FieldKind::Derived {
            derived_from_entity_name,
            derived_from_field_name,
        } => {
            let element = OutputType::object(map_entity_object_type(registry, derived_from_entity_name)).non_null();

            OutputField::new(
                &field.name,
                OutputType::list(element).non_null(),
                FieldResolver::Derived {
                    entity: derived_from_entity_name.clone(),
                    field: derived_from_field_name.clone(),
                },
            )
            .arguments(arguments::many_records_arguments())
        }

        FieldKind::List {
            element,
            is_list_element_not_null,
            not_null,
        } => {
            let element = match element {
                ListElement::Scalar { scalar_type_name } => OutputType::scalar(*scalar_type_name),
                ListElement::Enum { enum_name } => OutputType::enum_type(map_enum_type(registry, enum_name)),
            };

            OutputField::new(
                &field.name,
                OutputType::list(element.non_null_if(*is_list_element_not_null)).non_null_if(*not_null),
                FieldResolver::List,
            )
        }
    }
}

pub(crate) fn map_entity_object_type(registry: &TypeRegistry, entity_name: &str) -> ObjectTypeWeakRef {
    let object_type = registry
        .find_object_type(entity_name)
        .expect("Invariant violation: Initialized output object type for each entity.");

    Arc::downgrade(object_type)
}

fn map_enum_type(registry: &TypeRegistry, enum_name: &str) -> EnumTypeRef {
    registry
        .find_enum_type(enum_name)
        .cloned()
        .expect("Invariant violation: Initialized enum type for each declared enum.")
}
