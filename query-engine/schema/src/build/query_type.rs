use super::{arguments, output_objects::map_entity_object_type};
use crate::{constants::QUERY_TYPE_NAME, *};
use std::sync::Weak;

/// Builds the root `Query` type: a single-record and a list field per entity.
pub(crate) fn build(registry: Weak<TypeRegistry>, schema: &EntitySchema) -> ObjectType {
    let entity_names: Vec<String> = schema.entities.iter().map(|e| e.name.clone()).collect();

    ObjectType::new(QUERY_TYPE_NAME, move || {
        let registry = registry.into_arc();

        entity_names
            .iter()
            .flat_map(|name| {
                let object_type = map_entity_object_type(&registry, name);
                let [unique_name, many_name] = root_field_names(name);

                let find_unique = OutputField::new(
                    unique_name,
                    OutputType::object(object_type.clone()),
                    FieldResolver::FindUnique { entity: name.clone() },
                )
                .arguments(arguments::unique_record_arguments());

                let find_many = OutputField::new(
                    many_name,
                    OutputType::list(OutputType::object(object_type).non_null()).non_null(),
                    FieldResolver::FindMany { entity: name.clone() },
                )
                .arguments(arguments::many_records_arguments());

                [find_unique, find_many]
            })
            .collect()
    })
}

/// Names of the single-record and list root fields of an entity.
pub(crate) fn root_field_names(entity_name: &str) -> [String; 2] {
    let unique = camel_case(entity_name);
    let many = format!("{unique}s");

    [unique, many]
}
