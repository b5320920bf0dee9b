//! Entity schema compiler. Root for type registry building.

mod arguments;
mod output_objects;
mod query_type;
mod validation;

use crate::*;
use indexmap::IndexMap;
use std::sync::{Arc, Weak};

/// Compiles `schema` into a registry of object types.
///
/// Every entity type is allocated up front with a deferred field thunk. The thunks
/// capture a weak handle to the registry itself and only run on first field access,
/// at which point every type they may reference already exists. Cyclic entity graphs
/// therefore need no ordering and cannot recurse during compilation.
#[tracing::instrument(skip(schema), fields(entities = schema.entities.len()))]
pub fn build(schema: EntitySchema) -> Result<TypeRegistryRef, SchemaError> {
    validation::validate(&schema)?;

    let enum_types: IndexMap<String, EnumTypeRef> = schema
        .enums
        .iter()
        .map(|e| (e.name.clone(), Arc::new(EnumType::new(e.name.clone(), e.values.clone()))))
        .collect();

    let registry = Arc::new_cyclic(|registry: &Weak<TypeRegistry>| {
        let object_types: IndexMap<String, ObjectTypeStrongRef> = schema
            .entities
            .iter()
            .map(|entity| {
                let object_type = output_objects::entity_object_type(registry.clone(), Arc::new(entity.clone()));
                (entity.name.clone(), Arc::new(object_type))
            })
            .collect();

        let query = Arc::new(query_type::build(registry.clone(), &schema));

        TypeRegistry::new(query, object_types, enum_types, schema)
    });

    tracing::info!(
        object_types = registry.object_types().count(),
        enum_types = registry.enum_types().count(),
        "Compiled entity schema"
    );

    Ok(registry)
}
