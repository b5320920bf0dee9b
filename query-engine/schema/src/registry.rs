use crate::{EntitySchema, EnumTypeRef, ObjectTypeStrongRef};
use indexmap::IndexMap;

/// Owns every compiled type. Types refer to each other through weak handles that
/// resolve back into this registry, so the registry must outlive all of them.
#[derive(Debug)]
pub struct TypeRegistry {
    query: ObjectTypeStrongRef,
    object_types: IndexMap<String, ObjectTypeStrongRef>,
    enum_types: IndexMap<String, EnumTypeRef>,
    schema: EntitySchema,
}

impl TypeRegistry {
    pub(crate) fn new(
        query: ObjectTypeStrongRef,
        object_types: IndexMap<String, ObjectTypeStrongRef>,
        enum_types: IndexMap<String, EnumTypeRef>,
        schema: EntitySchema,
    ) -> Self {
        Self {
            query,
            object_types,
            enum_types,
            schema,
        }
    }

    /// The root `Query` type.
    pub fn query(&self) -> &ObjectTypeStrongRef {
        &self.query
    }

    pub fn find_object_type(&self, name: &str) -> Option<&ObjectTypeStrongRef> {
        self.object_types.get(name)
    }

    pub fn find_enum_type(&self, name: &str) -> Option<&EnumTypeRef> {
        self.enum_types.get(name)
    }

    /// Entity object types in declaration order.
    pub fn object_types(&self) -> impl Iterator<Item = &ObjectTypeStrongRef> {
        self.object_types.values()
    }

    pub fn enum_types(&self) -> impl Iterator<Item = &EnumTypeRef> {
        self.enum_types.values()
    }

    /// The schema this registry was compiled from.
    pub fn schema(&self) -> &EntitySchema {
        &self.schema
    }
}
