use thiserror::Error;

/// Schema configuration errors. Raised once while building the registry and fatal to startup.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("Field `{entity}.{field}` references unknown entity `{referenced}`.")]
    UnknownEntity {
        entity: String,
        field: String,
        referenced: String,
    },

    #[error("Field `{entity}.{field}` references unknown enum `{referenced}`.")]
    UnknownEnum {
        entity: String,
        field: String,
        referenced: String,
    },

    #[error("Field `{entity}.{field}` is derived from `{referenced_entity}.{referenced_field}`, which does not exist.")]
    UnknownDerivedField {
        entity: String,
        field: String,
        referenced_entity: String,
        referenced_field: String,
    },

    #[error(
        "Field `{entity}.{field}` is derived from `{referenced_entity}.{referenced_field}`, which must be a scalar or a relationship to `{entity}`."
    )]
    InvalidDerivedField {
        entity: String,
        field: String,
        referenced_entity: String,
        referenced_field: String,
    },

    #[error("Entity `{entity}` must declare a scalar `id` field.")]
    MissingId { entity: String },

    #[error("Root field `{name}` of entity `{entity}` is already defined by entity `{existing}`.")]
    DuplicateRootField {
        name: String,
        entity: String,
        existing: String,
    },

    #[error("Type `{name}` is defined more than once.")]
    DuplicateType { name: String },

    #[error("Field `{entity}.{field}` is defined more than once.")]
    DuplicateField { entity: String, field: String },

    #[error("`{name}` is reserved and cannot be used as an entity or enum name.")]
    ReservedName { name: String },

    #[error("`{name}` is not a valid identifier.")]
    InvalidIdentifier { name: String },
}
