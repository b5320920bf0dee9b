//! One resolution rule per field kind. Resolvers only read: from the parent record or
//! through the request's store handle.

use crate::{
    CoreError, CoreResult,
    arguments::{self, Arguments},
    context::RequestContext,
};
use entity_value::{EntityValue, Record};
use schema::{FieldResolver, OutputField, ScalarType, constants::ID_FIELD};

/// Value produced by a resolver, before completion against the field's output type.
#[derive(Debug)]
pub(crate) enum Resolved {
    Value(EntityValue),
    Record(Option<Record>),
    Records(Vec<Record>),
}

#[tracing::instrument(skip_all, fields(field = %field.name))]
pub(crate) async fn resolve(
    ctx: &RequestContext,
    field: &OutputField,
    parent: Option<&Record>,
    arguments: &Arguments,
) -> CoreResult<Resolved> {
    match &field.resolver {
        FieldResolver::Scalar(scalar) => Ok(Resolved::Value(resolve_scalar(
            parent_value(parent, &field.name),
            *scalar,
        ))),

        FieldResolver::Enum | FieldResolver::List => Ok(Resolved::Value(parent_value(parent, &field.name))),

        FieldResolver::Relationship { related_entity } => {
            let id = parent_value(parent, &field.name);

            if id.is_null() {
                return Ok(Resolved::Record(None));
            }

            let record = ctx.store.find_unique(related_entity, &id).await?;

            if record.is_none() && !field.is_nullable() {
                return Err(CoreError::RecordNotFound {
                    field: field.name.clone(),
                    entity: related_entity.clone(),
                    id: id.to_string(),
                });
            }

            Ok(Resolved::Record(record))
        }

        FieldResolver::Derived {
            entity,
            field: derived_from,
        } => {
            let filter = arguments::many_records_filter(arguments)?;
            let parent_id = parent_value(parent, ID_FIELD);

            if parent_id.is_null() {
                return Ok(Resolved::Records(Vec::new()));
            }

            let records = ctx.store.find_many(entity, filter.where_eq(derived_from, parent_id)).await?;

            Ok(Resolved::Records(records))
        }

        FieldResolver::FindUnique { entity } => {
            let id = arguments.get(ID_FIELD).cloned().unwrap_or(EntityValue::Null);
            let record = ctx.store.find_unique(entity, &id).await?;

            Ok(Resolved::Record(record))
        }

        FieldResolver::FindMany { entity } => {
            let filter = arguments::many_records_filter(arguments)?;
            let records = ctx.store.find_many(entity, filter).await?;

            Ok(Resolved::Records(records))
        }
    }
}

fn parent_value(parent: Option<&Record>, name: &str) -> EntityValue {
    parent.and_then(|p| p.get(name)).cloned().unwrap_or(EntityValue::Null)
}

/// Arbitrary-precision integers leave as canonical decimal strings, everything else as is.
fn resolve_scalar(value: EntityValue, scalar: ScalarType) -> EntityValue {
    match (scalar, value) {
        (ScalarType::BigInt, EntityValue::BigInt(b)) => EntityValue::String(b.to_string()),
        (ScalarType::BigInt, EntityValue::Int(i)) => EntityValue::String(i.to_string()),
        (_, value) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_value::num_bigint::BigInt;
    use std::str::FromStr;

    #[test]
    fn big_ints_resolve_to_decimal_strings() {
        let value = EntityValue::BigInt(BigInt::from_str("123456789012345678901234567890").unwrap());

        assert_eq!(
            resolve_scalar(value, ScalarType::BigInt),
            EntityValue::String("123456789012345678901234567890".into())
        );
        assert_eq!(
            resolve_scalar(EntityValue::Int(-7), ScalarType::BigInt),
            EntityValue::String("-7".into())
        );
        assert_eq!(resolve_scalar(EntityValue::Null, ScalarType::BigInt), EntityValue::Null);
    }
}
