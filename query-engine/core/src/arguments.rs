use crate::{CoreError, CoreResult};
use entity_value::{EntityValue, decode_bytes, num_bigint::BigInt};
use indexmap::IndexMap;
use query_connector::{Filter, SortOrder};
use schema::{
    OutputField, ScalarType,
    constants::{args, defaults},
};
use serde_json::Value as JsonValue;
use std::str::FromStr;

/// Coerced arguments of a field, one entry per declared argument. Defaults are applied;
/// arguments without a default that were not supplied are `Null`.
pub(crate) type Arguments = IndexMap<String, EntityValue>;

/// Validates the supplied arguments against the field's declared ones.
///
/// An explicit `null` counts as "not supplied", so defaults still apply to it.
pub(crate) fn coerce_arguments(field: &OutputField, provided: &IndexMap<String, JsonValue>) -> CoreResult<Arguments> {
    if let Some(unknown) = provided.keys().find(|name| field.find_argument(name).is_none()) {
        return Err(CoreError::InvalidArgument(format!(
            "Unknown argument `{unknown}` on field `{}`.",
            field.name
        )));
    }

    field
        .arguments
        .iter()
        .map(|arg| {
            let value = match provided.get(&arg.name) {
                None | Some(JsonValue::Null) => arg.default_value.clone().unwrap_or(EntityValue::Null),
                Some(value) => coerce_input(value, arg.field_type.scalar_type()).ok_or_else(|| {
                    CoreError::InvalidArgument(format!(
                        "Argument `{}` on field `{}` expects a value of type {}, got `{value}`.",
                        arg.name, field.name, arg.field_type
                    ))
                })?,
            };

            if value.is_null() && arg.field_type.is_non_null() {
                return Err(CoreError::InvalidArgument(format!(
                    "Argument `{}` on field `{}` is required.",
                    arg.name, field.name
                )));
            }

            Ok((arg.name.clone(), value))
        })
        .collect()
}

fn coerce_input(value: &JsonValue, scalar: ScalarType) -> Option<EntityValue> {
    match (scalar, value) {
        (ScalarType::String, JsonValue::String(s)) => Some(EntityValue::String(s.clone())),
        (ScalarType::Int, JsonValue::Number(n)) => n.as_i64().map(EntityValue::Int),
        (ScalarType::Float, JsonValue::Number(n)) => n.as_f64().map(EntityValue::Float),
        (ScalarType::Boolean, JsonValue::Bool(b)) => Some(EntityValue::Boolean(*b)),
        (ScalarType::BigInt, JsonValue::String(s)) => BigInt::from_str(s).ok().map(EntityValue::BigInt),
        (ScalarType::BigInt, JsonValue::Number(n)) => n.as_i64().map(|i| EntityValue::BigInt(BigInt::from(i))),
        (ScalarType::Bytes, JsonValue::String(s)) => decode_bytes(s).ok().map(EntityValue::Bytes),
        _ => None,
    }
}

/// Builds the store filter from pagination, ordering and point-in-time arguments.
/// The `where` part is left to the caller.
pub(crate) fn many_records_filter(arguments: &Arguments) -> CoreResult<Filter> {
    let skip = non_negative(arguments, args::SKIP, defaults::SKIP)?;
    let first = non_negative(arguments, args::FIRST, defaults::FIRST)?;

    let order_by = arguments
        .get(args::ORDER_BY)
        .and_then(EntityValue::as_str)
        .unwrap_or(defaults::ORDER_BY);

    let order_direction = arguments
        .get(args::ORDER_DIRECTION)
        .and_then(EntityValue::as_str)
        .unwrap_or(defaults::ORDER_DIRECTION)
        .parse::<SortOrder>()
        .map_err(CoreError::InvalidArgument)?;

    let timestamp = arguments.get(args::TIMESTAMP).and_then(EntityValue::as_i64);

    Ok(Filter::default()
        .skip(skip)
        .first(first)
        .order_by(order_by, order_direction)
        .at(timestamp))
}

fn non_negative(arguments: &Arguments, name: &str, default: i64) -> CoreResult<i64> {
    match arguments.get(name).and_then(EntityValue::as_i64).unwrap_or(default) {
        value if value < 0 => Err(CoreError::InvalidArgument(format!(
            "Argument `{name}` must not be negative, got {value}."
        ))),
        value => Ok(value),
    }
}
