use crate::{InputField, InputType, ScalarType, constants::*};
use entity_value::EntityValue;

/// Pagination, ordering and point-in-time arguments shared by derived fields and
/// root list fields. `timestamp` deliberately has no default: absent means "latest".
pub(crate) fn many_records_arguments() -> Vec<InputField> {
    vec![
        InputField::new(args::SKIP, InputType::int(), Some(EntityValue::Int(defaults::SKIP))),
        InputField::new(args::FIRST, InputType::int(), Some(EntityValue::Int(defaults::FIRST))),
        InputField::new(args::ORDER_BY, InputType::string(), Some(defaults::ORDER_BY.into())),
        InputField::new(
            args::ORDER_DIRECTION,
            InputType::string(),
            Some(defaults::ORDER_DIRECTION.into()),
        ),
        InputField::new(args::TIMESTAMP, InputType::int(), None),
    ]
}

pub(crate) fn unique_record_arguments() -> Vec<InputField> {
    vec![InputField::new(
        args::ID,
        InputType::scalar(ScalarType::String).non_null(),
        None,
    )]
}
