use entity_value::{EntityValue, decode_bytes, encode_bytes};
use num_bigint::{BigInt, Sign};
use query_connector::{
    Result,
    error::{ConnectorError, ErrorKind},
};
use schema::ScalarType;
use serde_json::{Number, Value as JsonValue};
use std::str::FromStr;

/// Digits after the sign character of an encoded big integer.
const ENCODED_DIGITS: usize = 78;

/// Smallest storable big integer, -2^255.
fn min_int() -> BigInt {
    -(BigInt::from(1u8) << 255u32)
}

/// Largest storable big integer, 2^256 - 1.
fn max_uint() -> BigInt {
    (BigInt::from(1u8) << 256u32) - 1
}

pub(crate) fn conversion_error(message: impl Into<String>) -> ConnectorError {
    ConnectorError::from_kind(ErrorKind::ConversionError(message.into()))
}

/// Encodes `value` as fixed-width text whose lexicographic order is the numeric order.
///
/// Non-negative values are `0` followed by the zero-padded decimal digits. Negative values
/// are `-` followed by the zero-padded digits of `value + 2^255`, so they sort before every
/// non-negative value and among themselves by magnitude of the offset.
pub fn encode_big_int(value: &BigInt) -> Result<String> {
    if *value < min_int() || *value > max_uint() {
        return Err(conversion_error(format!(
            "BigInt `{value}` is outside of the storable range [-2^255, 2^256 - 1]."
        )));
    }

    let encoded = if value.sign() == Sign::Minus {
        let offset = (value - min_int()).to_string();
        format!("-{offset:0>width$}", width = ENCODED_DIGITS)
    } else {
        let digits = value.to_string();
        format!("0{digits:0>width$}", width = ENCODED_DIGITS)
    };

    Ok(encoded)
}

pub fn decode_big_int(encoded: &str) -> Result<BigInt> {
    let invalid = || conversion_error(format!("`{encoded}` is not an encoded BigInt."));

    let digits = encoded
        .get(1..)
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(invalid)?;
    let magnitude = BigInt::from_str(digits).map_err(|_| invalid())?;

    match encoded.as_bytes()[0] {
        b'-' => Ok(magnitude + min_int()),
        b'0' => Ok(magnitude),
        _ => Err(invalid()),
    }
}

/// Brings a written value into the shape of its declared scalar type.
pub(crate) fn coerce_scalar(value: EntityValue, scalar: ScalarType) -> Result<EntityValue> {
    let coerced = match (scalar, value) {
        (_, EntityValue::Null) => EntityValue::Null,
        (ScalarType::String, EntityValue::String(s)) => EntityValue::String(s),
        (ScalarType::Int, EntityValue::Int(i)) => EntityValue::Int(i),
        (ScalarType::Int, EntityValue::BigInt(b)) => i64::try_from(&b)
            .map(EntityValue::Int)
            .map_err(|_| conversion_error(format!("`{b}` does not fit into an Int.")))?,
        (ScalarType::Float, EntityValue::Float(f)) => EntityValue::Float(f),
        (ScalarType::Float, EntityValue::Int(i)) => EntityValue::Float(i as f64),
        (ScalarType::Boolean, EntityValue::Boolean(b)) => EntityValue::Boolean(b),
        (ScalarType::BigInt, EntityValue::BigInt(b)) => EntityValue::BigInt(b),
        (ScalarType::BigInt, EntityValue::Int(i)) => EntityValue::BigInt(BigInt::from(i)),
        (ScalarType::BigInt, EntityValue::String(s)) => BigInt::from_str(&s)
            .map(EntityValue::BigInt)
            .map_err(|_| conversion_error(format!("`{s}` is not a valid BigInt.")))?,
        (ScalarType::Bytes, EntityValue::Bytes(b)) => EntityValue::Bytes(b),
        (ScalarType::Bytes, EntityValue::String(s)) => EntityValue::Bytes(decode_bytes(&s)?),
        (scalar, other) => {
            return Err(conversion_error(format!(
                "Value `{other}` of type {} cannot be stored as {scalar}.",
                other.type_name()
            )));
        }
    };

    Ok(coerced)
}

pub(crate) fn coerce_enum(value: EntityValue) -> Result<EntityValue> {
    match value {
        EntityValue::Null => Ok(EntityValue::Null),
        EntityValue::String(s) | EntityValue::Enum(s) => Ok(EntityValue::Enum(s)),
        other => Err(conversion_error(format!(
            "Value `{other}` of type {} cannot be stored as an enum.",
            other.type_name()
        ))),
    }
}

/// JSON representation inside the `data` column. Expects coerced values.
pub(crate) fn encode_value(value: &EntityValue) -> Result<JsonValue> {
    let json = match value {
        EntityValue::String(s) | EntityValue::Enum(s) => JsonValue::String(s.clone()),
        EntityValue::Boolean(b) => JsonValue::Bool(*b),
        EntityValue::Int(i) => JsonValue::from(*i),
        EntityValue::Float(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .ok_or_else(|| conversion_error(format!("`{f}` cannot be stored.")))?,
        EntityValue::BigInt(b) => JsonValue::String(encode_big_int(b)?),
        EntityValue::Bytes(b) => JsonValue::String(encode_bytes(b)),
        EntityValue::List(values) => JsonValue::Array(values.iter().map(encode_value).collect::<Result<_>>()?),
        EntityValue::Null => JsonValue::Null,
    };

    Ok(json)
}

pub(crate) fn decode_scalar(json: JsonValue, scalar: ScalarType) -> Result<EntityValue> {
    let value = match (scalar, json) {
        (_, JsonValue::Null) => EntityValue::Null,
        (ScalarType::String, JsonValue::String(s)) => EntityValue::String(s),
        (ScalarType::Int, JsonValue::Number(n)) if n.is_i64() => EntityValue::Int(n.as_i64().unwrap_or_default()),
        (ScalarType::Float, JsonValue::Number(n)) => EntityValue::Float(n.as_f64().unwrap_or_default()),
        (ScalarType::Boolean, JsonValue::Bool(b)) => EntityValue::Boolean(b),
        (ScalarType::BigInt, JsonValue::String(s)) => EntityValue::BigInt(decode_big_int(&s)?),
        (ScalarType::Bytes, JsonValue::String(s)) => EntityValue::Bytes(decode_bytes(&s)?),
        (scalar, other) => {
            return Err(conversion_error(format!("Stored value `{other}` is not a valid {scalar}.")));
        }
    };

    Ok(value)
}

pub(crate) fn decode_enum(json: JsonValue) -> Result<EntityValue> {
    match json {
        JsonValue::Null => Ok(EntityValue::Null),
        JsonValue::String(s) => Ok(EntityValue::Enum(s)),
        other => Err(conversion_error(format!("Stored value `{other}` is not a valid enum value."))),
    }
}

/// Bound parameter for a stored JSON scalar, matching what `json_extract` returns for it.
pub(crate) fn json_to_parameter(json: JsonValue) -> Result<EntityValue> {
    match json {
        JsonValue::Null => Ok(EntityValue::Null),
        JsonValue::String(s) => Ok(EntityValue::String(s)),
        JsonValue::Bool(b) => Ok(EntityValue::Int(i64::from(b))),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Ok(EntityValue::Int(i)),
            None => Ok(EntityValue::Float(n.as_f64().unwrap_or_default())),
        },
        other => Err(conversion_error(format!("`{other}` cannot be used in an equality condition."))),
    }
}

pub(crate) fn to_sql(value: &EntityValue) -> rusqlite::types::Value {
    use rusqlite::types::Value;

    match value {
        EntityValue::Null => Value::Null,
        EntityValue::Int(i) => Value::Integer(*i),
        EntityValue::Float(f) => Value::Real(*f),
        EntityValue::Boolean(b) => Value::Integer(i64::from(*b)),
        other => Value::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn big(s: &str) -> BigInt {
        BigInt::from_str(s).unwrap()
    }

    #[test]
    fn encoded_big_ints_have_fixed_width() {
        assert_eq!(encode_big_int(&big("0")).unwrap(), format!("0{}", "0".repeat(78)));
        assert_eq!(encode_big_int(&big("42")).unwrap(), format!("0{}42", "0".repeat(76)));
        assert_eq!(encode_big_int(&min_int()).unwrap(), format!("-{}", "0".repeat(78)));
        assert_eq!(encode_big_int(&max_uint()).unwrap().len(), 79);
    }

    #[test]
    fn encoding_preserves_order() {
        let values = [
            min_int(),
            big("-123456789012345678901234567890"),
            big("-2"),
            big("-1"),
            big("0"),
            big("1"),
            big("99"),
            big("100"),
            big("123456789012345678901234567890"),
            max_uint(),
        ];

        let encoded: Vec<String> = values.iter().map(|v| encode_big_int(v).unwrap()).collect();
        let mut sorted = encoded.clone();
        sorted.sort();

        assert_eq!(encoded, sorted);

        for (value, encoded) in values.iter().zip(&encoded) {
            assert_eq!(&decode_big_int(encoded).unwrap(), value);
        }
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(encode_big_int(&(max_uint() + 1)).is_err());
        assert!(encode_big_int(&(min_int() - 1)).is_err());
        assert!(decode_big_int("").is_err());
        assert!(decode_big_int("x12").is_err());
    }

    #[test]
    fn encoded_big_ints_are_digits_after_the_sign() {
        assert!(decode_big_int("0-5").is_err());
        assert!(decode_big_int("-+5").is_err());
        assert!(decode_big_int("0").is_err());
        assert!(decode_big_int("0 12").is_err());
        assert_eq!(decode_big_int("0012").unwrap(), BigInt::from(12));
    }

    #[test]
    fn writes_are_coerced_to_the_declared_type() {
        assert_eq!(
            coerce_scalar(EntityValue::Int(5), ScalarType::BigInt).unwrap(),
            EntityValue::BigInt(big("5"))
        );
        assert_eq!(
            coerce_scalar("0x0a".into(), ScalarType::Bytes).unwrap(),
            EntityValue::Bytes(vec![10])
        );
        assert!(coerce_scalar(EntityValue::Boolean(true), ScalarType::Int).is_err());
    }
}
