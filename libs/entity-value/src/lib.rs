mod error;

use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::ser::{SerializeSeq, Serializer};
use serde::Serialize;
use std::{convert::TryFrom, fmt, str::FromStr};

pub use error::ConversionFailure;
pub use num_bigint;

pub type EntityValueResult<T> = std::result::Result<T, ConversionFailure>;
pub type EntityListValue = Vec<EntityValue>;

/// An untyped `field -> value` row as handed out by a store.
pub type Record = IndexMap<String, EntityValue>;

/// Tag key used by the JSON input format for values plain JSON can't carry.
pub const TYPE_TAG: &str = "$type";
pub const VALUE_TAG: &str = "value";

#[derive(Debug, Clone, PartialEq)]
pub enum EntityValue {
    String(String),
    Boolean(bool),
    Int(i64),
    Float(f64),
    /// Arbitrary-precision integer. Serialized as its decimal string.
    BigInt(BigInt),
    /// Serialized as a `0x` prefixed hex string.
    Bytes(Vec<u8>),
    Enum(String),
    List(EntityListValue),
    Null,
}

pub fn encode_bytes(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

pub fn decode_bytes(s: &str) -> EntityValueResult<Vec<u8>> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(digits).map_err(|_| ConversionFailure::new("hex encoded bytes", "EntityValue::Bytes"))
}

impl EntityValue {
    pub fn is_null(&self) -> bool {
        matches!(self, EntityValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EntityValue::String(s) | EntityValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EntityValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            EntityValue::String(_) => "String",
            EntityValue::Boolean(_) => "Boolean",
            EntityValue::Int(_) => "Int",
            EntityValue::Float(_) => "Float",
            EntityValue::BigInt(_) => "BigInt",
            EntityValue::Bytes(_) => "Bytes",
            EntityValue::Enum(_) => "Enum",
            EntityValue::List(_) => "List",
            EntityValue::Null => "Null",
        }
    }
}

impl Serialize for EntityValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            EntityValue::String(s) | EntityValue::Enum(s) => serializer.serialize_str(s),
            EntityValue::Boolean(b) => serializer.serialize_bool(*b),
            EntityValue::Int(i) => serializer.serialize_i64(*i),
            EntityValue::Float(f) => serializer.serialize_f64(*f),
            EntityValue::BigInt(b) => serializer.serialize_str(&b.to_string()),
            EntityValue::Bytes(b) => serializer.serialize_str(&encode_bytes(b)),
            EntityValue::List(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;

                for value in values {
                    seq.serialize_element(value)?;
                }

                seq.end()
            }
            EntityValue::Null => serializer.serialize_none(),
        }
    }
}

impl TryFrom<serde_json::Value> for EntityValue {
    type Error = ConversionFailure;

    fn try_from(v: serde_json::Value) -> EntityValueResult<Self> {
        match v {
            serde_json::Value::Null => Ok(EntityValue::Null),
            serde_json::Value::Bool(b) => Ok(EntityValue::Boolean(b)),
            serde_json::Value::String(s) => Ok(EntityValue::String(s)),
            serde_json::Value::Array(values) => {
                let values: EntityValueResult<Vec<EntityValue>> =
                    values.into_iter().map(EntityValue::try_from).collect();

                Ok(EntityValue::List(values?))
            }
            serde_json::Value::Number(num) => {
                if let Some(i) = num.as_i64() {
                    Ok(EntityValue::Int(i))
                } else if let Some(u) = num.as_u64() {
                    Ok(EntityValue::BigInt(BigInt::from(u)))
                } else {
                    num.as_f64()
                        .map(EntityValue::Float)
                        .ok_or_else(|| ConversionFailure::new("JSON number", "EntityValue"))
                }
            }
            serde_json::Value::Object(obj) => {
                let value = obj.get(VALUE_TAG).and_then(|v| v.as_str());

                match (obj.get(TYPE_TAG).and_then(|t| t.as_str()), value) {
                    (Some("BigInt"), Some(value)) => BigInt::from_str(value)
                        .map(EntityValue::BigInt)
                        .map_err(|_| ConversionFailure::new("JSON bigint value", "EntityValue::BigInt")),
                    (Some("Bytes"), Some(value)) => decode_bytes(value).map(EntityValue::Bytes),
                    _ => Err(ConversionFailure::new("JSON object", "EntityValue")),
                }
            }
        }
    }
}

impl fmt::Display for EntityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityValue::String(x) | EntityValue::Enum(x) => x.fmt(f),
            EntityValue::Boolean(x) => x.fmt(f),
            EntityValue::Int(x) => x.fmt(f),
            EntityValue::Float(x) => x.fmt(f),
            EntityValue::BigInt(x) => x.fmt(f),
            EntityValue::Bytes(b) => encode_bytes(b).fmt(f),
            EntityValue::Null => "null".fmt(f),
            EntityValue::List(values) => {
                let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<String> for EntityValue {
    fn from(s: String) -> Self {
        EntityValue::String(s)
    }
}

impl From<&str> for EntityValue {
    fn from(s: &str) -> Self {
        EntityValue::String(s.to_owned())
    }
}

impl From<bool> for EntityValue {
    fn from(b: bool) -> Self {
        EntityValue::Boolean(b)
    }
}

impl From<i64> for EntityValue {
    fn from(i: i64) -> Self {
        EntityValue::Int(i)
    }
}

impl From<i32> for EntityValue {
    fn from(i: i32) -> Self {
        EntityValue::Int(i64::from(i))
    }
}

impl From<f64> for EntityValue {
    fn from(f: f64) -> Self {
        EntityValue::Float(f)
    }
}

impl From<BigInt> for EntityValue {
    fn from(b: BigInt) -> Self {
        EntityValue::BigInt(b)
    }
}

impl<T> From<Vec<T>> for EntityValue
where
    T: Into<EntityValue>,
{
    fn from(values: Vec<T>) -> Self {
        EntityValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for EntityValue
where
    T: Into<EntityValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(EntityValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn big_ints_serialize_as_decimal_strings() {
        let value = EntityValue::BigInt(BigInt::from_str("123456789012345678901234567890").unwrap());
        let serialized = serde_json::to_value(&value).unwrap();

        assert_eq!(serialized, json!("123456789012345678901234567890"));
    }

    #[test]
    fn bytes_serialize_as_prefixed_hex() {
        let value = EntityValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]);

        assert_eq!(serde_json::to_value(&value).unwrap(), json!("0xdeadbeef"));
        assert_eq!(value.to_string(), "0xdeadbeef");
    }

    #[test]
    fn tagged_json_objects_convert_to_native_values() {
        let big = EntityValue::try_from(json!({ "$type": "BigInt", "value": "-99999999999999999999" })).unwrap();
        assert_eq!(big, EntityValue::BigInt(BigInt::from_str("-99999999999999999999").unwrap()));

        let bytes = EntityValue::try_from(json!({ "$type": "Bytes", "value": "0x0102" })).unwrap();
        assert_eq!(bytes, EntityValue::Bytes(vec![1, 2]));

        let untagged = EntityValue::try_from(json!({ "a": 1 }));
        assert!(untagged.is_err());
    }

    #[test]
    fn integers_beyond_i64_become_big_ints() {
        let value = EntityValue::try_from(json!(u64::MAX)).unwrap();

        assert_eq!(value, EntityValue::BigInt(BigInt::from(u64::MAX)));
        assert_eq!(EntityValue::try_from(json!(7)).unwrap(), EntityValue::Int(7));
        assert_eq!(EntityValue::try_from(json!(1.5)).unwrap(), EntityValue::Float(1.5));
    }

    #[test]
    fn lists_render_their_elements() {
        let value = EntityValue::from(vec![EntityValue::Int(1), EntityValue::Null, "a".into()]);

        assert_eq!(value.to_string(), "[1, null, a]");
    }
}
