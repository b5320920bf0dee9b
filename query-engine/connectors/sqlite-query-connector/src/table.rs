use crate::value::*;
use entity_value::{EntityValue, Record};
use indexmap::IndexMap;
use query_connector::{
    Result,
    error::{ConnectorError, ErrorKind},
};
use schema::{Entity, EntitySchema, FieldKind, ListElement, ScalarType, constants::ID_FIELD, is_valid_identifier};
use serde_json::{Map, Value as JsonValue};

/// Storage shape of a field inside the `data` column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StoredType {
    Scalar(ScalarType),
    Enum,
    ScalarList(ScalarType),
    EnumList,
}

/// One versioned table per entity:
/// `id TEXT, data TEXT, effective_from INTEGER, effective_to INTEGER`.
#[derive(Debug, Clone)]
pub(crate) struct Table {
    pub(crate) name: String,
    pub(crate) id_type: ScalarType,
    pub(crate) fields: IndexMap<String, StoredType>,
}

impl Table {
    pub(crate) fn from_entity(schema: &EntitySchema, entity: &Entity) -> Result<Self> {
        let invalid = |name: &str| {
            ConnectorError::from_kind(ErrorKind::InvalidIdentifier {
                name: name.to_owned(),
            })
        };

        if !is_valid_identifier(&entity.name) {
            return Err(invalid(&entity.name));
        }

        let mut fields = IndexMap::new();

        for field in &entity.fields {
            if !is_valid_identifier(&field.name) {
                return Err(invalid(&field.name));
            }

            let stored = match &field.kind {
                FieldKind::Scalar { scalar_type_name, .. } => StoredType::Scalar(*scalar_type_name),
                FieldKind::Enum { .. } => StoredType::Enum,
                FieldKind::Relationship {
                    related_entity_name, ..
                } => StoredType::Scalar(id_type(schema.find_entity(related_entity_name))),
                FieldKind::Derived { .. } => continue,
                FieldKind::List {
                    element: ListElement::Scalar { scalar_type_name },
                    ..
                } => StoredType::ScalarList(*scalar_type_name),
                FieldKind::List {
                    element: ListElement::Enum { .. },
                    ..
                } => StoredType::EnumList,
            };

            fields.insert(field.name.clone(), stored);
        }

        Ok(Self {
            name: entity.name.clone(),
            id_type: id_type(Some(entity)),
            fields,
        })
    }

    fn unknown_field(&self, field: &str) -> ConnectorError {
        ConnectorError::from_kind(ErrorKind::UnknownField {
            model: self.name.clone(),
            field: field.to_owned(),
        })
    }

    /// Stored type of `field`, failing for derived and unknown fields.
    pub(crate) fn stored_type(&self, field: &str) -> Result<StoredType> {
        self.fields.get(field).copied().ok_or_else(|| self.unknown_field(field))
    }

    /// Text key of the `id` column for an id given in any compatible representation.
    pub(crate) fn key(&self, id: &EntityValue) -> Result<String> {
        let id = match (self.id_type, id) {
            (ScalarType::Int, EntityValue::String(s)) => s
                .parse::<i64>()
                .map(EntityValue::Int)
                .map_err(|_| conversion_error(format!("`{s}` is not a valid Int id.")))?,
            (scalar, id) => coerce_scalar(id.clone(), scalar)?,
        };

        match encode_value(&id)? {
            JsonValue::String(s) => Ok(s),
            JsonValue::Number(n) => Ok(n.to_string()),
            other => Err(conversion_error(format!("`{other}` cannot be used as a record id."))),
        }
    }

    /// Bound parameter comparing `field` against `value` through `json_extract`.
    pub(crate) fn condition_parameter(&self, field: &str, value: &EntityValue) -> Result<EntityValue> {
        let coerced = match self.stored_type(field)? {
            StoredType::Scalar(scalar) => coerce_scalar(value.clone(), scalar)?,
            StoredType::Enum => coerce_enum(value.clone())?,
            StoredType::ScalarList(_) | StoredType::EnumList => {
                return Err(conversion_error(format!(
                    "List field `{}.{field}` cannot be used in an equality condition.",
                    self.name
                )));
            }
        };

        json_to_parameter(encode_value(&coerced)?)
    }

    /// Returns the id key and the JSON `data` column of a record.
    pub(crate) fn encode_record(&self, record: &Record) -> Result<(String, String)> {
        let id = record
            .get(ID_FIELD)
            .filter(|id| !id.is_null())
            .ok_or_else(|| conversion_error(format!("Record of `{}` has no id.", self.name)))?;

        let key = self.key(id)?;
        let mut data = Map::new();

        for (name, value) in record {
            let coerced = match self.stored_type(name)? {
                StoredType::Scalar(scalar) => coerce_scalar(value.clone(), scalar)?,
                StoredType::Enum => coerce_enum(value.clone())?,
                StoredType::ScalarList(scalar) => coerce_list(value, |v| coerce_scalar(v, scalar))?,
                StoredType::EnumList => coerce_list(value, coerce_enum)?,
            };

            data.insert(name.clone(), encode_value(&coerced)?);
        }

        let data = serde_json::to_string(&JsonValue::Object(data))
            .map_err(|err| conversion_error(format!("Could not serialize record: {err}")))?;

        Ok((key, data))
    }

    /// Decodes a `data` column. Fields missing from the stored document are null.
    pub(crate) fn decode_record(&self, data: &str) -> Result<Record> {
        let mut document: Map<String, JsonValue> = serde_json::from_str(data)
            .map_err(|err| conversion_error(format!("Stored record of `{}` is not valid JSON: {err}", self.name)))?;

        let mut record = Record::with_capacity(self.fields.len());

        for (name, stored) in &self.fields {
            let json = document.remove(name).unwrap_or(JsonValue::Null);

            let value = match (*stored, json) {
                (_, JsonValue::Null) => EntityValue::Null,
                (StoredType::Scalar(scalar), json) => decode_scalar(json, scalar)?,
                (StoredType::Enum, json) => decode_enum(json)?,
                (StoredType::ScalarList(scalar), json) => decode_list(json, |j| decode_scalar(j, scalar))?,
                (StoredType::EnumList, json) => decode_list(json, decode_enum)?,
            };

            record.insert(name.clone(), value);
        }

        Ok(record)
    }
}

/// Type of the `id` field of an entity. Ids default to strings.
fn id_type(entity: Option<&Entity>) -> ScalarType {
    entity
        .and_then(|e| e.find_field(ID_FIELD))
        .and_then(|f| match f.kind {
            FieldKind::Scalar { scalar_type_name, .. } => Some(scalar_type_name),
            _ => None,
        })
        .unwrap_or(ScalarType::String)
}

fn coerce_list(value: &EntityValue, coerce: impl Fn(EntityValue) -> Result<EntityValue>) -> Result<EntityValue> {
    match value {
        EntityValue::Null => Ok(EntityValue::Null),
        EntityValue::List(values) => Ok(EntityValue::List(
            values.iter().cloned().map(coerce).collect::<Result<_>>()?,
        )),
        other => Err(conversion_error(format!("Value `{other}` is not a list."))),
    }
}

fn decode_list(json: JsonValue, decode: impl Fn(JsonValue) -> Result<EntityValue>) -> Result<EntityValue> {
    match json {
        JsonValue::Array(values) => Ok(EntityValue::List(values.into_iter().map(decode).collect::<Result<_>>()?)),
        other => Err(conversion_error(format!("Stored value `{other}` is not a list."))),
    }
}
