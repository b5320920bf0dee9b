//! SQL for the versioned entity tables. Table and field names are validated identifiers;
//! everything else is bound.

use crate::{LATEST, table::Table};
use entity_value::EntityValue;
use query_connector::{Filter, Result};
use std::fmt::Write;

/// A statement together with the parameters bound to it, in order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statement {
    pub(crate) sql: String,
    pub(crate) params: Vec<EntityValue>,
}

impl Statement {
    fn new(sql: String, params: Vec<EntityValue>) -> Self {
        Self { sql, params }
    }
}

fn json_path(field: &str) -> EntityValue {
    EntityValue::String(format!("$.{field}"))
}

pub(crate) fn create_table(table: &Table) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS \"{}\" (\
         id TEXT NOT NULL, \
         data TEXT NOT NULL, \
         effective_from INTEGER NOT NULL, \
         effective_to INTEGER NOT NULL, \
         PRIMARY KEY (id, effective_from))",
        table.name
    )
}

pub(crate) fn find_latest(table: &Table, key: String) -> Statement {
    Statement::new(
        format!(
            "SELECT data FROM \"{}\" WHERE id = ? AND effective_to = ?",
            table.name
        ),
        vec![EntityValue::String(key), EntityValue::Int(LATEST)],
    )
}

pub(crate) fn latest_version_start(table: &Table, key: &str) -> Statement {
    Statement::new(
        format!(
            "SELECT effective_from FROM \"{}\" WHERE id = ? AND effective_to = ?",
            table.name
        ),
        vec![key.into(), EntityValue::Int(LATEST)],
    )
}

pub(crate) fn find_many(table: &Table, filter: &Filter) -> Result<Statement> {
    let mut sql = format!("SELECT data FROM \"{}\" WHERE ", table.name);
    let mut params = Vec::new();

    match filter.timestamp {
        Some(timestamp) => {
            sql.push_str("effective_from <= ? AND effective_to > ?");
            params.extend([EntityValue::Int(timestamp), EntityValue::Int(timestamp)]);
        }
        None => {
            sql.push_str("effective_to = ?");
            params.push(EntityValue::Int(LATEST));
        }
    }

    for (field, value) in &filter.where_ {
        let parameter = table.condition_parameter(field, value)?;

        sql.push_str(" AND json_extract(data, ?) = ?");
        params.extend([json_path(field), parameter]);
    }

    table.stored_type(&filter.order_by)?;

    let direction = filter.order_direction.as_str().to_uppercase();
    let _ = write!(sql, " ORDER BY json_extract(data, ?) {direction}, id ASC LIMIT ? OFFSET ?");
    params.extend([
        json_path(&filter.order_by),
        EntityValue::Int(filter.first),
        EntityValue::Int(filter.skip),
    ]);

    Ok(Statement::new(sql, params))
}

/// Drops a latest version that started exactly at `timestamp`; a second write in the
/// same timestamp replaces the first.
pub(crate) fn delete_same_version(table: &Table, key: &str, timestamp: i64) -> Statement {
    Statement::new(
        format!(
            "DELETE FROM \"{}\" WHERE id = ? AND effective_from = ? AND effective_to = ?",
            table.name
        ),
        vec![key.into(), EntityValue::Int(timestamp), EntityValue::Int(LATEST)],
    )
}

pub(crate) fn close_latest(table: &Table, key: &str, timestamp: i64) -> Statement {
    Statement::new(
        format!(
            "UPDATE \"{}\" SET effective_to = ? WHERE id = ? AND effective_to = ?",
            table.name
        ),
        vec![EntityValue::Int(timestamp), key.into(), EntityValue::Int(LATEST)],
    )
}

pub(crate) fn insert_version(table: &Table, key: String, data: String, timestamp: i64) -> Statement {
    Statement::new(
        format!(
            "INSERT INTO \"{}\" (id, data, effective_from, effective_to) VALUES (?, ?, ?, ?)",
            table.name
        ),
        vec![
            EntityValue::String(key),
            EntityValue::String(data),
            EntityValue::Int(timestamp),
            EntityValue::Int(LATEST),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use query_connector::SortOrder;
    use schema::{Entity, EntitySchema, Field, ScalarType};

    fn token_table() -> Table {
        let entity = Entity::new(
            "Token",
            vec![
                Field::scalar("id", ScalarType::String, true),
                Field::scalar("owner", ScalarType::String, true),
                Field::scalar("balance", ScalarType::BigInt, false),
            ],
        );

        Table::from_entity(&EntitySchema::new(vec![entity.clone()]), &entity).unwrap()
    }

    #[test]
    fn find_many_at_a_timestamp() {
        let filter = Filter::default()
            .where_eq("owner", "0xa")
            .order_by("balance", SortOrder::Desc)
            .first(5)
            .skip(2)
            .at(Some(7));

        let statement = find_many(&token_table(), &filter).unwrap();

        assert_eq!(
            statement.sql,
            "SELECT data FROM \"Token\" WHERE effective_from <= ? AND effective_to > ? \
             AND json_extract(data, ?) = ? \
             ORDER BY json_extract(data, ?) DESC, id ASC LIMIT ? OFFSET ?"
        );

        assert_eq!(
            statement.params,
            vec![
                EntityValue::Int(7),
                EntityValue::Int(7),
                "$.owner".into(),
                "0xa".into(),
                "$.balance".into(),
                EntityValue::Int(5),
                EntityValue::Int(2),
            ]
        );
    }

    #[test]
    fn find_many_latest() {
        let statement = find_many(&token_table(), &Filter::default()).unwrap();

        assert_eq!(
            statement.sql,
            "SELECT data FROM \"Token\" WHERE effective_to = ? ORDER BY json_extract(data, ?) ASC, id ASC LIMIT ? OFFSET ?"
        );
        assert_eq!(statement.params[0], EntityValue::Int(LATEST));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let filter = Filter::default().order_by("nope", SortOrder::Asc);
        assert!(find_many(&token_table(), &filter).is_err());

        let filter = Filter::default().where_eq("nope", 1i64);
        assert!(find_many(&token_table(), &filter).is_err());
    }
}
