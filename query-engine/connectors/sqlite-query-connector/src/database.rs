use crate::{
    error::wrap,
    query_builder::{self, Statement},
    table::Table,
    value::to_sql,
};
use async_trait::async_trait;
use entity_value::{EntityValue, Record};
use indexmap::IndexMap;
use itertools::Itertools;
use query_connector::{
    Connector, Filter, ReadOperations, Result,
    error::{ConnectorError, ErrorKind},
};
use rusqlite::{Connection, params_from_iter, types::FromSql};
use schema::EntitySchema;
use tokio::sync::Mutex;

const IN_MEMORY: &str = ":memory:";

/// Versioned entity store on top of a single SQLite connection.
///
/// Every write at timestamp `T` closes the latest version of the record at `T` and opens
/// a new one valid from `T`. A write before the start of the latest version is rejected.
pub struct SqliteStore {
    connection: Mutex<Connection>,
    tables: IndexMap<String, Table>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").field("tables", &self.tables.keys()).finish()
    }
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and creates a table per entity.
    /// `:memory:` opens a private in-memory database.
    #[tracing::instrument(skip(schema))]
    pub fn new(path: &str, schema: &EntitySchema) -> Result<Self> {
        let connection = match path {
            IN_MEMORY => Connection::open_in_memory(),
            path => Connection::open(path),
        };

        let connection =
            connection.map_err(|err| ConnectorError::from_kind(ErrorKind::ConnectionError(err.to_string())))?;

        let tables = schema
            .entities
            .iter()
            .map(|entity| -> Result<(String, Table)> { Ok((entity.name.clone(), Table::from_entity(schema, entity)?)) })
            .collect::<Result<IndexMap<_, _>>>()?;

        create_tables(&connection, &tables)?;

        tracing::info!(tables = tables.len(), "Opened SQLite store");

        Ok(Self {
            connection: Mutex::new(connection),
            tables,
        })
    }

    pub fn in_memory(schema: &EntitySchema) -> Result<Self> {
        Self::new(IN_MEMORY, schema)
    }

    /// Creates the table of every entity that does not have one yet.
    pub async fn create_tables(&self) -> Result<()> {
        let connection = self.connection.lock().await;
        create_tables(&connection, &self.tables)
    }

    fn table(&self, model_name: &str) -> Result<&Table> {
        self.tables.get(model_name).ok_or_else(|| {
            ConnectorError::from_kind(ErrorKind::UnknownModel {
                model: model_name.to_owned(),
            })
        })
    }

    /// Writes a new version of `record` valid from `timestamp`.
    pub async fn upsert_record(&self, model_name: &str, record: &Record, timestamp: i64) -> Result<()> {
        let table = self.table(model_name)?;
        let (key, data) = table.encode_record(record)?;

        let mut connection = self.connection.lock().await;
        let tx = transaction(&mut connection)?;

        ensure_in_order(&tx, table, &key, timestamp)?;
        run(&tx, query_builder::delete_same_version(table, &key, timestamp))?;
        run(&tx, query_builder::close_latest(table, &key, timestamp))?;
        run(&tx, query_builder::insert_version(table, key, data, timestamp))?;

        tx.commit().map_err(|err| wrap("COMMIT", &[], err))
    }

    /// Ends the latest version of a record at `timestamp`.
    pub async fn delete_record(&self, model_name: &str, id: &EntityValue, timestamp: i64) -> Result<()> {
        let table = self.table(model_name)?;
        let key = table.key(id)?;

        let mut connection = self.connection.lock().await;
        let tx = transaction(&mut connection)?;

        ensure_in_order(&tx, table, &key, timestamp)?;
        run(&tx, query_builder::delete_same_version(table, &key, timestamp))?;
        run(&tx, query_builder::close_latest(table, &key, timestamp))?;

        tx.commit().map_err(|err| wrap("COMMIT", &[], err))
    }
}

impl Connector for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[async_trait]
impl ReadOperations for SqliteStore {
    #[tracing::instrument(skip(self), fields(id = %id))]
    async fn find_unique(&self, model_name: &str, id: &EntityValue) -> Result<Option<Record>> {
        let table = self.table(model_name)?;
        let statement = query_builder::find_latest(table, table.key(id)?);

        let connection = self.connection.lock().await;
        let rows: Vec<String> = query(&connection, &statement)?;

        rows.first().map(|data| table.decode_record(data)).transpose()
    }

    #[tracing::instrument(skip(self, filter))]
    async fn find_many(&self, model_name: &str, filter: Filter) -> Result<Vec<Record>> {
        let table = self.table(model_name)?;
        let statement = query_builder::find_many(table, &filter)?;

        let connection = self.connection.lock().await;
        let rows: Vec<String> = query(&connection, &statement)?;

        rows.iter().map(|data| table.decode_record(data)).collect()
    }
}

/// Fails if the latest version of `key` starts after `timestamp`.
fn ensure_in_order(connection: &Connection, table: &Table, key: &str, timestamp: i64) -> Result<()> {
    let starts: Vec<i64> = query(connection, &query_builder::latest_version_start(table, key))?;

    match starts.first() {
        Some(&latest) if latest > timestamp => Err(ConnectorError::from_kind(ErrorKind::OutOfOrderWrite {
            model: table.name.clone(),
            id: key.to_owned(),
            timestamp,
            latest,
        })),
        _ => Ok(()),
    }
}

fn create_tables(connection: &Connection, tables: &IndexMap<String, Table>) -> Result<()> {
    for table in tables.values() {
        execute(connection, &query_builder::create_table(table), &[])?;
    }

    Ok(())
}

fn log_query(sql: &str, params: &[EntityValue]) {
    tracing::debug!(
        is_query = true,
        query = %sql,
        params = %format!("[{}]", params.iter().join(",")),
        "Executing query"
    );
}

fn transaction(connection: &mut Connection) -> Result<rusqlite::Transaction<'_>> {
    connection.transaction().map_err(|err| wrap("BEGIN", &[], err))
}

fn execute(connection: &Connection, sql: &str, params: &[EntityValue]) -> Result<usize> {
    log_query(sql, params);

    let mut stmt = connection.prepare_cached(sql).map_err(|err| wrap(sql, params, err))?;

    stmt.execute(params_from_iter(params.iter().map(to_sql)))
        .map_err(|err| wrap(sql, params, err))
}

fn run(connection: &Connection, statement: Statement) -> Result<usize> {
    execute(connection, &statement.sql, &statement.params)
}

/// Runs a statement selecting a single column.
fn query<T: FromSql>(connection: &Connection, statement: &Statement) -> Result<Vec<T>> {
    let Statement { sql, params } = statement;
    log_query(sql, params);

    let wrap_err = |err| wrap(sql, params, err);

    let mut stmt = connection.prepare_cached(sql).map_err(wrap_err)?;
    let mut rows = stmt.query(params_from_iter(params.iter().map(to_sql))).map_err(wrap_err)?;
    let mut result = Vec::new();

    while let Some(row) = rows.next().map_err(wrap_err)? {
        result.push(row.get::<_, T>(0).map_err(wrap_err)?);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{Entity, Field, ScalarType};
    use tracing_test::traced_test;

    #[traced_test]
    #[tokio::test]
    async fn queries_are_logged_with_their_parameters() {
        let schema = EntitySchema::new(vec![Entity::new(
            "Account",
            vec![Field::scalar("id", ScalarType::String, true)],
        )]);

        let store = SqliteStore::in_memory(&schema).unwrap();
        store.find_unique("Account", &"0xa".into()).await.unwrap();

        assert!(logs_contain("Executing query"));
        assert!(logs_contain("is_query=true"));
        assert!(logs_contain("SELECT data FROM \"Account\" WHERE id = ? AND effective_to = ?"));
    }
}
