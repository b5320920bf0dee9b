use entity_value::EntityValue;
use query_connector::{StoreError, StoreKind, error::ConnectorError};

/// Wraps a failed statement with the statement text and what was bound to it.
pub(crate) fn wrap(statement: &str, parameters: &[EntityValue], err: rusqlite::Error) -> ConnectorError {
    tracing::debug!(error = %err, query = %statement, "SQLite statement failed");

    ConnectorError::from(StoreError::new(StoreKind::Sqlite, statement, parameters, err))
}
