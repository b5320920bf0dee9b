//! Record writes applied by the `seed` command.
//!
//! ```json
//! [
//!   { "entity": "Account", "timestamp": 1, "record": { "id": "0xa" } },
//!   { "entity": "Token", "timestamp": 2, "record": { "id": "t1", "owner": "0xa", "value": "10" } },
//!   { "entity": "Token", "timestamp": 3, "deleteId": "t1" }
//! ]
//! ```

use crate::{EngineResult, error::EngineError};
use entity_value::{EntityValue, Record};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sqlite_query_connector::SqliteStore;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedOperation {
    pub entity: String,
    pub timestamp: i64,
    #[serde(default)]
    pub record: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub delete_id: Option<JsonValue>,
}

/// Applies `operations` in order and returns the number applied.
#[tracing::instrument(skip_all, fields(operations = operations.len()))]
pub async fn apply(store: &SqliteStore, operations: Vec<SeedOperation>) -> EngineResult<usize> {
    for (index, op) in operations.iter().enumerate() {
        let seed_error = |message: String| EngineError::SeedError { index, message };

        match (&op.record, &op.delete_id) {
            (Some(record), None) => {
                let record = record
                    .iter()
                    .map(|(k, v)| Ok((k.clone(), EntityValue::try_from(v.clone())?)))
                    .collect::<Result<Record, entity_value::ConversionFailure>>()
                    .map_err(|err| seed_error(err.to_string()))?;

                store.upsert_record(&op.entity, &record, op.timestamp).await?;
            }
            (None, Some(id)) => {
                let id = EntityValue::try_from(id.clone()).map_err(|err| seed_error(err.to_string()))?;
                store.delete_record(&op.entity, &id, op.timestamp).await?;
            }
            _ => return Err(seed_error("exactly one of `record` and `deleteId` must be set.".into())),
        }

        tracing::debug!(entity = %op.entity, timestamp = op.timestamp, "Applied seed operation");
    }

    Ok(operations.len())
}
