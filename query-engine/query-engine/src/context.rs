use crate::EngineResult;
use query_core::Executor;
use schema::{EntitySchema, TypeRegistryRef};
use sqlite_query_connector::SqliteStore;
use std::{fmt, path::Path, sync::Arc};

/// Immutable state of the process: the compiled type graph, the store and the executor
/// running queries against both.
pub struct EngineContext {
    registry: TypeRegistryRef,
    store: Arc<SqliteStore>,
    executor: Executor,
}

impl fmt::Debug for EngineContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EngineContext { .. }")
    }
}

impl EngineContext {
    /// Reads the entity schema at `schema_path` and opens the store at `database`.
    pub fn new(schema_path: &Path, database: &str) -> EngineResult<Self> {
        let schema: EntitySchema = serde_json::from_str(&std::fs::read_to_string(schema_path)?)?;

        Self::from_schema(schema, database)
    }

    pub fn from_schema(entity_schema: EntitySchema, database: &str) -> EngineResult<Self> {
        let registry = schema::build(entity_schema)?;
        let store = Arc::new(SqliteStore::new(database, registry.schema())?);
        let executor = Executor::new(registry.clone(), store.clone());

        tracing::info!(database, types = registry.object_types().count(), "Engine context ready");

        Ok(Self {
            registry,
            store,
            executor,
        })
    }

    pub fn registry(&self) -> &TypeRegistryRef {
        &self.registry
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}
