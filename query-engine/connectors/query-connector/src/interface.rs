use crate::Filter;
use async_trait::async_trait;
use entity_value::{EntityValue, Record};

/// A store the query core can read entity records from.
pub trait Connector: ReadOperations + Send + Sync {
    /// Name of the storage system, for logs and diagnostics.
    fn name(&self) -> &'static str;
}

#[async_trait]
pub trait ReadOperations {
    /// Gets a single record by id from the latest state of the store.
    async fn find_unique(&self, model_name: &str, id: &EntityValue) -> crate::Result<Option<Record>>;

    /// Gets the records matching `filter.where`, ordered by `orderBy` and
    /// `orderDirection` and then by id ascending, after skipping `skip` and
    /// taking at most `first`. Evaluated at `filter.timestamp` if set.
    async fn find_many(&self, model_name: &str, filter: Filter) -> crate::Result<Vec<Record>>;
}
