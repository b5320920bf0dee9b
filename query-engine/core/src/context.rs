use crate::FieldError;
use parking_lot::Mutex;
use query_connector::Connector;
use std::sync::Arc;

/// State of a single request: the store handle and the errors collected so far.
pub(crate) struct RequestContext {
    pub(crate) store: Arc<dyn Connector>,
    errors: Mutex<Vec<FieldError>>,
}

impl RequestContext {
    pub(crate) fn new(store: Arc<dyn Connector>) -> Self {
        Self {
            store,
            errors: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn push_error(&self, error: FieldError) {
        tracing::debug!(path = ?error.path, kind = ?error.kind, "{}", error.message);
        self.errors.lock().push(error);
    }

    pub(crate) fn into_errors(self) -> Vec<FieldError> {
        self.errors.into_inner()
    }
}
