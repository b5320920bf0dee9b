use crate::StoreError;
use entity_value::ConversionFailure;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("{}", kind)]
pub struct ConnectorError {
    /// The error information for internal use.
    pub kind: ErrorKind,
}

impl ConnectorError {
    pub fn from_kind(kind: ErrorKind) -> Self {
        ConnectorError { kind }
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("{0}")]
    Store(StoreError),

    #[error("Error opening the store. ({0})")]
    ConnectionError(String),

    #[error("Entity `{model}` does not exist in the store.")]
    UnknownModel { model: String },

    #[error("Field `{field}` does not exist on entity `{model}`.")]
    UnknownField { model: String, field: String },

    #[error("`{name}` is not a valid identifier.")]
    InvalidIdentifier { name: String },

    #[error(
        "Write to `{model}` with id `{id}` at timestamp {timestamp} precedes its latest version, valid from {latest}."
    )]
    OutOfOrderWrite {
        model: String,
        id: String,
        timestamp: i64,
        latest: i64,
    },

    #[error("Conversion error: {0}")]
    ConversionError(String),
}

impl From<StoreError> for ConnectorError {
    fn from(e: StoreError) -> ConnectorError {
        ConnectorError::from_kind(ErrorKind::Store(e))
    }
}

impl From<ConversionFailure> for ConnectorError {
    fn from(e: ConversionFailure) -> ConnectorError {
        ConnectorError::from_kind(ErrorKind::ConversionError(e.to_string()))
    }
}
