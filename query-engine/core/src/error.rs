use query_connector::error::ConnectorError;
use schema::SchemaError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Error in connector: {}", _0)]
    ConnectorError(#[from] ConnectorError),

    #[error("Error in schema: {}", _0)]
    SchemaError(#[from] SchemaError),

    #[error("Invalid query document: {}", _0)]
    QueryDocumentError(String),

    #[error("{}", _0)]
    InvalidArgument(String),

    #[error("Referential inconsistency: `{field}` references a `{entity}` with id `{id}` that does not exist.")]
    RecordNotFound { field: String, entity: String, id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    UnknownField,
    InvalidArgument,
    RecordNotFound,
    NullabilityViolation,
    TypeMismatch,
    Connector,
}

/// One segment of the path from the response root to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

pub type Path = Vec<PathSegment>;

/// An error local to a single field of the response. The field's slot is null; the rest
/// of the response is unaffected.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct FieldError {
    pub message: String,
    pub path: Path,
    #[serde(skip)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(kind: FieldErrorKind, message: impl Into<String>, path: Path) -> Self {
        Self {
            message: message.into(),
            path,
            kind,
        }
    }

    pub(crate) fn from_core(err: CoreError, path: Path) -> Self {
        let kind = match &err {
            CoreError::InvalidArgument(_) => FieldErrorKind::InvalidArgument,
            CoreError::RecordNotFound { .. } => FieldErrorKind::RecordNotFound,
            CoreError::ConnectorError(_) | CoreError::SchemaError(_) | CoreError::QueryDocumentError(_) => {
                FieldErrorKind::Connector
            }
        };

        Self::new(kind, err.to_string(), path)
    }
}
