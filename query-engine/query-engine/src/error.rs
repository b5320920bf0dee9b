use query_connector::error::ConnectorError;
use query_core::CoreError;
use schema::SchemaError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("{}", _0)]
    CoreError(#[from] CoreError),

    #[error("{}", _0)]
    ConnectorError(#[from] ConnectorError),

    #[error("Error in entity schema: {}", _0)]
    SchemaError(#[from] SchemaError),

    #[error("{}", _0)]
    ConfigurationError(String),

    #[error("{}", _0)]
    JsonDecodeError(String),

    #[error("{}", _0)]
    IOError(String),

    #[error("Invalid seed operation #{index}: {message}")]
    SeedError { index: usize, message: String },
}

/// Shape of the single line written to stderr on failure.
#[derive(Debug, Serialize)]
struct RenderedError {
    is_panic: bool,
    message: String,
}

impl EngineError {
    /// Writes the error as one JSON line to stderr.
    pub fn render_as_json(&self) -> std::io::Result<()> {
        use std::io::Write as _;

        let error = RenderedError {
            is_panic: false,
            message: self.to_string(),
        };

        let stderr = std::io::stderr();
        let locked_stderr = stderr.lock();
        let mut writer = std::io::LineWriter::new(locked_stderr);
        serde_json::to_writer(&mut writer, &error)?;
        writeln!(&mut writer)?;
        writer.flush()?;

        Ok(())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> EngineError {
        EngineError::JsonDecodeError(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> EngineError {
        EngineError::IOError(e.to_string())
    }
}
