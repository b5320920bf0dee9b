use crate::{EngineResult, LogFormat, error::EngineError};
use tracing::subscriber;
use tracing_subscriber::{EnvFilter, Layer, filter::Directive, layer::SubscriberExt};

/// Crates whose level follows `QE_LOG_LEVEL`.
const ENGINE_CRATES: &[&str] = &[
    "query_engine",
    "query_core",
    "query_connector",
    "sqlite_query_connector",
    "schema",
];

/// An installer for a global logger. Logs go to stderr, stdout is reserved for command output.
#[derive(Debug, Clone)]
pub struct Logger {
    log_format: LogFormat,
    log_queries: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            log_format: LogFormat::Text,
            log_queries: false,
        }
    }

    /// Sets the log output format. Default: Text.
    pub fn log_format(&mut self, log_format: LogFormat) {
        self.log_format = log_format;
    }

    /// Enable query logging. Default: false.
    pub fn log_queries(&mut self, log_queries: bool) {
        self.log_queries = log_queries;
    }

    /// Install logger as a global. Can be called only once per application instance.
    pub fn install(&self) -> EngineResult<()> {
        let filter = create_env_filter(self.log_queries, std::env::var("QE_LOG_LEVEL").ok().as_deref())?;

        let fmt_layer = match self.log_format {
            LogFormat::Text => tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_filter(filter)
                .boxed(),
        };

        let subscriber = tracing_subscriber::registry().with(fmt_layer);

        subscriber::set_global_default(subscriber)
            .map_err(|err| EngineError::ConfigurationError(format!("Could not install the logger: {err}")))
    }
}

fn directive(s: &str) -> EngineResult<Directive> {
    s.parse()
        .map_err(|err| EngineError::ConfigurationError(format!("Invalid log directive `{s}`: {err}")))
}

pub(crate) fn create_env_filter(log_queries: bool, qe_log_level: Option<&str>) -> EngineResult<EnvFilter> {
    let mut filter = EnvFilter::from_default_env();

    if let Some(level) = qe_log_level {
        for krate in ENGINE_CRATES {
            filter = filter.add_directive(directive(&format!("{krate}={level}"))?);
        }
    }

    if log_queries {
        filter = filter.add_directive(directive("sqlite_query_connector=debug")?);
    }

    Ok(filter)
}
