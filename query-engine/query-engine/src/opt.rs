use crate::LogFormat;
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(Debug, StructOpt, Clone)]
pub enum Subcommand {
    /// Prints the GraphQL schema compiled from the entity schema.
    Sdl,
    /// Applies a JSON file of record writes to the store.
    Seed(SeedInput),
    /// Executes a JSON query document and prints the response.
    Execute(ExecuteInput),
}

#[derive(Debug, StructOpt, Clone)]
pub struct SeedInput {
    /// Path to a JSON array of `{ entity, timestamp, record | deleteId }` writes.
    #[structopt(long, parse(from_os_str))]
    pub data: PathBuf,
}

#[derive(Debug, StructOpt, Clone)]
pub struct ExecuteInput {
    /// Path to the JSON query document.
    #[structopt(long, parse(from_os_str))]
    pub query: PathBuf,
}

#[derive(Debug, StructOpt, Clone)]
#[structopt(name = "query-engine")]
pub struct EngineOpt {
    /// Path to the entity schema JSON file.
    #[structopt(long, env = "ENTITY_SCHEMA_PATH", parse(from_os_str))]
    pub schema: PathBuf,

    /// Path to the SQLite database. `:memory:` keeps everything in memory.
    #[structopt(long, env = "DATABASE_PATH", default_value = ":memory:")]
    pub database: String,

    /// Set the log format.
    #[structopt(long = "log-format", env = "RUST_LOG_FORMAT", possible_values = &["text", "json"])]
    pub log_format: Option<String>,

    /// Enables logging of all SQL statements the store executes.
    #[structopt(long)]
    pub log_queries: bool,

    #[structopt(subcommand)]
    pub subcommand: Subcommand,
}

impl EngineOpt {
    pub fn log_format(&self) -> LogFormat {
        match self.log_format.as_deref() {
            Some("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}
