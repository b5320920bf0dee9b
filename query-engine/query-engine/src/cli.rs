use crate::{
    EngineResult,
    context::EngineContext,
    opt::{EngineOpt, Subcommand},
    seed::{self, SeedOperation},
};
use query_core::QueryDocument;
use std::path::PathBuf;

pub enum CliCommand {
    Sdl,
    Seed(PathBuf),
    Execute(PathBuf),
}

impl CliCommand {
    /// Create a CLI command from an `EngineOpt` instance.
    pub fn from_opt(opts: &EngineOpt) -> EngineResult<CliCommand> {
        Ok(match &opts.subcommand {
            Subcommand::Sdl => CliCommand::Sdl,
            Subcommand::Seed(input) => CliCommand::Seed(input.data.clone()),
            Subcommand::Execute(input) => CliCommand::Execute(input.query.clone()),
        })
    }

    /// Runs the command and returns what it prints.
    pub async fn execute(self, cx: &EngineContext) -> EngineResult<String> {
        match self {
            CliCommand::Sdl => Ok(schema::render_graphql_schema(cx.registry())),
            CliCommand::Seed(path) => Self::seed(cx, std::fs::read_to_string(path)?).await,
            CliCommand::Execute(path) => Self::execute_request(cx, std::fs::read_to_string(path)?).await,
        }
    }

    async fn seed(cx: &EngineContext, data: String) -> EngineResult<String> {
        let operations: Vec<SeedOperation> = serde_json::from_str(&data)?;
        let applied = seed::apply(cx.store(), operations).await?;

        Ok(format!("Applied {applied} operations."))
    }

    async fn execute_request(cx: &EngineContext, query: String) -> EngineResult<String> {
        let document = QueryDocument::from_json(&query)?;
        let response = cx.executor().execute(document).await;

        Ok(serde_json::to_string(&response)?)
    }
}
