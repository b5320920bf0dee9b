use query_engine::{cli::CliCommand, context::EngineContext, error::EngineError, logger::Logger, opt::EngineOpt};
use std::process;
use structopt::StructOpt;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::info!("Encountered error during initialization:");

        if let Err(render_err) = err.render_as_json() {
            eprintln!("{render_err}");
        }

        process::exit(1);
    }
}

async fn run() -> Result<(), EngineError> {
    let opts = EngineOpt::from_args();

    let mut logger = Logger::new();
    logger.log_format(opts.log_format());
    logger.log_queries(opts.log_queries);
    logger.install()?;

    let command = CliCommand::from_opt(&opts)?;
    let cx = EngineContext::new(&opts.schema, &opts.database)?;

    let output = command.execute(&cx).await?;
    println!("{output}");

    Ok(())
}
