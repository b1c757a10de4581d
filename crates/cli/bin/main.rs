//! The CLI for the SQL bridge.

use std::path::PathBuf;

use clap::Parser;

use sql_bridge_cli::{run, Command, Context};
use sql_bridge_configuration::environment::ProcessEnvironment;

/// The SQL bridge command-line interface.
#[derive(Debug, Clone, Parser)]
#[command(author, version = sql_bridge::VERSION, about, long_about = None)]
pub struct Args {
    /// The path to the configuration directory.
    #[arg(long = "context", env = "SQL_BRIDGE_CONTEXT_PATH", value_name = "DIRECTORY")]
    pub context_path: Option<PathBuf>,
    /// The command to invoke.
    #[command(subcommand)]
    pub subcommand: Command,
}

/// The application entrypoint. It pulls information from the environment and then calls the [run]
/// function. The library remains unaware of the environment, so that we can more easily test it.
#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let context_path = match args.context_path {
        None => std::env::current_dir()?,
        Some(path) => path,
    };
    let context = Context {
        context_path,
        environment: ProcessEnvironment,
    };
    run(args.subcommand, context, &mut std::io::stdout()).await?;
    Ok(())
}
