//! The CLI can do a few things. This provides a central point where those things are routed and
//! then done, making it easier to test this crate deterministically.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use query_engine_translation::translation;
use query_engine_translation::translation::arguments::FieldArguments;
use query_engine_translation::translation::compile::SimpleSelectCompiler;
use query_engine_translation::translation::context::RequestContext;
use sql_bridge::setup::BridgeSetup;
use sql_bridge_configuration as configuration;
use sql_bridge_configuration::environment::Environment;

/// The various contextual bits and bobs we need to run.
pub struct Context<Env: Environment> {
    pub context_path: PathBuf,
    pub environment: Env,
}

/// The command invoked by the user.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Write a default configuration into the context directory.
    Initialize,
    /// Print the JSON schema of the configuration file.
    PrintSchema,
    /// Resolve a field's predicate and print the SQL it compiles to, without running it.
    Explain {
        /// The root field to explain.
        #[arg(long)]
        field: String,
        /// The field's arguments, as a JSON object.
        #[arg(long, default_value = "{}")]
        arguments: String,
    },
}

/// Run a command in a given directory, writing any output to `out`.
pub async fn run(
    command: Command,
    context: Context<impl Environment>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        Command::Initialize => initialize(&context.context_path).await?,
        Command::PrintSchema => print_schema(out)?,
        Command::Explain { field, arguments } => {
            explain(context, &field, &arguments, out).await?;
        }
    };
    Ok(())
}

/// Initialize an empty directory with a default configuration.
///
/// Refuses to overwrite an existing configuration file.
async fn initialize(context_path: &Path) -> anyhow::Result<()> {
    let configuration_file = context_path.join(configuration::version1::CONFIGURATION_FILENAME);
    if tokio::fs::try_exists(&configuration_file).await? {
        anyhow::bail!(
            "a configuration already exists at {}",
            configuration_file.display()
        );
    }

    configuration::write_parsed_configuration(
        configuration::ParsedConfiguration::initial(),
        context_path,
    )
    .await?;
    Ok(())
}

fn print_schema(out: &mut impl Write) -> anyhow::Result<()> {
    let schema = configuration::generate_latest_schema();
    writeln!(out, "{}", serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}

async fn explain(
    context: Context<impl Environment>,
    field: &str,
    arguments: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let arguments: FieldArguments = serde_json::from_str(arguments)?;
    let configuration = BridgeSetup::new(context.environment)
        .parse_configuration(&context.context_path)
        .await?;

    let sql = translation::query::translate(
        &configuration.metadata,
        configuration.argument_conflicts,
        &SimpleSelectCompiler {
            minify: configuration.minify,
        },
        field,
        &arguments,
        &RequestContext::new(),
    )
    .await?;

    writeln!(out, "{sql}")?;
    Ok(())
}
