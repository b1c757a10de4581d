//! Running the CLI commands against temporary configuration directories.

use sql_bridge_cli::{run, Command, Context};
use sql_bridge_configuration::environment::EmptyEnvironment;
use sql_bridge_configuration::version1::CONFIGURATION_FILENAME;
use tests_common::deployment::{get_path_from_project_root, test_environment, STATIC_DEPLOYMENT_PATH};

#[tokio::test]
async fn initialize_writes_a_parseable_configuration() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };

    run(Command::Initialize, context, &mut Vec::new()).await?;

    let parsed = sql_bridge_configuration::parse_configuration(dir.path()).await?;
    assert_eq!(parsed, sql_bridge_configuration::ParsedConfiguration::initial());
    Ok(())
}

#[tokio::test]
async fn initialize_refuses_to_overwrite() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join(CONFIGURATION_FILENAME), "{}")?;
    let context = Context {
        context_path: dir.path().to_owned(),
        environment: EmptyEnvironment,
    };

    let result = run(Command::Initialize, context, &mut Vec::new()).await;

    assert!(result.is_err());
    assert_eq!(
        std::fs::read_to_string(dir.path().join(CONFIGURATION_FILENAME))?,
        "{}"
    );
    Ok(())
}

#[tokio::test]
async fn print_schema_describes_the_configuration() -> anyhow::Result<()> {
    let context = Context {
        context_path: std::env::temp_dir(),
        environment: EmptyEnvironment,
    };
    let mut out = Vec::new();

    run(Command::PrintSchema, context, &mut out).await?;

    let schema: serde_json::Value = serde_json::from_slice(&out)?;
    assert!(schema["properties"]["connectionUri"].is_object());
    assert!(schema["properties"]["argumentConflicts"].is_object());
    Ok(())
}

#[tokio::test]
async fn explain_prints_the_compiled_sql() -> anyhow::Result<()> {
    let context = Context {
        context_path: get_path_from_project_root(STATIC_DEPLOYMENT_PATH),
        environment: test_environment(),
    };
    let mut out = Vec::new();

    run(
        Command::Explain {
            field: "user".to_string(),
            arguments: r#"{"idEncoded": "NDI="}"#.to_string(),
        },
        context,
        &mut out,
    )
    .await?;

    let sql = String::from_utf8(out)?;
    assert!(sql.contains(r#""accounts" AS "user""#));
    assert!(sql.contains("WHERE"));
    assert!(sql.contains("= 42"));
    Ok(())
}

#[tokio::test]
async fn explain_reports_unknown_fields() {
    let context = Context {
        context_path: get_path_from_project_root(STATIC_DEPLOYMENT_PATH),
        environment: test_environment(),
    };

    let result = run(
        Command::Explain {
            field: "nobody".to_string(),
            arguments: "{}".to_string(),
        },
        context,
        &mut Vec::new(),
    )
    .await;

    assert_eq!(
        result.map_err(|err| err.to_string()),
        Err("Field 'nobody' not found.".to_string())
    );
}
