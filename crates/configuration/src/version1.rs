//! The version 1 configuration format.

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tokio::fs;

use query_engine_metadata::metadata;

use crate::error::{ParseConfigurationError, WriteParsedConfigurationError};
use crate::values::{ArgumentConflicts, ConnectionUri, PoolSettings, Secret};

pub const CURRENT_VERSION: u32 = 1;
pub const CONFIGURATION_FILENAME: &str = "configuration.json";
pub const DEFAULT_CONNECTION_URI_VARIABLE: &str = "SQL_BRIDGE_CONNECTION_URI";
pub const DEFAULT_CLIENT: &str = "pg";

/// Initial configuration, just enough to connect to a database and elaborate a full
/// 'Configuration'.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParsedConfiguration {
    /// Which version of the configuration format are we using
    pub version: u32,
    /// Connection string for the database
    pub connection_uri: ConnectionUri,
    /// Identity of the database driver, e.g. `pg` or `mysql`. The result dialect is derived from it.
    #[serde(default = "client_default")]
    pub client: String,
    /// Emit compiled SQL on a single line
    #[serde(default)]
    pub minify: bool,
    /// Copy the executed SQL into the request's diagnostic channel. For debugging only.
    #[serde(default)]
    pub diagnostics: bool,
    #[serde(default)]
    #[serde(skip_serializing_if = "ArgumentConflicts::is_default")]
    pub argument_conflicts: ArgumentConflicts,
    #[serde(default)]
    #[serde(skip_serializing_if = "PoolSettings::is_default")]
    pub pool_settings: PoolSettings,
    #[serde(default)]
    pub metadata: metadata::Metadata,
}

fn client_default() -> String {
    DEFAULT_CLIENT.to_string()
}

impl ParsedConfiguration {
    pub fn initial() -> Self {
        ParsedConfiguration::empty()
    }

    pub fn empty() -> Self {
        Self {
            version: CURRENT_VERSION,
            connection_uri: ConnectionUri(Secret::FromEnvironment {
                variable: DEFAULT_CONNECTION_URI_VARIABLE.into(),
            }),
            client: client_default(),
            minify: false,
            diagnostics: false,
            argument_conflicts: ArgumentConflicts::default(),
            pool_settings: PoolSettings::default(),
            metadata: metadata::Metadata::default(),
        }
    }
}

/// Parse the configuration format from a directory.
pub async fn parse_configuration(
    configuration_dir: impl AsRef<Path>,
) -> Result<ParsedConfiguration, ParseConfigurationError> {
    let configuration_file = configuration_dir.as_ref().join(CONFIGURATION_FILENAME);

    let configuration_file_contents =
        fs::read_to_string(&configuration_file)
            .await
            .map_err(|err| {
                ParseConfigurationError::IoErrorButStringified(format!(
                    "{}: {}",
                    &configuration_file.display(),
                    err
                ))
            })?;

    let parsed_config: ParsedConfiguration = serde_json::from_str(&configuration_file_contents)
        .map_err(|error| ParseConfigurationError::ParseError {
            file_path: configuration_file.clone(),
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })?;

    if parsed_config.version != CURRENT_VERSION {
        return Err(ParseConfigurationError::UnsupportedVersion {
            file_path: configuration_file,
            version: parsed_config.version,
        });
    }

    if let ConnectionUri(Secret::Plain(uri)) = &parsed_config.connection_uri {
        if uri.is_empty() {
            return Err(ParseConfigurationError::EmptyConnectionUri {
                file_path: configuration_file,
            });
        }
    }

    Ok(parsed_config)
}

/// Write the parsed configuration into a directory on disk.
pub async fn write_parsed_configuration(
    parsed_config: ParsedConfiguration,
    out_dir: impl AsRef<Path>,
) -> Result<(), WriteParsedConfigurationError> {
    let configuration_file = out_dir.as_ref().to_owned().join(CONFIGURATION_FILENAME);
    fs::create_dir_all(out_dir.as_ref()).await?;

    // create the configuration file
    fs::write(
        configuration_file,
        serde_json::to_string_pretty(&parsed_config)
            .map_err(|e| WriteParsedConfigurationError::IoError(e.into()))?
            + "\n",
    )
    .await?;

    Ok(())
}
