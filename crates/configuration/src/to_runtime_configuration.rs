//! Convert the parsed configuration metadata to internal engine metadata
//! That can be used by the connector at runtime.

use std::path::PathBuf;

use crate::configuration::Configuration;
use crate::dialect::Dialect;
use crate::environment::Environment;
use crate::error::MakeRuntimeConfigurationError;
use crate::values::{ConnectionUri, Secret};
use crate::version1::{ParsedConfiguration, CONFIGURATION_FILENAME};

/// Environment variable which, when set to `1`, forces minified SQL output.
pub const MINIFY_VARIABLE: &str = "MINIFY";

/// Convert the user's configuration into the runtime configuration.
pub fn make_runtime_configuration(
    parsed_config: ParsedConfiguration,
    environment: impl Environment,
) -> Result<Configuration, MakeRuntimeConfigurationError> {
    let connection_uri = match parsed_config.connection_uri {
        ConnectionUri(Secret::Plain(uri)) => Ok(uri),
        ConnectionUri(Secret::FromEnvironment { variable }) => {
            environment.read(&variable).map_err(|error| {
                MakeRuntimeConfigurationError::MissingEnvironmentVariable {
                    file_path: PathBuf::from(CONFIGURATION_FILENAME),
                    message: error.to_string(),
                }
            })
        }
    }?;

    let minify = parsed_config.minify
        || environment
            .read(MINIFY_VARIABLE)
            .is_ok_and(|value| value.trim() == "1");

    let dialect = Dialect::from_client(&parsed_config.client);
    tracing::debug!(client = parsed_config.client.as_str(), %dialect, minify, "runtime configuration");

    Ok(Configuration {
        metadata: parsed_config.metadata,
        pool_settings: parsed_config.pool_settings,
        connection_uri,
        dialect,
        minify,
        diagnostics: parsed_config.diagnostics,
        argument_conflicts: parsed_config.argument_conflicts,
    })
}
