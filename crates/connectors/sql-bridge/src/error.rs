//! Errors surfaced by the bridge.

use thiserror::Error;

use query_engine_execution::error as execution;
use query_engine_translation::translation::error as translation;
use sql_bridge_configuration::error::{MakeRuntimeConfigurationError, ParseConfigurationError};
use sql_bridge_configuration::Dialect;

/// The resolution of a single field failed. Sibling fields are unaffected.
#[derive(Debug, Error)]
pub enum FieldError {
    /// The predicate could not be resolved or the query could not be compiled.
    #[error("{0}")]
    Translation(#[from] translation::Error),
    /// The database or the result normalization failed.
    #[error("{0}")]
    Dispatch(#[from] execution::Error),
}

/// State initialization error.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("unable to initialize connection pool: {0}")]
    UnableToCreatePool(sqlx::Error),
    #[error("error initializing metrics: {0}")]
    MetricsError(prometheus::Error),
    #[error("{0}")]
    ConfigurationError(#[from] ConfigurationError),
}

/// The configuration directory could not be turned into a runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("{0}")]
    Parse(#[from] ParseConfigurationError),
    #[error("{0}")]
    MakeRuntime(#[from] MakeRuntimeConfigurationError),
    #[error("no driver is available for the '{0}' dialect")]
    UnsupportedDialect(Dialect),
}
