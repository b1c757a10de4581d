//! Errors for query execution.

use sql_bridge_configuration::Dialect;
use thiserror::Error;

/// An error reported by a database driver. It is forwarded to the caller as it is.
pub type DriverError = Box<dyn std::error::Error + Send + Sync>;

/// Execution errors.
#[derive(Debug, Error)]
pub enum Error {
    #[error("error executing query: {0}")]
    Execution(#[source] DriverError),
    #[error("{0}")]
    Normalization(#[from] NormalizationError),
}

/// The raw result did not have the envelope expected for the configured dialect.
///
/// This points at a driver or configuration mistake, and is never coerced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("expected the {dialect} driver to return an array, got {found}")]
    ExpectedArray { dialect: Dialect, found: &'static str },
    #[error("expected the {dialect} driver to return a [rows, metadata] pair, got {length} elements")]
    ExpectedEnvelope { dialect: Dialect, length: usize },
    #[error("expected the first element of the {dialect} result to be the rows, got {found}")]
    ExpectedRowSequence { dialect: Dialect, found: &'static str },
}
