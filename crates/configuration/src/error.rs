//! Errors that can be thrown when processing configuration.

use std::path::PathBuf;

use thiserror::Error;

/// The errors that can be thrown when parsing a configuration directory.
#[derive(Debug, Error)]
pub enum ParseConfigurationError {
    #[error("parse error on {file_path}:{line}:{column}: {message}")]
    ParseError {
        file_path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("empty connection URI in {file_path}")]
    EmptyConnectionUri { file_path: PathBuf },
    #[error("unsupported configuration version {version} in {file_path}")]
    UnsupportedVersion { file_path: PathBuf, version: u32 },
    #[error("I/O error: {0}")]
    IoErrorButStringified(String),
}

/// The errors that can be thrown when writing a configuration directory.
#[derive(Debug, Error)]
pub enum WriteParsedConfigurationError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// The errors that can be thrown when elaborating the runtime configuration.
#[derive(Debug, Error)]
pub enum MakeRuntimeConfigurationError {
    #[error("invalid configuration in {file_path}: {message}")]
    MissingEnvironmentVariable { file_path: PathBuf, message: String },
}
