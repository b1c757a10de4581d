//! Errors for predicate resolution and query compilation.

use thiserror::Error;

/// A type for translation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Field '{0}' not found.")]
    FieldNotFound(String),
    #[error("Invalid value for argument '{argument}': {message}.")]
    InvalidArgument { argument: String, message: String },
    #[error("Unable to compute the predicate for argument '{argument}': {message}.")]
    PredicateComputation { argument: String, message: String },
    #[error("Arguments '{first}' and '{second}' cannot be supplied together.")]
    ConflictingArguments { first: String, second: String },
    #[error("Predicates must not be empty; return no predicate to impose no constraint.")]
    EmptyPredicate,
}
