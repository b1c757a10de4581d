//! Strip backend-specific envelopes from raw driver results.

use serde::{Deserialize, Serialize};
use sql_bridge_configuration::Dialect;

use crate::error::NormalizationError;

/// The result of a statement as the driver returned it. Its shape depends on the dialect.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResult(pub serde_json::Value);

/// The ordered rows of a result, independent of the dialect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowSet(pub Vec<serde_json::Value>);

impl RowSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_rows(self) -> Vec<serde_json::Value> {
        self.0
    }
}

/// Unwrap the rows from a raw result.
///
/// `mysql-like` drivers return `[rows, metadata]`; the metadata is discarded. Every other
/// dialect returns the rows themselves. Rows are never inspected.
pub fn normalize(raw: RawResult, dialect: Dialect) -> Result<RowSet, NormalizationError> {
    let RawResult(value) = raw;
    let serde_json::Value::Array(elements) = value else {
        return Err(NormalizationError::ExpectedArray {
            dialect,
            found: kind_of(&value),
        });
    };

    if !dialect.wraps_rows() {
        return Ok(RowSet(elements));
    }

    let length = elements.len();
    let Ok([rows, _metadata]) = <[serde_json::Value; 2]>::try_from(elements) else {
        return Err(NormalizationError::ExpectedEnvelope { dialect, length });
    };
    match rows {
        serde_json::Value::Array(rows) => Ok(RowSet(rows)),
        other => Err(NormalizationError::ExpectedRowSequence {
            dialect,
            found: kind_of(&other),
        }),
    }
}

fn kind_of(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
