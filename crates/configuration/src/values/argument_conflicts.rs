use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What to do when a request supplies more than one filter argument for the same field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ArgumentConflicts {
    /// The first argument in declared priority order produces the predicate;
    /// the others are ignored.
    #[default]
    FirstMatchWins,
    /// Fail the field when two filter arguments are supplied together.
    Reject,
}

impl ArgumentConflicts {
    pub fn is_default(&self) -> bool {
        *self == ArgumentConflicts::default()
    }
}
