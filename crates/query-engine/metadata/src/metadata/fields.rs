//! Metadata information regarding the root fields served by the bridge.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Mapping from a root field name to the information needed to query it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct FieldsInfo(pub BTreeMap<String, FieldInfo>);

impl FieldsInfo {
    pub fn empty() -> Self {
        FieldsInfo(BTreeMap::new())
    }

    pub fn get(&self, field_name: &str) -> Option<&FieldInfo> {
        self.0.get(field_name)
    }
}

/// Information about a single root field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfo {
    /// The table the field's rows are selected from.
    pub table_name: String,
    /// The columns selected for the field.
    pub columns: Vec<String>,
    /// Filter arguments, in priority order. Only the first present argument
    /// produces a predicate.
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterArgument>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A field argument which, when supplied, constrains the field's rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterArgument {
    pub argument: String,
    #[serde(flatten)]
    pub kind: FilterKind,
    #[serde(default)]
    pub description: Option<String>,
}

/// The predicate a filter argument produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FilterKind {
    /// An integer argument compared against `column`.
    IdEquals { column: String },
    /// A base64 encoded integer compared against `column`. Decoding is deferred.
    EncodedIdEquals { column: String },
    /// An integer argument compared against `column` through a deferred computation.
    DeferredIdEquals { column: String },
    /// A boolean flag which, when true, requires `column` to be null.
    IsNull { column: String },
}

impl FilterKind {
    pub fn column(&self) -> &str {
        match self {
            FilterKind::IdEquals { column }
            | FilterKind::EncodedIdEquals { column }
            | FilterKind::DeferredIdEquals { column }
            | FilterKind::IsNull { column } => column,
        }
    }
}
