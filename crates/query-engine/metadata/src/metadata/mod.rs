//! Metadata information regarding the tracked root fields and their filter arguments.

pub mod fields;

// re-export without modules
pub use fields::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metadata information.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    #[serde(default)]
    pub fields: FieldsInfo,
}

impl Metadata {
    pub fn empty() -> Self {
        Metadata {
            fields: FieldsInfo::empty(),
        }
    }
}
