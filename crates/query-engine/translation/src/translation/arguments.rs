//! The arguments supplied to a single resolved field.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A field's argument map. Arguments set to `null` are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldArguments(BTreeMap<String, serde_json::Value>);

impl FieldArguments {
    pub fn new() -> Self {
        FieldArguments(BTreeMap::new())
    }

    /// Look up a supplied argument.
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.0.get(name).filter(|value| !value.is_null())
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(serde_json::Value::is_null)
    }
}

impl<const N: usize> From<[(&str, serde_json::Value); N]> for FieldArguments {
    fn from(arguments: [(&str, serde_json::Value); N]) -> Self {
        FieldArguments(
            arguments
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::FieldArguments;

    #[test]
    fn null_arguments_are_absent() {
        let arguments = FieldArguments::from([("id", serde_json::Value::Null)]);
        assert_eq!(arguments.get("id"), None);
        assert!(arguments.is_empty());
    }
}
