//! Diagnostic channels for observing what the dispatcher writes.

use std::collections::BTreeMap;
use std::sync::Mutex;

use query_engine_translation::translation::context::{DiagnosticChannel, DiagnosticError};

/// Records every write.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    values: Mutex<BTreeMap<String, String>>,
}

impl RecordingChannel {
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

impl DiagnosticChannel for RecordingChannel {
    fn set(&self, key: &str, value: String) -> Result<(), DiagnosticError> {
        self.values.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}

/// Refuses every write.
#[derive(Debug, Default)]
pub struct FailingChannel;

impl DiagnosticChannel for FailingChannel {
    fn set(&self, key: &str, _value: String) -> Result<(), DiagnosticError> {
        Err(DiagnosticError {
            key: key.to_string(),
            message: "headers already sent".to_string(),
        })
    }
}
