//! Access to the environment the bridge runs in.

use std::collections::HashMap;

use thiserror::Error;

/// Read variables from an environment.
pub trait Environment {
    fn read(&self, variable: &str) -> Result<String, Error>;
}

impl<E: Environment> Environment for &E {
    fn read(&self, variable: &str) -> Result<String, Error> {
        (*self).read(variable)
    }
}

/// The environment of the current process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn read(&self, variable: &str) -> Result<String, Error> {
        std::env::var(variable).map_err(|_| Error::VariableNotPresent(variable.to_string()))
    }
}

/// A fixed set of variables, mostly useful in tests.
#[derive(Debug, Clone, Default)]
pub struct FixedEnvironment(HashMap<String, String>);

impl<const N: usize> From<[(String, String); N]> for FixedEnvironment {
    fn from(values: [(String, String); N]) -> Self {
        Self(HashMap::from(values))
    }
}

impl From<HashMap<String, String>> for FixedEnvironment {
    fn from(values: HashMap<String, String>) -> Self {
        Self(values)
    }
}

impl Environment for FixedEnvironment {
    fn read(&self, variable: &str) -> Result<String, Error> {
        self.0
            .get(variable)
            .cloned()
            .ok_or_else(|| Error::VariableNotPresent(variable.to_string()))
    }
}

/// An environment with no variables at all.
#[derive(Debug, Clone, Copy)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {
    fn read(&self, variable: &str) -> Result<String, Error> {
        Err(Error::VariableNotPresent(variable.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("the variable {0:?} is not present in the environment")]
    VariableNotPresent(String),
}
