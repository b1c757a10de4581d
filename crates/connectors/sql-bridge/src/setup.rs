//! Turn a configuration directory into a ready [`Bridge`].

use std::path::Path;
use std::sync::Arc;

use tracing::{info_span, Instrument};

use sql_bridge_configuration as configuration;
use sql_bridge_configuration::environment::Environment;

use crate::bridge::Bridge;
use crate::error::{ConfigurationError, InitializationError};
use crate::state;

pub struct BridgeSetup<Env: Environment> {
    environment: Env,
}

impl<Env: Environment> BridgeSetup<Env> {
    pub fn new(environment: Env) -> Self {
        Self { environment }
    }

    /// Validate the configuration directory provided by the user,
    /// returning a configuration error or a runtime configuration.
    pub async fn parse_configuration(
        &self,
        configuration_dir: impl AsRef<Path>,
    ) -> Result<Arc<configuration::Configuration>, ConfigurationError> {
        // Validation errors are part of normal operation and are not logged here.
        let parsed_configuration = configuration::parse_configuration(configuration_dir)
            .instrument(info_span!("parse configuration"))
            .await?;

        let runtime_configuration =
            configuration::make_runtime_configuration(parsed_configuration, &self.environment)?;

        Ok(Arc::new(runtime_configuration))
    }

    /// Initialize the bridge's in-memory state, including the connection pool,
    /// and register its metrics with the registry.
    pub async fn try_init_state(
        &self,
        configuration: &Arc<configuration::Configuration>,
        metrics: &mut prometheus::Registry,
    ) -> Result<state::State, InitializationError> {
        state::create_state(configuration, metrics)
            .instrument(info_span!("Initialise state"))
            .await
            .map_err(|err| {
                tracing::error!(
                    meta.signal_type = "log",
                    event.domain = "sql-bridge",
                    event.name = "Initialization error",
                    name = "Initialization error",
                    body = %err,
                    error = true,
                );
                err
            })
    }

    /// Parse the configuration directory and initialize the state in one go.
    pub async fn build(
        &self,
        configuration_dir: impl AsRef<Path>,
        metrics: &mut prometheus::Registry,
    ) -> Result<Bridge, InitializationError> {
        let configuration = self.parse_configuration(configuration_dir).await?;
        let state = self.try_init_state(&configuration, metrics).await?;
        Ok(Bridge::new(configuration, Arc::new(state)))
    }
}
