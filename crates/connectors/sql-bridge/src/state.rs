//! Transient state used by the bridge.
//!
//! This is initialized on startup.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use query_engine_execution::dispatch::Dispatcher;
use query_engine_execution::driver::Driver;
use query_engine_execution::metrics;
use query_engine_execution::postgres::PostgresDriver;
use sql_bridge_configuration::{Configuration, Dialect};

use crate::error::{ConfigurationError, InitializationError};

/// State for the bridge.
#[derive(Debug, Clone)]
pub struct State {
    pub metrics: metrics::Metrics,
    pub dispatcher: Dispatcher,
}

/// Create a connection pool for the configured dialect and wrap it inside a State.
pub async fn create_state(
    configuration: &Arc<Configuration>,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let driver: Arc<dyn Driver> = match configuration.dialect {
        Dialect::Postgres => {
            let driver = async {
                PostgresDriver::connect_lazy(
                    &configuration.connection_uri,
                    &configuration.pool_settings,
                )
                .map_err(InitializationError::UnableToCreatePool)
            }
            .instrument(info_span!("Create connection pool"))
            .await?;
            Arc::new(driver)
        }
        dialect => return Err(ConfigurationError::UnsupportedDialect(dialect).into()),
    };

    create_state_with_driver(configuration, driver, metrics_registry).await
}

/// Wrap an existing driver inside a State.
pub async fn create_state_with_driver(
    configuration: &Arc<Configuration>,
    driver: Arc<dyn Driver>,
    metrics_registry: &mut prometheus::Registry,
) -> Result<State, InitializationError> {
    let metrics = async {
        let metrics_inner = metrics::Metrics::initialize(metrics_registry)
            .map_err(InitializationError::MetricsError)?;
        Ok::<_, InitializationError>(metrics_inner)
    }
    .instrument(info_span!("Setup metrics"))
    .await?;

    let dispatcher = Dispatcher::new(driver, Arc::clone(configuration), metrics.clone());

    Ok(State {
        metrics,
        dispatcher,
    })
}
