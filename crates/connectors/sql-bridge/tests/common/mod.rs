//! Common functions used across test cases.

use std::sync::Arc;

use sql_bridge::bridge::Bridge;
use sql_bridge::state;
use sql_bridge_configuration::Dialect;
use tests_common::driver::MockDriver;

/// Creates a bridge over the static test configuration, answering queries with the driver.
pub async fn create_bridge(dialect: Dialect, driver: &MockDriver) -> Bridge {
    tests_common::init_logging();

    let configuration = tests_common::deployment::load_configuration(dialect)
        .await
        .unwrap();
    let state = state::create_state_with_driver(
        &configuration,
        Arc::new(driver.clone()),
        &mut prometheus::Registry::new(),
    )
    .await
    .unwrap();

    Bridge::new(configuration, Arc::new(state))
}
