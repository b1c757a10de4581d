//! Helpers shared by the integration tests of the workspace.

pub mod deployment;
pub mod diagnostics;
pub mod driver;

/// Initialise logging once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
