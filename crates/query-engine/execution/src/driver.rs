//! The database driver the dispatcher executes statements with.

use async_trait::async_trait;
use query_engine_sql::sql::string::SqlText;

use crate::error::DriverError;
use crate::normalize::RawResult;

/// Executes a statement and returns its raw, dialect-shaped result.
///
/// Connection pooling, synchronization and any retry policy belong to the driver.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn execute(&self, sql: &SqlText) -> Result<RawResult, DriverError>;
}
