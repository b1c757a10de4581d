//! A [`Driver`] for PostgreSQL, using a sqlx connection pool.

use std::time::Duration;

use async_trait::async_trait;
use query_engine_sql::sql::string::SqlText;
use sql_bridge_configuration::PoolSettings;

use crate::driver::Driver;
use crate::error::DriverError;
use crate::normalize::RawResult;

/// Runs statements against PostgreSQL and returns the rows as a bare JSON array.
#[derive(Debug, Clone)]
pub struct PostgresDriver {
    pool: sqlx::PgPool,
}

impl PostgresDriver {
    pub fn new(pool: sqlx::PgPool) -> Self {
        PostgresDriver { pool }
    }

    /// Create a connection pool. Connections are opened lazily.
    pub fn connect_lazy(
        connection_uri: &str,
        pool_settings: &PoolSettings,
    ) -> Result<Self, sqlx::Error> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(pool_settings.max_connections)
            .acquire_timeout(Duration::from_secs(pool_settings.pool_timeout))
            .idle_timeout(pool_settings.idle_timeout.map(Duration::from_secs))
            .connect_lazy(connection_uri)?;
        Ok(PostgresDriver { pool })
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

/// Wrap a statement so that its rows come back as a single JSON array.
fn json_rows_query(sql: &str) -> String {
    let statement = sql.trim().trim_end_matches(';');
    format!(
        "SELECT coalesce(json_agg(row_to_json(bridge_rows)), '[]'::json) FROM ({statement}) AS bridge_rows"
    )
}

#[async_trait]
impl Driver for PostgresDriver {
    async fn execute(&self, sql: &SqlText) -> Result<RawResult, DriverError> {
        let rows: serde_json::Value = sqlx::query_scalar(&json_rows_query(sql.as_str()))
            .fetch_one(&self.pool)
            .await?;
        Ok(RawResult(rows))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use sql_bridge_configuration::PoolSettings;

    use super::{json_rows_query, PostgresDriver};

    #[test]
    fn statements_are_aggregated_to_json() {
        assert_eq!(
            json_rows_query("SELECT 1 AS one;\n"),
            "SELECT coalesce(json_agg(row_to_json(bridge_rows)), '[]'::json) FROM (SELECT 1 AS one) AS bridge_rows"
        );
    }

    #[tokio::test]
    async fn pool_follows_the_configured_settings() {
        let pool_settings = PoolSettings {
            max_connections: 7,
            pool_timeout: 12,
            idle_timeout: None,
        };
        let driver =
            PostgresDriver::connect_lazy("postgresql://postgres@localhost/bridge", &pool_settings)
                .unwrap();

        let options = driver.pool().options();
        assert_eq!(options.get_max_connections(), 7);
        assert_eq!(options.get_acquire_timeout(), Duration::from_secs(12));
        assert_eq!(options.get_idle_timeout(), None);
    }
}
