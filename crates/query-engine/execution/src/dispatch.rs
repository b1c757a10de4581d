//! Dispatch compiled SQL to the driver and deliver the normalized rows.
//!
//! The compilation engine may ask for the rows back as a returned value ([`Dispatcher::dispatch`])
//! or through a completion callback ([`Dispatcher::dispatch_with_callback`]). Both go through
//! the same execution path.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use query_engine_sql::sql::string::SqlText;
use query_engine_translation::translation::context::RequestContext;
use sql_bridge_configuration::Configuration;

use crate::diagnostics;
use crate::driver::Driver;
use crate::error::Error;
use crate::metrics::Metrics;
use crate::normalize::{self, RowSet};

/// Executes SQL for the fields of every request. Cheap to clone.
#[derive(Clone)]
pub struct Dispatcher {
    driver: Arc<dyn Driver>,
    configuration: Arc<Configuration>,
    metrics: Metrics,
}

impl Dispatcher {
    pub fn new(driver: Arc<dyn Driver>, configuration: Arc<Configuration>, metrics: Metrics) -> Self {
        Dispatcher {
            driver,
            configuration,
            metrics,
        }
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Execute the statement once and return its normalized rows.
    ///
    /// The SQL is copied into the context's diagnostic channel only when `diagnostics` is enabled
    /// in the configuration (off by default, for debugging only) and the context carries a
    /// channel. A failed copy never fails the dispatch.
    pub async fn dispatch(&self, sql: &SqlText, context: &RequestContext) -> Result<RowSet, Error> {
        if self.configuration.diagnostics {
            diagnostics::write_sql_preview(context, sql, &self.metrics);
        }

        tracing::debug!(generated_sql = sql.as_str());

        let raw = self
            .driver
            .execute(sql)
            .instrument(info_span!("Execute query"))
            .await
            .map_err(|error| {
                self.metrics.dispatch_error_total.inc();
                Error::Execution(error)
            })?;

        let rows = info_span!("Normalize result", dialect = %self.configuration.dialect)
            .in_scope(|| normalize::normalize(raw, self.configuration.dialect))
            .map_err(|error| {
                self.metrics.normalization_error_total.inc();
                Error::Normalization(error)
            })?;

        self.metrics.dispatch_total.inc();
        Ok(rows)
    }

    /// Execute the statement on the runtime and hand the outcome to `done`, exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch_with_callback<F>(&self, sql: SqlText, context: RequestContext, done: F)
    where
        F: FnOnce(Result<RowSet, Error>) + Send + 'static,
    {
        let dispatcher = self.clone();
        tokio::spawn(async move {
            let result = dispatcher.dispatch(&sql, &context).await;
            done(result);
        });
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("dialect", &self.configuration.dialect)
            .finish_non_exhaustive()
    }
}
