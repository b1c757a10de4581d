//! A driver which answers from a handler instead of a database.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use query_engine_execution::driver::Driver;
use query_engine_execution::error::DriverError;
use query_engine_execution::normalize::RawResult;
use query_engine_sql::sql::string::SqlText;

type Handler = dyn Fn(&str) -> Result<serde_json::Value, MockDriverError> + Send + Sync;

/// The error a [`MockDriver`] fails with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock driver error: {0}")]
pub struct MockDriverError(pub String);

/// Records executed statements and answers them with a handler.
#[derive(Clone)]
pub struct MockDriver {
    handler: Arc<Handler>,
    executed: Arc<Mutex<Vec<String>>>,
}

impl MockDriver {
    pub fn with_handler(
        handler: impl Fn(&str) -> Result<serde_json::Value, MockDriverError> + Send + Sync + 'static,
    ) -> Self {
        MockDriver {
            handler: Arc::new(handler),
            executed: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Answer every statement with the same raw result.
    pub fn returning(raw: serde_json::Value) -> Self {
        Self::with_handler(move |_| Ok(raw.clone()))
    }

    /// Fail every statement.
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::with_handler(move |_| Err(MockDriverError(message.clone())))
    }

    /// The statements executed so far, in order.
    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn execute(&self, sql: &SqlText) -> Result<RawResult, DriverError> {
        self.executed.lock().unwrap().push(sql.as_str().to_string());
        // behave like a real driver and suspend before answering
        tokio::task::yield_now().await;
        (self.handler)(sql.as_str())
            .map(RawResult)
            .map_err(|error| Box::new(error) as DriverError)
    }
}
