//! Surface the executed SQL on the request's diagnostic channel.
//!
//! Only for debugging. Writes are best-effort and never fail the request.

use std::sync::Mutex;

use hyper::header::{HeaderMap, HeaderName, HeaderValue};
use query_engine_sql::sql::string::SqlText;
use query_engine_translation::translation::context::{
    DiagnosticChannel, DiagnosticError, RequestContext,
};

use crate::metrics::Metrics;

/// The key the executed SQL is written under.
pub const SQL_PREVIEW_KEY: &str = "X-SQL-Preview";

/// Replace newlines with `%0A` so the SQL travels as a single header-safe line.
pub fn escape_newlines(sql: &str) -> String {
    sql.replace('\n', "%0A")
}

/// Copy the SQL into the context's diagnostic channel, if it has one.
pub fn write_sql_preview(context: &RequestContext, sql: &SqlText, metrics: &Metrics) {
    let Some(channel) = context.diagnostics() else {
        return;
    };
    if let Err(error) = channel.set(SQL_PREVIEW_KEY, escape_newlines(sql.as_str())) {
        metrics.diagnostic_skipped_total.inc();
        tracing::debug!(%error, "skipped SQL preview");
    }
}

/// A diagnostic channel backed by outgoing response headers.
#[derive(Debug, Default)]
pub struct HeaderDiagnostics {
    headers: Mutex<HeaderMap>,
}

impl HeaderDiagnostics {
    pub fn new() -> Self {
        HeaderDiagnostics::default()
    }

    /// Take the headers written so far, to attach them to the response.
    pub fn take_headers(&self) -> HeaderMap {
        match self.headers.lock() {
            Ok(mut headers) => std::mem::take(&mut *headers),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl DiagnosticChannel for HeaderDiagnostics {
    fn set(&self, key: &str, value: String) -> Result<(), DiagnosticError> {
        let error = |message: String| DiagnosticError {
            key: key.to_string(),
            message,
        };
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| error(e.to_string()))?;
        let value = HeaderValue::from_str(&value).map_err(|e| error(e.to_string()))?;
        self.headers
            .lock()
            .map_err(|e| error(e.to_string()))?
            .insert(name, value);
        Ok(())
    }
}
