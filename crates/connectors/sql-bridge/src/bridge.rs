//! Per-field orchestration: predicate, then compilation, then dispatch.

use std::sync::Arc;

use futures::future::join_all;

use query_engine_execution::normalize::RowSet;
use query_engine_sql::sql::string::SqlText;
use query_engine_translation::translation;
use query_engine_translation::translation::arguments::FieldArguments;
use query_engine_translation::translation::compile::{QueryCompiler, SimpleSelectCompiler};
use query_engine_translation::translation::context::RequestContext;
use sql_bridge_configuration::Configuration;

use crate::error::FieldError;
use crate::state::State;

/// Resolves root fields for concurrent requests. Cheap to clone.
#[derive(Clone)]
pub struct Bridge {
    configuration: Arc<Configuration>,
    state: Arc<State>,
    compiler: Arc<dyn QueryCompiler>,
}

impl Bridge {
    /// A bridge compiling single-table selects.
    pub fn new(configuration: Arc<Configuration>, state: Arc<State>) -> Self {
        let compiler = Arc::new(SimpleSelectCompiler {
            minify: configuration.minify,
        });
        Bridge {
            configuration,
            state,
            compiler,
        }
    }

    /// Replace the query compilation engine.
    #[must_use]
    pub fn with_compiler(mut self, compiler: Arc<dyn QueryCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    /// Resolve the field's predicate and compile its query, without touching the database.
    pub async fn compile_field(
        &self,
        field_name: &str,
        arguments: &FieldArguments,
        context: &RequestContext,
    ) -> Result<SqlText, FieldError> {
        let sql = translation::query::translate(
            &self.configuration.metadata,
            self.configuration.argument_conflicts,
            self.compiler.as_ref(),
            field_name,
            arguments,
            context,
        )
        .await?;
        Ok(sql)
    }

    /// Resolve a field and return its rows.
    pub async fn resolve_field(
        &self,
        field_name: &str,
        arguments: &FieldArguments,
        context: &RequestContext,
    ) -> Result<RowSet, FieldError> {
        self.try_resolve_field(field_name, arguments, context)
            .await
            .map_err(|err| log_field_error(field_name, err))
    }

    async fn try_resolve_field(
        &self,
        field_name: &str,
        arguments: &FieldArguments,
        context: &RequestContext,
    ) -> Result<RowSet, FieldError> {
        let sql = self.compile_field(field_name, arguments, context).await?;
        let rows = self.state.dispatcher.dispatch(&sql, context).await?;
        Ok(rows)
    }

    /// Resolve a field and hand its rows to `done`, exactly once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn resolve_field_with_callback<F>(
        &self,
        field_name: String,
        arguments: FieldArguments,
        context: RequestContext,
        done: F,
    ) where
        F: FnOnce(Result<RowSet, FieldError>) + Send + 'static,
    {
        let bridge = self.clone();
        tokio::spawn(async move {
            let compiled = bridge.compile_field(&field_name, &arguments, &context).await;
            match compiled {
                Err(err) => done(Err(log_field_error(&field_name, err))),
                Ok(sql) => bridge
                    .state
                    .dispatcher
                    .dispatch_with_callback(sql, context, move |result| {
                        done(result.map_err(|err| log_field_error(&field_name, err.into())));
                    }),
            }
        });
    }

    /// Resolve sibling fields concurrently. Results are in the order the fields were given.
    pub async fn resolve_fields(
        &self,
        fields: &[(String, FieldArguments)],
        context: &RequestContext,
    ) -> Vec<Result<RowSet, FieldError>> {
        join_all(
            fields
                .iter()
                .map(|(field_name, arguments)| self.resolve_field(field_name, arguments, context)),
        )
        .await
    }
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bridge")
            .field("dialect", &self.configuration.dialect)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

fn log_field_error(field_name: &str, err: FieldError) -> FieldError {
    tracing::error!(
        meta.signal_type = "log",
        event.domain = "sql-bridge",
        event.name = "Field error",
        name = "Field error",
        field = field_name,
        body = %err,
        error = true,
    );
    err
}
