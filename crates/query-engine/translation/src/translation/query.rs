//! Translate a field request into the SQL to be dispatched.

use tracing::{info_span, Instrument};

use query_engine_metadata::metadata;
use query_engine_sql::sql;
use query_engine_sql::sql::string::SqlText;
use sql_bridge_configuration::ArgumentConflicts;

use super::arguments::FieldArguments;
use super::compile::QueryCompiler;
use super::context::RequestContext;
use super::error::Error;
use super::predicate::{ArgumentFilters, PredicateResolver};

/// The alias the field's rows are selected under.
pub fn table_alias_for(field_name: &str) -> sql::ast::TableAlias {
    sql::helpers::make_table_alias(field_name.to_string())
}

/// Translate a field using the filter arguments declared for it in the metadata.
pub async fn translate(
    metadata: &metadata::Metadata,
    conflicts: ArgumentConflicts,
    compiler: &dyn QueryCompiler,
    field_name: &str,
    arguments: &FieldArguments,
    context: &RequestContext,
) -> Result<SqlText, Error> {
    let field = metadata
        .fields
        .get(field_name)
        .ok_or_else(|| Error::FieldNotFound(field_name.to_string()))?;

    let resolver = ArgumentFilters::new(&field.filters, conflicts);
    translate_with(&resolver, compiler, field_name, field, arguments, context).await
}

/// Translate a field with an explicit predicate resolver.
///
/// Predicate resolution, including any deferred computation, completes before the query is
/// compiled.
pub async fn translate_with(
    resolver: &dyn PredicateResolver,
    compiler: &dyn QueryCompiler,
    field_name: &str,
    field: &metadata::FieldInfo,
    arguments: &FieldArguments,
    context: &RequestContext,
) -> Result<SqlText, Error> {
    let alias = table_alias_for(field_name);

    let predicate = async {
        match resolver.resolve_predicate(&alias, arguments, context)? {
            None => Ok(None),
            Some(predicate) => predicate.resolve().await.map(Some),
        }
    }
    .instrument(info_span!("Resolve predicate", field = field_name))
    .await?;

    info_span!("Compile query", field = field_name)
        .in_scope(|| compiler.compile(field, &alias, predicate.as_ref()))
}
