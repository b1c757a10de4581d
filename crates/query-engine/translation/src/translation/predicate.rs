//! Resolve a field's arguments to the predicate constraining its rows.
//!
//! A resolver produces nothing (no constraint), a literal predicate, or a deferred computation
//! which eventually yields one. Deferred predicates must be awaited before the query that
//! incorporates them is compiled; see [`super::query::translate`].

use std::fmt;

use base64::{engine::general_purpose, Engine};
use futures::future::{BoxFuture, FutureExt};

use query_engine_metadata::metadata::{FilterArgument, FilterKind};
use query_engine_sql::sql;
use sql_bridge_configuration::ArgumentConflicts;

use super::arguments::FieldArguments;
use super::context::RequestContext;
use super::error::Error;

/// A boolean condition scoped to a row alias. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateFragment(String);

impl PredicateFragment {
    pub fn new(fragment: impl Into<String>) -> Result<Self, Error> {
        let fragment = fragment.into();
        if fragment.trim().is_empty() {
            Err(Error::EmptyPredicate)
        } else {
            Ok(PredicateFragment(fragment))
        }
    }

    /// Render a SQL expression as a fragment.
    pub fn from_expression(expression: &sql::ast::Expression) -> Self {
        let mut sql = sql::string::SQL::new();
        expression.to_sql(&mut sql);
        PredicateFragment(sql.sql)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The fragment as an expression that can be placed in a WHERE clause.
    pub fn to_expression(&self) -> sql::ast::Expression {
        sql::ast::Expression::RawPredicate(self.0.clone())
    }
}

impl fmt::Display for PredicateFragment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A predicate computation that completes asynchronously.
pub type DeferredPredicate = BoxFuture<'static, Result<PredicateFragment, Error>>;

/// The outcome of predicate resolution, when there is a constraint at all.
pub enum Predicate {
    Literal(PredicateFragment),
    Deferred(DeferredPredicate),
}

impl Predicate {
    /// Wait for the predicate to be available. Failures of deferred computations are returned
    /// as they are.
    pub async fn resolve(self) -> Result<PredicateFragment, Error> {
        match self {
            Predicate::Literal(fragment) => Ok(fragment),
            Predicate::Deferred(deferred) => deferred.await,
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::Literal(fragment) => f.debug_tuple("Literal").field(fragment).finish(),
            Predicate::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Computes the predicate for a field. Implementations must not mutate the context and must
/// not swallow errors.
pub trait PredicateResolver: Send + Sync {
    fn resolve_predicate(
        &self,
        alias: &sql::ast::TableAlias,
        arguments: &FieldArguments,
        context: &RequestContext,
    ) -> Result<Option<Predicate>, Error>;
}

impl<F> PredicateResolver for F
where
    F: Fn(
            &sql::ast::TableAlias,
            &FieldArguments,
            &RequestContext,
        ) -> Result<Option<Predicate>, Error>
        + Send
        + Sync,
{
    fn resolve_predicate(
        &self,
        alias: &sql::ast::TableAlias,
        arguments: &FieldArguments,
        context: &RequestContext,
    ) -> Result<Option<Predicate>, Error> {
        self(alias, arguments, context)
    }
}

/// A resolver for a field with declared filter arguments.
///
/// Filters are checked in declared order. Under [`ArgumentConflicts::FirstMatchWins`] the first
/// filter whose argument is supplied produces the predicate and the rest are ignored; under
/// [`ArgumentConflicts::Reject`] supplying two of them is an error.
#[derive(Debug, Clone)]
pub struct ArgumentFilters<'a> {
    pub filters: &'a [FilterArgument],
    pub conflicts: ArgumentConflicts,
}

impl<'a> ArgumentFilters<'a> {
    pub fn new(filters: &'a [FilterArgument], conflicts: ArgumentConflicts) -> Self {
        ArgumentFilters { filters, conflicts }
    }
}

impl PredicateResolver for ArgumentFilters<'_> {
    fn resolve_predicate(
        &self,
        alias: &sql::ast::TableAlias,
        arguments: &FieldArguments,
        _context: &RequestContext,
    ) -> Result<Option<Predicate>, Error> {
        let mut supplied = self
            .filters
            .iter()
            .filter_map(|filter| {
                arguments
                    .get(&filter.argument)
                    .filter(|value| is_satisfied(&filter.kind, value))
                    .map(|value| (filter, value))
            })
            .peekable();

        let Some((filter, value)) = supplied.next() else {
            return Ok(None);
        };

        if self.conflicts == ArgumentConflicts::Reject {
            if let Some((other, _)) = supplied.peek() {
                return Err(Error::ConflictingArguments {
                    first: filter.argument.clone(),
                    second: other.argument.clone(),
                });
            }
        }

        tracing::debug!(
            argument = filter.argument.as_str(),
            column = filter.kind.column(),
            "filter argument selected"
        );
        filter_predicate(alias, filter, value).map(Some)
    }
}

/// Whether a supplied argument produces a predicate. Boolean flags only do when set.
fn is_satisfied(kind: &FilterKind, value: &serde_json::Value) -> bool {
    match kind {
        FilterKind::IsNull { .. } => value.as_bool() != Some(false),
        FilterKind::IdEquals { .. }
        | FilterKind::EncodedIdEquals { .. }
        | FilterKind::DeferredIdEquals { .. } => true,
    }
}

/// Build the predicate for one filter argument.
fn filter_predicate(
    alias: &sql::ast::TableAlias,
    filter: &FilterArgument,
    value: &serde_json::Value,
) -> Result<Predicate, Error> {
    match &filter.kind {
        FilterKind::IdEquals { column } => {
            let id = expect_integer(&filter.argument, value)?;
            Ok(Predicate::Literal(PredicateFragment::from_expression(
                &sql::helpers::column_equals(alias, column, id),
            )))
        }
        FilterKind::DeferredIdEquals { column } => {
            let id = expect_integer(&filter.argument, value)?;
            let alias = alias.clone();
            let column = column.clone();
            Ok(Predicate::Deferred(
                async move {
                    Ok(PredicateFragment::from_expression(
                        &sql::helpers::column_equals(&alias, &column, id),
                    ))
                }
                .boxed(),
            ))
        }
        FilterKind::EncodedIdEquals { column } => {
            let encoded = value
                .as_str()
                .ok_or_else(|| Error::InvalidArgument {
                    argument: filter.argument.clone(),
                    message: format!("expected a string, got {value}"),
                })?
                .to_string();
            let argument = filter.argument.clone();
            let alias = alias.clone();
            let column = column.clone();
            Ok(Predicate::Deferred(
                async move {
                    let id = decode_id(&argument, &encoded)?;
                    Ok(PredicateFragment::from_expression(
                        &sql::helpers::column_equals(&alias, &column, id),
                    ))
                }
                .boxed(),
            ))
        }
        FilterKind::IsNull { column } => match value {
            serde_json::Value::Bool(_) => Ok(Predicate::Literal(
                PredicateFragment::from_expression(&sql::helpers::column_is_null(alias, column)),
            )),
            _ => Err(Error::InvalidArgument {
                argument: filter.argument.clone(),
                message: format!("expected a boolean, got {value}"),
            }),
        },
    }
}

fn expect_integer(argument: &str, value: &serde_json::Value) -> Result<i64, Error> {
    value.as_i64().ok_or_else(|| Error::InvalidArgument {
        argument: argument.to_string(),
        message: format!("expected an integer, got {value}"),
    })
}

/// Decode a base64 encoded integer identifier.
fn decode_id(argument: &str, encoded: &str) -> Result<i64, Error> {
    let computation_error = |message: String| Error::PredicateComputation {
        argument: argument.to_string(),
        message,
    };
    let decoded = general_purpose::STANDARD
        .decode(encoded)
        .map_err(|e| computation_error(e.to_string()))?;
    let decoded = String::from_utf8(decoded).map_err(|e| computation_error(e.to_string()))?;
    decoded
        .trim()
        .parse::<i64>()
        .map_err(|_| computation_error(format!("'{decoded}' is not an integer identifier")))
}
