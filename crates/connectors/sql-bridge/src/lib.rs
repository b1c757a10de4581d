//! Resolve GraphQL root fields to rows from a SQL database.
//!
//! A [`bridge::Bridge`] resolves each field in three steps: the field's arguments are turned
//! into a predicate, the query is compiled, and the SQL is dispatched to the database with the
//! driver's result normalized into plain rows.

pub mod bridge;
pub mod error;
pub mod setup;
pub mod state;

/// The version of the bridge.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The version of the bridge, as reported by the `version` root field.
pub fn version() -> &'static str {
    VERSION
}
