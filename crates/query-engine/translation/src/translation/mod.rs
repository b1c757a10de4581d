//! Resolve field arguments to predicates and compile them into SQL to be run against the database.

pub mod arguments;
pub mod compile;
pub mod context;
pub mod error;
pub mod predicate;
pub mod query;
