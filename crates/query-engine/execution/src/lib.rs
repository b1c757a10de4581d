//! Query execution against the database.
//!
//! SQL handed over by the compilation engine is executed through a [`driver::Driver`], the
//! driver's dialect-shaped result is normalized into a [`normalize::RowSet`], and the rows are
//! delivered back either as a returned value or through a completion callback.

pub mod diagnostics;
pub mod dispatch;
pub mod driver;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod postgres;
