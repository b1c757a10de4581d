//! A minimal SQL AST, and its conversion to SQL text.

pub mod ast;
pub mod convert;
pub mod helpers;
pub mod string;
