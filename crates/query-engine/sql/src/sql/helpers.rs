//! Helpers for building sql::ast types in certain shapes and patterns.

use super::ast::*;

// Empty clauses //

/// An empty `WHERE` clause.
pub fn empty_where() -> Expression {
    Expression::Value(Value::Bool(true))
}

// Aliasing //

/// Create table aliases using this function so we build everything in one place.
pub fn make_table_alias(name: String) -> TableAlias {
    TableAlias { name }
}

/// Create column aliases using this function so we build everything in one place.
pub fn make_column_alias(name: String) -> ColumnAlias {
    ColumnAlias { name }
}

/// Generate a column expression refering to a specific table, aliased by its own name.
pub fn make_column(table: &TableAlias, name: &str) -> (ColumnAlias, Expression) {
    (
        make_column_alias(name.to_string()),
        Expression::ColumnReference(ColumnReference::TableColumn {
            table: table.clone(),
            name: ColumnName(name.to_string()),
        }),
    )
}

// Predicates //

/// `"<table>"."<column>" = <value>`
pub fn column_equals(table: &TableAlias, column: &str, value: i64) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(Expression::ColumnReference(ColumnReference::TableColumn {
            table: table.clone(),
            name: ColumnName(column.to_string()),
        })),
        operator: BinaryOperator("=".to_string()),
        right: Box::new(Expression::Value(Value::Int8(value))),
    }
}

/// `"<table>"."<column>" IS NULL`
pub fn column_is_null(table: &TableAlias, column: &str) -> Expression {
    Expression::UnaryOperation {
        expression: Box::new(Expression::ColumnReference(ColumnReference::TableColumn {
            table: table.clone(),
            name: ColumnName(column.to_string()),
        })),
        operator: UnaryOperator::IsNull,
    }
}

// SELECTs //

/// Build a simple select from a single aliased table.
pub fn simple_select(
    select_list: SelectList,
    table: TableName,
    alias: TableAlias,
    predicate: Expression,
) -> Select {
    Select {
        select_list,
        from: Some(From::Table { name: table, alias }),
        where_: Where(predicate),
    }
}
