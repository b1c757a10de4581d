//! Convert a SQL AST to a low-level SQL string.

use super::ast::*;
use super::string::SQL;

// Convert to SQL strings

impl Select {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("SELECT ");

        self.select_list.to_sql(sql);

        if let Some(from) = &self.from {
            sql.append_syntax(" ");
            from.to_sql(sql);
        }

        self.where_.to_sql(sql);
    }
}

impl SelectList {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            SelectList::SelectList(select_list) => {
                for (index, (col, expr)) in select_list.iter().enumerate() {
                    expr.to_sql(sql);
                    sql.append_syntax(" AS ");
                    col.to_sql(sql);
                    if index < (select_list.len() - 1) {
                        sql.append_syntax(", ");
                    }
                }
            }
            SelectList::SelectStar => {
                sql.append_syntax("*");
            }
        }
    }
}

impl From {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax("FROM ");
        match &self {
            From::Table { name, alias } => {
                name.to_sql(sql);
                sql.append_syntax(" AS ");
                alias.to_sql(sql);
            }
        }
    }
}

impl Where {
    pub fn to_sql(&self, sql: &mut SQL) {
        let Where(expression) = self;
        match *expression {
            // no constraint, no WHERE clause
            Expression::Value(Value::Bool(true)) => (),
            _ => {
                sql.append_syntax(" WHERE ");
                expression.to_sql(sql);
            }
        }
    }
}

impl Expression {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                left.to_sql(sql);
                operator.to_sql(sql);
                right.to_sql(sql);
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => {
                expression.to_sql(sql);
                operator.to_sql(sql);
            }
            Expression::ColumnReference(column_reference) => column_reference.to_sql(sql),
            Expression::Value(value) => value.to_sql(sql),
            Expression::RawPredicate(predicate) => {
                sql.append_syntax("(");
                sql.append_syntax(predicate);
                sql.append_syntax(")");
            }
        }
    }
}

impl UnaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            UnaryOperator::IsNull => sql.append_syntax(" IS NULL"),
        }
    }
}

impl BinaryOperator {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_syntax(" ");
        sql.append_syntax(&self.0);
        sql.append_syntax(" ");
    }
}

impl Value {
    pub fn to_sql(&self, sql: &mut SQL) {
        match &self {
            Value::Int8(i) => sql.append_syntax(&i.to_string()),
            Value::Bool(true) => sql.append_syntax("true"),
            Value::Bool(false) => sql.append_syntax("false"),
        }
    }
}

impl ColumnReference {
    pub fn to_sql(&self, sql: &mut SQL) {
        match self {
            ColumnReference::TableColumn { table, name } => {
                table.to_sql(sql);
                sql.append_syntax(".");
                name.to_sql(sql);
            }
        }
    }
}

impl TableName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl TableAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.name);
    }
}

impl ColumnName {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.0);
    }
}

impl ColumnAlias {
    pub fn to_sql(&self, sql: &mut SQL) {
        sql.append_identifier(&self.name);
    }
}
