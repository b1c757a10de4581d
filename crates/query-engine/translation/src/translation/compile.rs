//! The seam to the query compilation engine.
//!
//! The engine turns a field, its row alias and its (already resolved) predicate into a single
//! SQL statement. [`SimpleSelectCompiler`] compiles a plain single-table select.

use query_engine_metadata::metadata::FieldInfo;
use query_engine_sql::sql;
use query_engine_sql::sql::string::SqlText;

use super::error::Error;
use super::predicate::PredicateFragment;

/// Compile a field into SQL text.
pub trait QueryCompiler: Send + Sync {
    fn compile(
        &self,
        field: &FieldInfo,
        alias: &sql::ast::TableAlias,
        predicate: Option<&PredicateFragment>,
    ) -> Result<SqlText, Error>;
}

/// Compiles `SELECT <columns> FROM <table> AS <alias> [WHERE <predicate>]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleSelectCompiler {
    /// Emit the statement on a single line rather than pretty printed.
    pub minify: bool,
}

impl QueryCompiler for SimpleSelectCompiler {
    fn compile(
        &self,
        field: &FieldInfo,
        alias: &sql::ast::TableAlias,
        predicate: Option<&PredicateFragment>,
    ) -> Result<SqlText, Error> {
        let select_list = if field.columns.is_empty() {
            sql::ast::SelectList::SelectStar
        } else {
            sql::ast::SelectList::SelectList(
                field
                    .columns
                    .iter()
                    .map(|column| sql::helpers::make_column(alias, column))
                    .collect(),
            )
        };

        let select = sql::helpers::simple_select(
            select_list,
            sql::ast::TableName(field.table_name.clone()),
            alias.clone(),
            predicate.map_or_else(sql::helpers::empty_where, PredicateFragment::to_expression),
        );

        let mut sql = sql::string::SQL::new();
        select.to_sql(&mut sql);
        Ok(sql.finish(self.minify))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sponsors() -> FieldInfo {
        FieldInfo {
            table_name: "sponsors".to_string(),
            columns: vec!["first_name".to_string(), "num_legs".to_string()],
            filters: vec![],
            description: None,
        }
    }

    #[test]
    fn compiles_without_predicate() {
        let alias = sql::helpers::make_table_alias("sponsors".to_string());
        let sql = SimpleSelectCompiler { minify: true }
            .compile(&sponsors(), &alias, None)
            .unwrap();

        insta::assert_snapshot!(sql.as_str(), @r###"SELECT "sponsors"."first_name" AS "first_name", "sponsors"."num_legs" AS "num_legs" FROM "sponsors" AS "sponsors""###);
    }

    #[test]
    fn compiles_with_predicate() {
        let alias = sql::helpers::make_table_alias("sponsors".to_string());
        let predicate = PredicateFragment::new(r#""sponsors"."num_legs" IS NULL"#).unwrap();
        let sql = SimpleSelectCompiler { minify: true }
            .compile(&sponsors(), &alias, Some(&predicate))
            .unwrap();

        assert!(sql
            .as_str()
            .ends_with(r#"WHERE ("sponsors"."num_legs" IS NULL)"#));
    }

    #[test]
    fn select_star_without_columns() {
        let mut field = sponsors();
        field.columns.clear();
        let alias = sql::helpers::make_table_alias("sponsors".to_string());
        let sql = SimpleSelectCompiler { minify: true }
            .compile(&field, &alias, None)
            .unwrap();

        assert_eq!(sql.as_str(), r#"SELECT * FROM "sponsors" AS "sponsors""#);
    }
}
