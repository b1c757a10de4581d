//! Type definitions of a low-level SQL string representation.

/// A SQL string under construction.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SQL {
    pub sql: String,
}

impl SQL {
    pub fn new() -> SQL {
        SQL { sql: String::new() }
    }

    pub fn append_syntax(&mut self, sql: &str) {
        self.sql.push_str(sql);
    }

    /// Append a double-quoted identifier, escaping embedded quotes.
    pub fn append_identifier(&mut self, identifier: &str) {
        self.sql.push('"');
        self.sql.push_str(&identifier.replace('"', "\"\""));
        self.sql.push('"');
    }

    /// Finish building, either on a single line or pretty printed.
    pub fn finish(self, minify: bool) -> SqlText {
        if minify {
            SqlText(self.sql)
        } else {
            SqlText(sqlformat::format(
                &self.sql,
                &sqlformat::QueryParams::None,
                sqlformat::FormatOptions::default(),
            ))
        }
    }
}

/// A complete SQL statement, ready to be executed. Never modified once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlText(String);

impl SqlText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for SqlText {
    fn from(value: String) -> Self {
        SqlText(value)
    }
}

impl From<&str> for SqlText {
    fn from(value: &str) -> Self {
        SqlText(value.to_string())
    }
}

impl std::fmt::Display for SqlText {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
