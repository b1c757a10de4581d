//! The relational backend in use, which determines the shape of raw execution results.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Identity of the relational backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Sequence, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    Postgres,
    Sqlite,
    Mssql,
    Oracle,
    /// MySQL and its forks. Drivers for these return `[rows, fields]` rather than bare rows.
    MysqlLike,
    /// Any other backend whose driver returns bare rows.
    Standard,
}

impl Dialect {
    /// Derive the dialect from the identity of the database driver, e.g. `pg` or `mysql2`.
    pub fn from_client(client: &str) -> Dialect {
        match client.trim().to_ascii_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite" | "sqlite3" | "better-sqlite3" => Dialect::Sqlite,
            "mssql" | "tedious" => Dialect::Mssql,
            "oracle" | "oracledb" => Dialect::Oracle,
            "mysql" | "mysql2" | "mariadb" => Dialect::MysqlLike,
            _ => Dialect::Standard,
        }
    }

    /// Whether raw results arrive wrapped in a `[rows, metadata]` envelope.
    pub fn wraps_rows(self) -> bool {
        matches!(self, Dialect::MysqlLike)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Sqlite => "sqlite",
            Dialect::Mssql => "mssql",
            Dialect::Oracle => "oracle",
            Dialect::MysqlLike => "mysql-like",
            Dialect::Standard => "standard",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
