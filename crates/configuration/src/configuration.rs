//! Configuration for the bridge.

use query_engine_metadata::metadata;
use schemars::{gen::SchemaSettings, schema::RootSchema};

use crate::dialect::Dialect;
use crate::values::{ArgumentConflicts, PoolSettings};
use crate::version1::ParsedConfiguration;

/// The 'Configuration' type collects all the information necessary to serve queries at runtime.
///
/// Values of this type are produced from a 'ParsedConfiguration' using
/// 'make_runtime_configuration', once at startup. It is never mutated afterwards and is shared
/// between concurrent requests behind an `Arc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    pub metadata: metadata::Metadata,
    pub pool_settings: PoolSettings,
    pub connection_uri: String,
    pub dialect: Dialect,
    pub minify: bool,
    pub diagnostics: bool,
    pub argument_conflicts: ArgumentConflicts,
}

impl Configuration {
    /// A configuration with no tracked fields, for the given dialect.
    pub fn for_dialect(dialect: Dialect) -> Self {
        Configuration {
            metadata: metadata::Metadata::empty(),
            pool_settings: PoolSettings::default(),
            connection_uri: String::new(),
            dialect,
            minify: false,
            diagnostics: false,
            argument_conflicts: ArgumentConflicts::default(),
        }
    }
}

/// Generate the JSON schema of the configuration file.
pub fn generate_latest_schema() -> RootSchema {
    SchemaSettings::draft07()
        .into_generator()
        .into_root_schema_for::<ParsedConfiguration>()
}
