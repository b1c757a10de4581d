mod argument_conflicts;
mod pool_settings;
mod secret;
pub mod uri;

pub use argument_conflicts::ArgumentConflicts;
pub use pool_settings::PoolSettings;
pub use secret::Secret;
pub use uri::ConnectionUri;
