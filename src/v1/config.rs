use std::env;

use thiserror::Error;

pub const TABLE_NAME_VAR: &str = "TABLE_NAME";

/// Startup-time configuration sourced from the hosting environment. The
/// table name is an opaque string as far as the dispatcher is concerned.
#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let table_name =
            env::var(TABLE_NAME_VAR).map_err(|_| ConfigError::MissingTableName)?;
        Ok(Self { table_name })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TABLE_NAME is not set")]
    MissingTableName,
}
