//! Introspection settings.
//!
//! [`IntrospectionConfig`] is loaded from `config/config.toml` (section
//! `[introspection]`) or environment variables such as
//! `LIFEGUARD__INTROSPECTION__ENGINE=mysql`.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Storage engine the schema snapshot was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    #[default]
    Postgres,
    Mysql,
    Sqlite,
}

impl Engine {
    /// Whether index metadata read from this engine carries a case-sensitivity flag.
    ///
    /// PostgreSQL expression indexes (`lower(login)`) make an index
    /// case-insensitive. MySQL decides through the column collation instead,
    /// and SQLite exposes nothing.
    pub fn index_case_sensitivity_supported(&self) -> bool {
        matches!(self, Engine::Postgres)
    }

    /// Whether the column collation decides case sensitivity (`utf8_unicode_ci`)
    pub fn collation_decides_case(&self) -> bool {
        matches!(self, Engine::Mysql)
    }
}

/// Settings for resolving what index metadata cannot answer
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct IntrospectionConfig {
    /// Engine the application runs against; selects the collation fallback
    #[serde(default)]
    pub engine: Engine,
    /// Answer used by `ColumnIndexView::case_sensitivity` when neither the
    /// indexes nor the column collation can tell
    #[serde(default)]
    pub assume_case_sensitive: Option<bool>,
}

impl IntrospectionConfig {
    /// Load from `config/config.toml`, falling back to env vars.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load from the given file (optional) layered under `LIFEGUARD__*` env vars.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let builder = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("LIFEGUARD").separator("__"));

        let settings = match builder.build() {
            Ok(cfg) => cfg,
            Err(err) => {
                if path.exists() {
                    log::warn!(
                        "failed to load config file {}, falling back to env: {}",
                        path.display(),
                        err
                    );
                }
                Config::builder()
                    .add_source(Environment::with_prefix("LIFEGUARD").separator("__"))
                    .build()
                    .map_err(|env_err| {
                        ConfigError::Message(format!(
                            "Failed to load configuration from file and env: {}, then env-only error: {}",
                            err, env_err
                        ))
                    })?
            }
        };

        match settings.get::<IntrospectionConfig>("introspection") {
            Ok(cfg) => Ok(cfg),
            Err(ConfigError::NotFound(_)) => {
                log::debug!("no [introspection] section configured, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::Message(format!(
                "Introspection configuration could not be loaded from file or environment: {}",
                e
            ))),
        }
    }
}
