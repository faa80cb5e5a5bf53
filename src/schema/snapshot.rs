//! Schema snapshots.
//!
//! A [`SchemaSnapshot`] is the read-only table catalog that column views are
//! computed against. Snapshots are built in code or loaded from a TOML, YAML
//! or JSON file:
//!
//! ```toml
//! engine = "postgres"
//!
//! [[tables]]
//! name = "users"
//! columns = [
//!     { name = "login", sql_type = "character varying" },
//! ]
//! indexes = [
//!     { name = "idx_users_login", columns = ["login"], unique = true },
//! ]
//! ```

use crate::config::Engine;
use crate::error::IntrospectionError;
use crate::schema::column::ColumnIndexView;
use crate::schema::table::TableDefinition;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    #[serde(default)]
    pub engine: Engine,
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

impl SchemaSnapshot {
    pub fn new(engine: Engine) -> Self {
        Self {
            engine,
            tables: Vec::new(),
        }
    }

    pub fn table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Load a snapshot file; the format follows the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("load_schema_snapshot", path = %path.display()).entered();

        let snapshot: SchemaSnapshot = Config::builder()
            .add_source(File::from(path))
            .build()?
            .try_deserialize()?;
        log::debug!(
            "loaded schema snapshot from {} ({} tables)",
            path.display(),
            snapshot.tables.len()
        );
        Ok(snapshot)
    }

    /// Parse a snapshot from an in-memory document
    pub fn parse(contents: &str, format: FileFormat) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(contents, format))
            .build()?
            .try_deserialize()
    }

    pub fn find_table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }

    pub fn require_table(&self, name: &str) -> Result<&TableDefinition, IntrospectionError> {
        self.find_table(name)
            .ok_or_else(|| IntrospectionError::TableNotFound(name.to_string()))
    }

    /// View of `column` within `table`.
    pub fn view<'a>(
        &'a self,
        table: &str,
        column: &'a str,
    ) -> Result<ColumnIndexView<'a>, IntrospectionError> {
        Ok(self.require_table(table)?.view(column))
    }

    /// Validate every table, returning the first violation found
    pub fn validate(&self) -> Result<(), IntrospectionError> {
        self.tables.iter().try_for_each(TableDefinition::validate)
    }

    /// Normalize index case-sensitivity flags for the snapshot's engine
    pub fn normalized(mut self) -> Self {
        let engine = self.engine;
        self.tables = self
            .tables
            .into_iter()
            .map(|t| t.with_engine_defaults(engine))
            .collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::column::ColumnDefinition;
    use crate::schema::table::IndexDefinition;

    const USERS_TOML: &str = r#"
engine = "postgres"

[[tables]]
name = "users"
columns = [
    { name = "login", sql_type = "character varying" },
    { name = "email", sql_type = "character varying", nullable = true },
]
indexes = [
    { name = "idx_users_login", columns = ["login"], unique = true },
    { name = "idx_users_lower_email", columns = ["email"], case_sensitive = false },
]
"#;

    #[test]
    fn test_parse_toml() {
        let snapshot = SchemaSnapshot::parse(USERS_TOML, FileFormat::Toml).unwrap();
        assert_eq!(snapshot.engine, Engine::Postgres);
        let users = snapshot.require_table("users").unwrap();
        assert_eq!(users.columns.len(), 2);
        assert!(users.columns[1].nullable);
        assert_eq!(users.indexes[0].case_sensitive, None);
        assert_eq!(users.indexes[1].case_sensitive, Some(false));
    }

    #[test]
    fn test_view_through_snapshot() {
        let snapshot = SchemaSnapshot::parse(USERS_TOML, FileFormat::Toml).unwrap();
        let login = snapshot.view("users", "login").unwrap();
        assert!(login.is_unique());
        assert_eq!(login.unique_scope(), Some(vec![]));
    }

    #[test]
    fn test_missing_table() {
        let snapshot = SchemaSnapshot::new(Engine::Sqlite);
        assert_eq!(
            snapshot.view("users", "login").err(),
            Some(IntrospectionError::TableNotFound("users".to_string()))
        );
    }

    #[test]
    fn test_normalized_postgres_fills_flags() {
        let snapshot = SchemaSnapshot::parse(USERS_TOML, FileFormat::Toml)
            .unwrap()
            .normalized();
        let login = snapshot.view("users", "login").unwrap();
        assert_eq!(login.is_case_sensitive(), Ok(true));
        let email = snapshot.view("users", "email").unwrap();
        assert_eq!(email.is_case_sensitive(), Ok(false));
    }

    #[test]
    fn test_validate_snapshot() {
        let snapshot = SchemaSnapshot::new(Engine::Mysql).table(
            TableDefinition::new("users")
                .column(ColumnDefinition::new("login"))
                .index(IndexDefinition::new("idx_users_email", ["email"])),
        );
        assert!(matches!(
            snapshot.validate(),
            Err(IntrospectionError::UnknownIndexColumn { .. })
        ));
    }
}
