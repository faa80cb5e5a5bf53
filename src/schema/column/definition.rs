//! Column definition metadata.
//!
//! This module provides `ColumnDefinition`, which stores what a schema
//! snapshot knows about a single column: its engine-reported type,
//! nullability, defaults and collation. It also classifies when a value for
//! the column must be supplied ([`RequiredOn`]).

use serde::{Deserialize, Serialize};

/// Column definition metadata
///
/// A column holds no reference to its owning table, so it serializes
/// without cycles and can be shared freely between snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Column name, unique within its table
    pub name: String,
    /// Engine-reported type (e.g., "character varying", "varchar(255)")
    #[serde(default)]
    pub sql_type: Option<String>,
    /// Whether the column is nullable
    #[serde(default)]
    pub nullable: bool,
    /// Default value (if any)
    #[serde(default)]
    pub default_value: Option<String>,
    /// Default SQL expression (e.g., "NOW()", "uuid_generate_v4()")
    #[serde(default)]
    pub default_expr: Option<String>,
    /// Whether the column is a PostgreSQL array
    #[serde(default)]
    pub array: bool,
    /// Collation name (e.g., "utf8_unicode_ci")
    #[serde(default)]
    pub collation: Option<String>,
    /// Column comment/documentation
    #[serde(default)]
    pub comment: Option<String>,
}

/// When a column must be given a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredOn {
    /// The column may be null
    None,
    /// No default exists, so a value is needed when the row is created
    OnSave,
    /// A default covers creation; the value may not be cleared on update
    OnUpdate,
}

impl RequiredOn {
    pub fn is_required(&self) -> bool {
        !matches!(self, RequiredOn::None)
    }
}

/// Classify when `column` requires a value. Ignores indexes entirely.
pub fn required_on(column: &ColumnDefinition) -> RequiredOn {
    if column.nullable {
        RequiredOn::None
    } else if !column.has_default() {
        RequiredOn::OnSave
    } else {
        RequiredOn::OnUpdate
    }
}

impl ColumnDefinition {
    /// Create a non-null column with no type or default
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn sql_type(mut self, sql_type: impl Into<String>) -> Self {
        self.sql_type = Some(sql_type.into());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default_expr = Some(expr.into());
        self
    }

    pub fn array(mut self, array: bool) -> Self {
        self.array = array;
        self
    }

    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Whether either a literal or an expression default is present
    pub fn has_default(&self) -> bool {
        self.default_value.is_some() || self.default_expr.is_some()
    }

    /// See [`required_on`].
    pub fn required_on(&self) -> RequiredOn {
        required_on(self)
    }

    /// Case sensitivity implied by the column collation.
    ///
    /// MySQL names collations by suffix: `_ci` is case-insensitive, `_cs` and
    /// `_bin` (or `binary`) compare exactly. Returns `None` when there is no
    /// collation or its name does not say.
    pub fn collation_case_sensitive(&self) -> Option<bool> {
        let collation = self.collation.as_deref()?.to_lowercase();
        if collation.ends_with("_ci") {
            Some(false)
        } else if collation.ends_with("_cs") || collation.ends_with("_bin") || collation == "binary"
        {
            Some(true)
        } else {
            None
        }
    }

    /// JSON projection of the column
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_definition_default() {
        let def = ColumnDefinition::default();
        assert_eq!(def.name, "");
        assert_eq!(def.sql_type, None);
        assert!(!def.nullable);
        assert_eq!(def.default_value, None);
        assert_eq!(def.default_expr, None);
        assert!(!def.array);
        assert_eq!(def.collation, None);
        assert_eq!(def.comment, None);
    }

    #[test]
    fn test_required_on_nullable() {
        let login = ColumnDefinition::new("login").nullable(true);
        assert_eq!(login.required_on(), RequiredOn::None);
        assert!(!login.required_on().is_required());
    }

    #[test]
    fn test_required_on_save_without_default() {
        let login = ColumnDefinition::new("login").nullable(false);
        assert_eq!(login.required_on(), RequiredOn::OnSave);
    }

    #[test]
    fn test_required_on_update_with_default() {
        let login = ColumnDefinition::new("login").default_value("foo");
        assert_eq!(required_on(&login), RequiredOn::OnUpdate);

        let created_at = ColumnDefinition::new("created_at").default_expr("NOW()");
        assert_eq!(created_at.required_on(), RequiredOn::OnUpdate);
    }

    #[test]
    fn test_nullable_with_default_is_not_required() {
        let login = ColumnDefinition::new("login")
            .nullable(true)
            .default_value("foo");
        assert_eq!(login.required_on(), RequiredOn::None);
    }

    #[test]
    fn test_collation_case_sensitive() {
        let column = ColumnDefinition::new("login");
        assert_eq!(column.collation_case_sensitive(), None);
        assert_eq!(
            column.clone().collation("utf8_unicode_ci").collation_case_sensitive(),
            Some(false)
        );
        assert_eq!(
            column.clone().collation("latin1_general_cs").collation_case_sensitive(),
            Some(true)
        );
        assert_eq!(
            column.clone().collation("utf8mb4_BIN").collation_case_sensitive(),
            Some(true)
        );
        assert_eq!(
            column.collation("en_US.UTF-8").collation_case_sensitive(),
            None
        );
    }

    #[test]
    fn test_json_projection() {
        let login = ColumnDefinition::new("login").sql_type("character varying");
        let json = login.to_json();
        assert_eq!(json["name"], "login");
        assert_eq!(json["sql_type"], "character varying");
        assert_eq!(json["nullable"], false);
        assert!(json.get("table").is_none());
    }

    #[test]
    fn test_array_column_survives_json() {
        let alpha = ColumnDefinition::new("alpha")
            .sql_type("character varying[]")
            .array(true)
            .default_value("{}");
        let back: ColumnDefinition = serde_json::from_value(alpha.to_json()).unwrap();
        assert!(back.array);
        assert_eq!(back, alpha);
    }

    #[test]
    fn test_required_on_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(RequiredOn::OnSave).unwrap(),
            serde_json::json!("on_save")
        );
    }
}
