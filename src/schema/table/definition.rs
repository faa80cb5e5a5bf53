//! Table definition metadata.
//!
//! This module provides `TableDefinition`, which owns the columns and indexes
//! of one table in a schema snapshot, and `IndexDefinition`. Indexes refer to
//! columns by name only.

use crate::config::Engine;
use crate::error::IntrospectionError;
use crate::schema::column::{ColumnDefinition, ColumnIndexView};
use sea_query::{Alias, Index, IndexCreateStatement, PostgresQueryBuilder};
use serde::{Deserialize, Serialize};

/// Table definition metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Table name
    pub name: String,
    /// Table comment/documentation
    #[serde(default)]
    pub comment: Option<String>,
    /// Columns in declaration order
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    /// Index definitions
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
}

/// Index definition metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Index name
    pub name: String,
    /// Column names (for composite indexes)
    pub columns: Vec<String>,
    /// Whether this is a unique index
    #[serde(default)]
    pub unique: bool,
    /// Partial index WHERE clause (if any)
    #[serde(default)]
    pub partial_where: Option<String>,
    /// Whether comparisons through this index distinguish letter case.
    /// `None` when the engine's index metadata does not carry the flag.
    #[serde(default)]
    pub case_sensitive: Option<bool>,
}

impl IndexDefinition {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    pub fn partial_where(mut self, predicate: impl Into<String>) -> Self {
        self.partial_where = Some(predicate.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = Some(case_sensitive);
        self
    }

    /// Whether `column` participates in this index
    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Normalize the case-sensitivity flag for what `engine` reports.
    ///
    /// Engines without the capability lose the flag. On PostgreSQL a missing
    /// flag means a plain column index, which compares case-sensitively.
    pub fn with_engine_defaults(mut self, engine: Engine) -> Self {
        if !engine.index_case_sensitivity_supported() {
            self.case_sensitive = None;
        } else if self.case_sensitive.is_none() {
            self.case_sensitive = Some(true);
        }
        self
    }

    /// Build a `CREATE INDEX` statement for this index on `table`
    ///
    /// The partial `WHERE` clause is not part of the returned statement;
    /// [`IndexDefinition::to_sql`] appends it.
    pub fn to_create_statement(&self, table: &str) -> IndexCreateStatement {
        let mut stmt = Index::create();
        stmt.name(self.name.as_str()).table(Alias::new(table));
        for column in &self.columns {
            stmt.col(Alias::new(column.as_str()));
        }
        if self.unique {
            stmt.unique();
        }
        stmt
    }

    /// Render the PostgreSQL `CREATE INDEX` text, including any partial predicate
    pub fn to_sql(&self, table: &str) -> String {
        let mut sql = self.to_create_statement(table).build(PostgresQueryBuilder);
        if let Some(ref predicate) = self.partial_where {
            sql.push_str(" WHERE ");
            sql.push_str(predicate);
        }
        sql
    }
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn column(mut self, column: ColumnDefinition) -> Self {
        self.columns.push(column);
        self
    }

    pub fn index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    /// Look up a column by name
    pub fn find_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Index view of the named column. An unknown name yields a view with no indexes.
    pub fn view<'a>(&'a self, column: &'a str) -> ColumnIndexView<'a> {
        ColumnIndexView::new(column, &self.indexes)
    }

    /// Names of the columns that participate in at least one unique index
    pub fn unique_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.view(&c.name).is_unique())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Check that every index references only columns this table defines.
    ///
    /// Returns the first violation; every violation is logged.
    pub fn validate(&self) -> Result<(), IntrospectionError> {
        let mut first = None;
        for index in &self.indexes {
            for column in &index.columns {
                if self.find_column(column).is_none() {
                    log::warn!(
                        "index '{}' on table '{}' references unknown column '{}'",
                        index.name,
                        self.name,
                        column
                    );
                    first.get_or_insert_with(|| IntrospectionError::UnknownIndexColumn {
                        table: self.name.clone(),
                        index: index.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }
        match first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Apply [`IndexDefinition::with_engine_defaults`] to every index
    pub fn with_engine_defaults(mut self, engine: Engine) -> Self {
        self.indexes = self
            .indexes
            .into_iter()
            .map(|i| i.with_engine_defaults(engine))
            .collect();
        self
    }
}
