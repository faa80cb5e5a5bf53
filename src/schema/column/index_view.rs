//! Index participation of a single column.
//!
//! [`ColumnIndexView`] answers questions about one column relative to the
//! full index list of its table: which indexes cover it, whether it is unique,
//! which columns share its unique constraint and whether it compares
//! case-sensitively. The view borrows the index list and never mutates it,
//! so any number of threads may query the same snapshot.
//!
//! ```
//! use lifeguard_columns::{ColumnIndexView, IndexDefinition};
//!
//! let indexes = vec![
//!     IndexDefinition::new("idx_users_name", ["first", "middle", "last"]).unique(true),
//! ];
//! let view = ColumnIndexView::new("first", &indexes);
//! assert!(view.is_unique());
//! assert_eq!(view.unique_scope(), Some(vec!["middle".to_string(), "last".to_string()]));
//! ```

use super::definition::{ColumnDefinition, RequiredOn};
use crate::config::IntrospectionConfig;
use crate::error::IntrospectionError;
use crate::schema::table::IndexDefinition;

/// Index-derived facts about one column, borrowed from its table's index list
#[derive(Debug, Clone, Copy)]
pub struct ColumnIndexView<'a> {
    column: &'a str,
    indexes: &'a [IndexDefinition],
}

impl<'a> ColumnIndexView<'a> {
    /// View `column` against `indexes`, the full index list of its table
    pub fn new(column: &'a str, indexes: &'a [IndexDefinition]) -> Self {
        Self { column, indexes }
    }

    /// Name of the viewed column
    pub fn column(&self) -> &'a str {
        self.column
    }

    /// Indexes that refer to this column, in table order.
    ///
    /// Empty when none do, including when the column does not exist.
    pub fn indexes(&self) -> Vec<&'a IndexDefinition> {
        self.containing().collect()
    }

    fn containing(&self) -> impl Iterator<Item = &'a IndexDefinition> + 'a {
        let (column, indexes) = (self.column, self.indexes);
        indexes.iter().filter(move |i| i.contains(column))
    }

    /// True if the column is in at least one unique index. See also
    /// [`ColumnIndexView::unique_scope`].
    pub fn is_unique(&self) -> bool {
        self.containing().any(|i| i.unique)
    }

    /// Other columns of the narrowest unique index covering this column.
    ///
    /// `None` if the column is in no unique index; `Some(vec![])` if that
    /// index covers this column alone. Among equally narrow unique indexes
    /// the first in table order wins.
    pub fn unique_scope(&self) -> Option<Vec<String>> {
        let index = self
            .containing()
            .filter(|i| i.unique)
            .min_by_key(|i| i.columns.len())?;
        Some(
            index
                .columns
                .iter()
                .filter(|name| name.as_str() != self.column)
                .cloned()
                .collect(),
        )
    }

    /// True if any index covering the column is case-sensitive.
    ///
    /// A case-sensitive index answers regardless of where it sits in the
    /// list. Otherwise, an index whose metadata has no case-sensitivity flag
    /// makes the answer unknowable and yields
    /// [`IntrospectionError::UnsupportedOperation`]. A column with no indexes
    /// is not case-sensitive.
    pub fn is_case_sensitive(&self) -> Result<bool, IntrospectionError> {
        if self.containing().any(|i| i.case_sensitive == Some(true)) {
            return Ok(true);
        }
        if let Some(index) = self.containing().find(|i| i.case_sensitive.is_none()) {
            log::debug!(
                "index '{}' carries no case-sensitivity flag (column '{}')",
                index.name,
                self.column
            );
            return Err(IntrospectionError::UnsupportedOperation {
                operation: "is_case_sensitive",
                index: index.name.clone(),
            });
        }
        Ok(false)
    }

    /// Case sensitivity with fallbacks for engines whose indexes lack the flag.
    ///
    /// Tries the index flags first, then the column collation when
    /// `config.engine` compares through collations, then
    /// `config.assume_case_sensitive`. If none of them answers, the
    /// index error is returned.
    pub fn case_sensitivity(
        &self,
        column: &ColumnDefinition,
        config: &IntrospectionConfig,
    ) -> Result<bool, IntrospectionError> {
        match self.is_case_sensitive() {
            Ok(sensitive) => Ok(sensitive),
            Err(err) => {
                let from_collation = if config.engine.collation_decides_case() {
                    column.collation_case_sensitive()
                } else {
                    None
                };
                if let Some(sensitive) = from_collation {
                    log::trace!(
                        "column '{}' case sensitivity taken from collation",
                        self.column
                    );
                    return Ok(sensitive);
                }
                config.assume_case_sensitive.ok_or(err)
            }
        }
    }

    /// See [`ColumnDefinition::required_on`].
    pub fn required_on(column: &ColumnDefinition) -> RequiredOn {
        column.required_on()
    }
}
