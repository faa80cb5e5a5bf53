//! Error types for schema introspection.
//!
//! Only a few operations can fail: case-sensitivity lookups against index
//! metadata that does not carry the flag, table validation and table lookup
//! in a snapshot. Everything else in the crate is total over its input.

/// Errors raised while inspecting column and index metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    /// The index metadata does not expose the capability the operation needs
    UnsupportedOperation {
        operation: &'static str,
        index: String,
    },
    /// An index references a column the table does not define
    UnknownIndexColumn {
        table: String,
        index: String,
        column: String,
    },
    /// No table with this name exists in the snapshot
    TableNotFound(String),
}

impl std::fmt::Display for IntrospectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntrospectionError::UnsupportedOperation { operation, index } => write!(
                f,
                "Unsupported operation '{}': index '{}' does not report case sensitivity.\n\
                 The storage engine's index metadata has no case-sensitivity flag; \
                 resolve through the column collation or configure a fallback",
                operation, index
            ),
            IntrospectionError::UnknownIndexColumn {
                table,
                index,
                column,
            } => write!(
                f,
                "Index '{}' on table '{}' references unknown column '{}'",
                index, table, column
            ),
            IntrospectionError::TableNotFound(table) => {
                write!(f, "Table not found in schema snapshot: {}", table)
            }
        }
    }
}

impl std::error::Error for IntrospectionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_operation_display_names_index() {
        let err = IntrospectionError::UnsupportedOperation {
            operation: "is_case_sensitive",
            index: "idx_users_login".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("is_case_sensitive"));
        assert!(msg.contains("idx_users_login"));
    }

    #[test]
    fn test_unknown_index_column_display() {
        let err = IntrospectionError::UnknownIndexColumn {
            table: "users".to_string(),
            index: "idx_users_email".to_string(),
            column: "email".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Index 'idx_users_email' on table 'users' references unknown column 'email'"
        );
    }
}
