//! # Lifeguard Columns
//!
//! Index-aware column metadata for Lifeguard schema snapshots.
//!
//! Given a column and the index list of its table, [`ColumnIndexView`]
//! reports which indexes cover the column, whether it is unique, which
//! columns share its unique constraint and whether it compares
//! case-sensitively. [`ColumnDefinition::required_on`] classifies when a
//! value for the column must be supplied.
//!
//! ```
//! use lifeguard_columns::{ColumnDefinition, IndexDefinition, RequiredOn, TableDefinition};
//!
//! let users = TableDefinition::new("users")
//!     .column(ColumnDefinition::new("login").sql_type("character varying"))
//!     .index(IndexDefinition::new("idx_users_login", ["login"]).unique(true));
//!
//! let login = users.view("login");
//! assert!(login.is_unique());
//! assert_eq!(login.unique_scope(), Some(vec![]));
//! assert_eq!(users.columns[0].required_on(), RequiredOn::OnSave);
//! ```

pub mod config;
pub mod error;
pub mod schema;

pub use crate::config::{Engine, IntrospectionConfig};
pub use error::IntrospectionError;
pub use schema::{
    required_on, ColumnDefinition, ColumnIndexView, IndexDefinition, RequiredOn, SchemaSnapshot,
    TableDefinition,
};
