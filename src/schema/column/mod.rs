//! Column metadata and index participation.
//!
//! # Structure
//!
//! - `definition`: Column metadata and the required-on classification
//! - `index_view`: Index-derived facts about one column

pub mod definition;
pub mod index_view;

// Re-export public types
pub use definition::{required_on, ColumnDefinition, RequiredOn};
pub use index_view::ColumnIndexView;
