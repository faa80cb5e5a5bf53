//! Table-level metadata: columns and indexes.

pub mod definition;

pub use definition::{IndexDefinition, TableDefinition};
