//! Schema metadata and index introspection.
//!
//! # Architecture
//!
//! - **Column**: column metadata (`ColumnDefinition`) and the per-column index
//!   view (`ColumnIndexView`)
//! - **Table**: table-level metadata (`TableDefinition`, `IndexDefinition`)
//! - **Snapshot**: a catalog of tables loaded from code or a file
//!
//! Indexes reference columns by name only; a view is recomputed from a column
//! name and a borrowed index list whenever it is needed.

// Column operations
pub mod column;
#[doc(inline)]
pub use column::{required_on, ColumnDefinition, ColumnIndexView, RequiredOn};

// Table operations
pub mod table;
#[doc(inline)]
pub use table::{IndexDefinition, TableDefinition};

// Snapshot loading
pub mod snapshot;
#[doc(inline)]
pub use snapshot::SchemaSnapshot;
