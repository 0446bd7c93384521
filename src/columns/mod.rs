//! Column descriptor handling.
//!
//! Raw configuration flows through this module before anything is rendered:
//!
//! ```text
//! raw JSON ──validate──▶ ColumnValidation (messages, never raised)
//!     │
//!     └──decode──▶ Vec<Column> ──normalize──▶ Vec<Column>
//!                                               │
//!                         ┌─────────────────────┴─────────────────────┐
//!                   table_columns                               search_fields
//! ```
//!
//! # Modules
//!
//! - [`validate`]: Structural checks with accumulated messages
//! - [`normalize`]: Derived defaults (`name`, `label`, `hideInTable`, `fieldProps`)
//! - [`builder`]: Fluent descriptor construction
//! - [`decode`]: Tolerant decoding of raw configuration
//! - [`layout`]: Visible column sets and search field ordering

pub mod builder;
pub mod decode;
pub mod layout;
pub mod normalize;
pub mod validate;

pub use builder::ColumnBuilder;
pub use decode::{decode_columns, prepare_columns, prepare_columns_from_str, ColumnSet};
pub use layout::{search_fields, table_columns};
pub use normalize::{normalize_column, normalize_columns};
pub use validate::{validate_columns, ColumnValidation, INVALID_COLUMNS_CODE};
