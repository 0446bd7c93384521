//! Domain layer for the table core.
//!
//! Core types shared by every other layer, independent of any rendering or
//! framework concern.
//!
//! # Organization
//!
//! - [`column`]: Column descriptor model
//! - [`error`]: Error types and result aliases
//! - [`failure`]: Conversion of raised failures into tagged error values
//!
//! # Examples
//!
//! ```
//! use protable::domain::{Column, Result};
//!
//! fn parse_column(text: &str) -> Result<Column> {
//!     Ok(serde_json::from_str(text)?)
//! }
//!
//! let column = parse_column(r#"{"title": "Name", "dataIndex": "name"}"#)?;
//! assert_eq!(column.title.as_deref(), Some("Name"));
//! # Ok::<(), protable::TableError>(())
//! ```

pub mod column;
pub mod error;
pub mod failure;

pub use column::{
    Align, CellContext, CellRenderer, Column, ColumnWidth, FieldComponent, FieldKind, FieldRule,
    Fixed, Sorter,
};
pub use error::{ProTableError, Result, TableError};
pub use failure::{handle_error, handle_error_with, safe_execute, safe_execute_with, Failure};
