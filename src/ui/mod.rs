//! Presentation layer: cell formatting and view models.
//!
//! Nothing here draws. The embedding UI renders a
//! [`TableViewModel`](viewmodel::TableViewModel):
//!
//! ```text
//! TableState → compute_viewmodel → TableViewModel → embedding renderer
//! ```
//!
//! # Modules
//!
//! - [`format`]: Cell text formatting by value type
//! - [`viewmodel`]: View model types representing renderable table state

pub mod format;
pub mod viewmodel;

pub use format::{display_value, format_cell, EMPTY_TEXT};
pub use viewmodel::{HeaderCell, PaginationInfo, SearchField, SearchForm, TableViewModel};
