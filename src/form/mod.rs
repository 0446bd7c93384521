//! Search form data shaping.
//!
//! - [`codec`]: flat ↔ nested form value conversion and blank filtering

pub mod codec;

pub use codec::{filter_empty, flatten, is_blank, unflatten, FormValues, FIELD_DELIMITER, MAX_INDEX};
