//! Local search over the static catalog
//!
//! - `filter`: pure case-insensitive title matching
//! - `debounce`: quiescence gate between keystrokes and filtering

pub mod debounce;
pub mod filter;

pub use debounce::{DebounceState, Debouncer};
pub use filter::{filter, filter_catalog, SearchResults};
