//! flixtui - Netflix-style terminal browser
//!
//! Browse trending and top rated titles from TMDB, search a built-in
//! catalog of games and shows, and open details, all from the terminal.
//!
//! # Modules
//!
//! - `models` - Media items, details and the static catalog
//! - `api` - TMDB gateway and image URL helpers
//! - `search` - Catalog filtering and the debounce gate
//! - `screens` - Per-screen state
//! - `app` - Navigation stack, key handling and async result routing
//! - `loader` - Runs screen requests on tokio tasks
//! - `ui` - TUI rendering and theming

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod loader;
pub mod logging;
pub mod models;
pub mod screens;
pub mod search;
pub mod ui;

// Re-export commonly used types
pub use models::{
    CastMember, Catalog, CatalogEntry, ComingSoonEntry, MediaDetail, MediaItem, MediaType,
};

pub use api::{ImageUrls, TmdbClient, TmdbError};
pub use app::{App, AppEvent, AppState, Request};
pub use config::Config;
pub use search::{Debouncer, SearchResults};
