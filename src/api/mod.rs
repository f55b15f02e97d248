//! Clients for external services
//!
//! - TMDB: movie/TV metadata, trending rows and search
//! - Images: URL building against the TMDB image CDN

pub mod images;
pub mod tmdb;

pub use images::ImageUrls;
pub use tmdb::{TmdbClient, TmdbError};
