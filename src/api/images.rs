//! TMDB image CDN URLs
//!
//! Two size variants are used: `w500` thumbnails for rows and
//! originals for the detail hero. Missing paths fall back to a placeholder.

use crate::config::TmdbSettings;

pub const THUMBNAIL_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Image";
pub const ORIGINAL_PLACEHOLDER: &str = "https://via.placeholder.com/1920x1080?text=No+Image";

/// Builds image URLs from paths returned by the metadata API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrls {
    thumbnail_base: String,
    original_base: String,
}

impl ImageUrls {
    pub fn new(thumbnail_base: impl Into<String>, original_base: impl Into<String>) -> Self {
        Self {
            thumbnail_base: thumbnail_base.into(),
            original_base: original_base.into(),
        }
    }

    pub fn from_settings(settings: &TmdbSettings) -> Self {
        Self::new(
            settings.image_base_url.clone(),
            settings.image_original_url.clone(),
        )
    }

    /// Thumbnail URL, or the poster placeholder when there is no path
    pub fn thumbnail(&self, path: Option<&str>) -> String {
        join(&self.thumbnail_base, path, THUMBNAIL_PLACEHOLDER)
    }

    /// Original-size URL, or the backdrop placeholder when there is no path
    pub fn original(&self, path: Option<&str>) -> String {
        join(&self.original_base, path, ORIGINAL_PLACEHOLDER)
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self::new(
            crate::config::DEFAULT_IMAGE_BASE_URL,
            crate::config::DEFAULT_IMAGE_ORIGINAL_URL,
        )
    }
}

fn join(base: &str, path: Option<&str>, placeholder: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}{}", base, p),
        _ => placeholder.to_string(),
    }
}
