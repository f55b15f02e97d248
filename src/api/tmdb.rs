//! TMDB (The Movie Database) gateway
//!
//! The only code that talks to the network. Every public operation
//! issues at most one request and never returns an error: failures are
//! logged and turned into an empty list or `None`.
//! API docs: https://developer.themoviedb.org/docs

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::TmdbSettings;
use crate::models::{CastMember, MediaDetail, MediaItem, MediaType};

/// Why a remote fetch failed. Only used for logging; callers see empty results.
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Unexpected status: {0}")]
    Status(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TMDB API client
#[derive(Debug, Clone)]
pub struct TmdbClient {
    bearer: String,
    base_url: String,
    client: reqwest::Client,
}

impl TmdbClient {
    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(bearer: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            bearer: bearer.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Create a client from resolved configuration
    pub fn from_settings(settings: &TmdbSettings) -> Self {
        Self::with_base_url(settings.bearer(), settings.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make one authenticated GET request and decode the JSON body
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.base_url, endpoint);
        tracing::debug!(%url, "TMDB request");

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.bearer))
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                serde_json::from_str(&body)
                    .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))
            }
            StatusCode::NOT_FOUND => Err(TmdbError::NotFound),
            status => Err(TmdbError::Status(status.as_u16())),
        }
    }

    /// Fetch a results list; any failure becomes an empty list
    async fn fetch_list(&self, endpoint: &str, default_type: MediaType, what: &str) -> Vec<MediaItem> {
        match self.get::<ListResponse>(endpoint).await {
            Ok(response) => {
                let items = response.into_items(default_type);
                tracing::debug!(count = items.len(), what, "TMDB list loaded");
                items
            }
            Err(e) => {
                tracing::warn!(error = %e, what, "Error fetching list, returning empty");
                Vec::new()
            }
        }
    }

    /// Titles trending today across movies and TV
    pub async fn fetch_trending(&self) -> Vec<MediaItem> {
        self.fetch_list("/trending/all/day?language=en-US", MediaType::Movie, "trending")
            .await
    }

    /// Top rated movies, first page
    pub async fn fetch_top_rated(&self) -> Vec<MediaItem> {
        self.fetch_list(
            "/movie/top_rated?language=en-US&page=1",
            MediaType::Movie,
            "top rated",
        )
        .await
    }

    /// Multi-search for movies and shows. An empty query makes no request.
    pub async fn search_movies(&self, query: &str) -> Vec<MediaItem> {
        if query.is_empty() {
            return Vec::new();
        }

        let endpoint = format!(
            "/search/multi?query={}&include_adult=false&language=en-US&page=1",
            urlencoding::encode(query)
        );
        self.fetch_list(&endpoint, MediaType::Movie, "search").await
    }

    /// Details for one title with credits and similar titles appended.
    /// Returns `None` on any failure.
    pub async fn fetch_details(&self, id: &str, kind: MediaType) -> Option<MediaDetail> {
        let id = id.trim();
        if id.is_empty() {
            tracing::warn!(%kind, "Details requested without an id");
            return None;
        }

        let endpoint = format!(
            "/{}/{}?language=en-US&append_to_response=credits,similar",
            kind.as_path(),
            urlencoding::encode(id)
        );

        match self.get::<DetailResponse>(&endpoint).await {
            Ok(response) => Some(response.into_detail(kind)),
            Err(e) => {
                tracing::warn!(error = %e, id, %kind, "Error fetching details");
                None
            }
        }
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<MediaItemRaw>,
}

impl ListResponse {
    fn into_items(self, default_type: MediaType) -> Vec<MediaItem> {
        self.results
            .into_iter()
            .filter_map(|r| r.into_media_item(default_type))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MediaItemRaw {
    id: u64,
    // Only multi endpoints carry it; top_rated and similar do not
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    adult: Option<bool>,
}

impl MediaItemRaw {
    fn into_media_item(self, default_type: MediaType) -> Option<MediaItem> {
        let media_type = match self.media_type.as_deref() {
            Some(t) => MediaType::parse(t)?, // drops "person" results
            None => default_type,
        };
        Some(self.build(media_type))
    }

    fn build(self, media_type: MediaType) -> MediaItem {
        let release_date = self
            .release_date
            .filter(|d| !d.is_empty())
            .or(self.first_air_date.filter(|d| !d.is_empty()));

        MediaItem {
            id: self.id,
            title: self.title.or(self.name).unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            media_type,
            release_date,
            overview: self.overview.unwrap_or_default(),
            adult: self.adult.unwrap_or(false),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    #[serde(flatten)]
    item: MediaItemRaw,
    runtime: Option<u32>,
    number_of_seasons: Option<u32>,
    #[serde(default)]
    genres: Vec<NamedRaw>,
    #[serde(default)]
    created_by: Vec<NamedRaw>,
    credits: Option<CreditsRaw>,
    similar: Option<ListResponse>,
}

impl DetailResponse {
    fn into_detail(self, kind: MediaType) -> MediaDetail {
        let cast = self
            .credits
            .map(|c| c.cast.into_iter().map(CastRaw::into_member).collect())
            .unwrap_or_default();
        let similar = self
            .similar
            .map(|s| s.into_items(kind))
            .unwrap_or_default();

        // Detail payloads carry no media_type; the requested kind wins
        let item = self.item.build(kind);

        MediaDetail {
            item,
            runtime: self.runtime,
            number_of_seasons: self.number_of_seasons,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            created_by: self.created_by.into_iter().map(|c| c.name).collect(),
            cast,
            similar,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NamedRaw {
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreditsRaw {
    #[serde(default)]
    cast: Vec<CastRaw>,
}

#[derive(Debug, Deserialize)]
struct CastRaw {
    name: String,
    character: Option<String>,
}

impl CastRaw {
    fn into_member(self) -> CastMember {
        CastMember {
            name: self.name,
            character: self.character.filter(|c| !c.is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(media_type: Option<&str>) -> MediaItemRaw {
        MediaItemRaw {
            id: 1,
            media_type: media_type.map(String::from),
            name: Some("Show".into()),
            first_air_date: Some("2019-11-12".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_media_type_filter() {
        assert!(raw(Some("movie")).into_media_item(MediaType::Movie).is_some());
        assert!(raw(Some("person")).into_media_item(MediaType::Movie).is_none());
    }

    #[test]
    fn test_missing_media_type_uses_default() {
        let item = raw(None).into_media_item(MediaType::Tv).unwrap();
        assert_eq!(item.media_type, MediaType::Tv);
        assert_eq!(item.title, "Show");
        assert_eq!(item.release_date.as_deref(), Some("2019-11-12"));
    }

    #[test]
    fn test_empty_date_becomes_none() {
        let mut r = raw(Some("tv"));
        r.first_air_date = Some(String::new());
        assert_eq!(r.into_media_item(MediaType::Movie).unwrap().release_date, None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = TmdbClient::with_base_url("t", "http://localhost:1234/");
        assert_eq!(client.base_url(), "http://localhost:1234");
    }
}
