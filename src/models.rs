//! Data structures shared across flixtui
//!
//! - **Media**: items and details from the TMDB gateway
//! - **Catalog**: the static lists the local search screen filters over
//! - **Profiles**: the names shown on the profile picker

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Media Models (TMDB)
// =============================================================================

/// Media type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
    Tv,
}

impl MediaType {
    /// Path segment used by the details endpoint
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Parse "movie" / "tv"; anything else (e.g. "person") is None
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "movie" => Some(MediaType::Movie),
            "tv" => Some(MediaType::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaType::Movie => write!(f, "Movie"),
            MediaType::Tv => write!(f, "TV Show"),
        }
    }
}

/// A movie or show as returned by list endpoints.
///
/// Immutable once fetched. UI-only flags (my list, rated) live on the
/// screen that shows the item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    /// `title` for movies, `name` for shows
    pub title: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub media_type: MediaType,
    /// `release_date` for movies, `first_air_date` for shows
    pub release_date: Option<String>,
    pub overview: String,
    pub adult: bool,
}

impl MediaItem {
    /// Release year taken from the leading `YYYY` of the date
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// "18+" for adult titles, "12+" otherwise
    pub fn age_rating(&self) -> &'static str {
        if self.adult {
            "18+"
        } else {
            "12+"
        }
    }
}

impl fmt::Display for MediaItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

/// Cast member from the `credits` append
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    pub character: Option<String>,
}

/// Full details for one title, including appended credits and similar titles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDetail {
    pub item: MediaItem,
    pub runtime: Option<u32>,
    pub number_of_seasons: Option<u32>,
    pub genres: Vec<String>,
    pub created_by: Vec<String>,
    pub cast: Vec<CastMember>,
    pub similar: Vec<MediaItem>,
}

impl MediaDetail {
    /// A show if TMDB says so or if it reports seasons
    pub fn is_tv(&self) -> bool {
        self.item.media_type == MediaType::Tv || self.number_of_seasons.is_some()
    }

    pub fn year(&self) -> Option<u16> {
        self.item.year()
    }

    pub fn age_rating(&self) -> &'static str {
        self.item.age_rating()
    }

    /// "3 Seasons" for shows, "2h 28m" for movies, empty when unknown
    pub fn duration_text(&self) -> String {
        if self.is_tv() {
            let seasons = self.number_of_seasons.unwrap_or(0);
            let plural = if seasons > 1 { "s" } else { "" };
            format!("{} Season{}", seasons, plural)
        } else {
            match self.runtime {
                Some(runtime) if runtime > 0 => format!("{}h {}m", runtime / 60, runtime % 60),
                _ => String::new(),
            }
        }
    }

    /// Names of the first `n` billed cast members
    pub fn top_cast(&self, n: usize) -> Vec<&str> {
        self.cast.iter().take(n).map(|c| c.name.as_str()).collect()
    }
}

impl fmt::Display for MediaDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.item)?;
        let duration = self.duration_text();
        if !duration.is_empty() {
            write!(f, " - {}", duration)?;
        }
        Ok(())
    }
}

/// Extract year from a date string like "2022-03-04"
pub(crate) fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// =============================================================================
// Catalog Models (static, embedded)
// =============================================================================

/// Anything the local search filter can match on
pub trait Titled {
    fn title(&self) -> &str;
}

impl Titled for MediaItem {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Entry in the embedded catalog (games and shows)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Genre or format label, e.g. "Racing" or "TV Show"
    pub kind: String,
}

impl Titled for CatalogEntry {
    fn title(&self) -> &str {
        &self.title
    }
}

/// Upcoming title for the New & Hot screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComingSoonEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub sub_text: String,
    pub description: String,
    pub rated: String,
    #[serde(default)]
    pub kind: Option<String>,
}

impl Titled for ComingSoonEntry {
    fn title(&self) -> &str {
        &self.title
    }
}

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// Static in-memory reference lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub games: Vec<CatalogEntry>,
    pub shows: Vec<CatalogEntry>,
    #[serde(default)]
    pub coming_soon: Vec<ComingSoonEntry>,
}

impl Catalog {
    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// The catalog bundled into the binary
    pub fn builtin() -> Self {
        match Self::from_json(BUILTIN_CATALOG) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::error!(error = %e, "Bundled catalog is invalid, starting empty");
                Self::default()
            }
        }
    }
}

// =============================================================================
// Profiles
// =============================================================================

/// Default names on the profile picker
pub const DEFAULT_PROFILES: &[&str] = &["Drashti", "Bhavesh", "Aditi", "Prit", "Kavya"];
