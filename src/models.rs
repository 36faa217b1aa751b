use serde::{Deserialize, Serialize};

use crate::entities::movies;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MediaSummary {
    pub id: i64,
    pub kind: MediaKind,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub rating: f64,
}

impl MediaSummary {
    pub fn href(&self) -> String {
        format!("/{}/{}", self.kind.path_segment(), self.id)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CastMember {
    pub name: String,
    pub character: String,
    pub profile_path: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Trailer {
    pub key: String,
    pub name: String,
    pub site: String,
}

impl Trailer {
    /// Embeddable player URL, when the hosting site is one we know how to embed.
    pub fn embed_url(&self) -> Option<String> {
        match self.site.as_str() {
            "YouTube" => Some(format!("https://www.youtube.com/embed/{}", self.key)),
            "Vimeo" => Some(format!("https://player.vimeo.com/video/{}", self.key)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct MovieDetail {
    pub id: i64,
    pub title: String,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub release_date: Option<String>,
    pub rating: f64,
    pub runtime: Option<u32>,
    pub genres: Vec<String>,
    pub cast: Vec<CastMember>,
    pub trailer: Option<Trailer>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TvDetail {
    pub id: i64,
    pub name: String,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: String,
    pub first_air_date: Option<String>,
    pub rating: f64,
    pub seasons: Option<u32>,
    pub episodes: Option<u32>,
    pub genres: Vec<String>,
    pub trailer: Option<Trailer>,
}

#[derive(Clone, Debug, Serialize)]
pub struct StoredMovie {
    pub id: i64,
    pub title: String,
    pub poster_path: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub rating: f64,
    pub viewed_at: i64,
}

impl From<movies::Model> for StoredMovie {
    fn from(model: movies::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            poster_path: model.poster_path,
            overview: model.overview,
            release_date: model.release_date,
            rating: model.rating,
            viewed_at: model.viewed_at,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum FlashCategory {
    Success,
    Info,
    Error,
}

/// One-shot notice shown on the next rendered page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub category: FlashCategory,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self { category: FlashCategory::Success, message: message.into() }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self { category: FlashCategory::Info, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { category: FlashCategory::Error, message: message.into() }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// TMDB serves at most this many result pages for a search.
pub const MAX_SEARCH_PAGE: u32 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
}

impl SearchQuery {
    pub fn query(&self) -> &str {
        self.q.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Requested page, clamped to `1..=MAX_SEARCH_PAGE`. Anything unparsable is page 1.
    pub fn page_number(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .clamp(1, MAX_SEARCH_PAGE)
    }
}
