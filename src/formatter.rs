//! Reshapes raw catalog payloads into the records the templates render.
//!
//! Only the keys a page cannot do without are required; everything else falls
//! back to an empty value. A missing required key is a [`CatalogError::Payload`].

use serde::Deserialize;
use serde_json::Value;

use crate::{
    models::{CastMember, MediaKind, MediaSummary, MovieDetail, Trailer, TvDetail},
    tmdb::CatalogResult,
};

pub const CAST_LIMIT: usize = 10;

const TRAILER_TYPE: &str = "Trailer";

pub fn summaries(payload: &Value, kind: MediaKind) -> CatalogResult<Vec<MediaSummary>> {
    let page = ResultsPage::<RawSummary>::deserialize(payload)?;

    Ok(page
        .results
        .into_iter()
        .map(|raw| {
            let (title, release_date) = match kind {
                MediaKind::Movie => (raw.title, raw.release_date),
                MediaKind::Tv => (raw.name, raw.first_air_date),
            };
            MediaSummary {
                id: raw.id,
                kind,
                title: title.unwrap_or_default(),
                poster_path: raw.poster_path,
                overview: raw.overview.unwrap_or_default(),
                release_date: non_empty(release_date),
                rating: raw.vote_average.unwrap_or_default(),
            }
        })
        .collect())
}

pub fn movie_detail(
    id: i64,
    detail: &Value,
    videos: &Value,
    credits: &Value,
) -> CatalogResult<MovieDetail> {
    let raw = RawMovieDetail::deserialize(detail)?;

    Ok(MovieDetail {
        id,
        title: raw.title.unwrap_or_default(),
        tagline: non_empty(raw.tagline),
        poster_path: raw.poster_path,
        backdrop_path: raw.backdrop_path,
        overview: raw.overview.unwrap_or_default(),
        release_date: non_empty(raw.release_date),
        rating: raw.vote_average.unwrap_or_default(),
        runtime: raw.runtime.filter(|minutes| *minutes > 0),
        genres: raw.genres.into_iter().map(|g| g.name).collect(),
        cast: project_cast(credits)?,
        trailer: select_trailer(videos)?,
    })
}

pub fn tv_detail(id: i64, detail: &Value, videos: &Value) -> CatalogResult<TvDetail> {
    let raw = RawTvDetail::deserialize(detail)?;

    Ok(TvDetail {
        id,
        name: raw.name.unwrap_or_default(),
        tagline: non_empty(raw.tagline),
        poster_path: raw.poster_path,
        backdrop_path: raw.backdrop_path,
        overview: raw.overview.unwrap_or_default(),
        first_air_date: non_empty(raw.first_air_date),
        rating: raw.vote_average.unwrap_or_default(),
        seasons: raw.number_of_seasons,
        episodes: raw.number_of_episodes,
        genres: raw.genres.into_iter().map(|g| g.name).collect(),
        trailer: select_trailer(videos)?,
    })
}

/// First video tagged as a trailer, in the order the catalog listed them.
///
/// Entries are decoded one at a time, so a malformed video after the match is
/// never looked at.
pub fn select_trailer(videos: &Value) -> CatalogResult<Option<Trailer>> {
    let page = ResultsPage::<Value>::deserialize(videos)?;

    for entry in &page.results {
        let video = RawVideo::deserialize(entry)?;
        if video.kind == TRAILER_TYPE {
            return Ok(Some(Trailer {
                key: video.key,
                name: video.name.unwrap_or_default(),
                site: video.site.unwrap_or_default(),
            }));
        }
    }

    Ok(None)
}

pub fn project_cast(credits: &Value) -> CatalogResult<Vec<CastMember>> {
    let raw = RawCredits::deserialize(credits)?;

    Ok(raw
        .cast
        .into_iter()
        .take(CAST_LIMIT)
        .map(|c| CastMember {
            name: c.name.unwrap_or_default(),
            character: c.character.unwrap_or_default(),
            profile_path: c.profile_path,
        })
        .collect())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    })
}

#[derive(Debug, Deserialize)]
struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct RawSummary {
    id: i64,
    title: Option<String>,
    name: Option<String>,
    poster_path: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawGenre {
    name: String,
}

#[derive(Debug, Deserialize)]
struct RawMovieDetail {
    title: Option<String>,
    tagline: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    release_date: Option<String>,
    vote_average: Option<f64>,
    runtime: Option<u32>,
    genres: Vec<RawGenre>,
}

#[derive(Debug, Deserialize)]
struct RawTvDetail {
    name: Option<String>,
    tagline: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    first_air_date: Option<String>,
    vote_average: Option<f64>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    genres: Vec<RawGenre>,
}

#[derive(Debug, Deserialize)]
struct RawCredits {
    cast: Vec<RawCastMember>,
}

#[derive(Debug, Deserialize)]
struct RawCastMember {
    name: Option<String>,
    character: Option<String>,
    profile_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawVideo {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    key: String,
    name: Option<String>,
    site: Option<String>,
}
