use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("metadata request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected metadata payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Read access to the remote catalog. Each call returns the decoded JSON body
/// exactly as the remote service sent it.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    async fn popular_movies(&self, page: u32) -> CatalogResult<Value>;

    async fn movie_details(&self, movie_id: i64) -> CatalogResult<Value>;

    async fn movie_credits(&self, movie_id: i64) -> CatalogResult<Value>;

    async fn search_movies(&self, query: &str, page: u32) -> CatalogResult<Value>;

    async fn movie_genres(&self) -> CatalogResult<Value>;

    async fn movie_videos(&self, movie_id: i64) -> CatalogResult<Value>;

    async fn popular_tv(&self, page: u32) -> CatalogResult<Value>;

    async fn tv_details(&self, tv_id: i64) -> CatalogResult<Value>;

    async fn tv_videos(&self, tv_id: i64) -> CatalogResult<Value>;
}

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("TMDB_API_KEY is not set; metadata requests will be rejected upstream");
        }

        Self { client, api_key, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    // No status check: error bodies reach the caller unchanged. The request URL
    // carries the key, so it is stripped from every error before it can be logged.
    async fn get(&self, path: &str, params: &[(&str, String)]) -> CatalogResult<Value> {
        tracing::debug!(path = %path, "metadata request");

        let body = self
            .client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .json::<Value>()
            .await
            .map_err(reqwest::Error::without_url)?;

        Ok(body)
    }
}

#[async_trait]
impl MetadataApi for TmdbClient {
    async fn popular_movies(&self, page: u32) -> CatalogResult<Value> {
        self.get("/movie/popular", &[("page", page.to_string())]).await
    }

    async fn movie_details(&self, movie_id: i64) -> CatalogResult<Value> {
        self.get(&format!("/movie/{movie_id}"), &[]).await
    }

    async fn movie_credits(&self, movie_id: i64) -> CatalogResult<Value> {
        self.get(&format!("/movie/{movie_id}/credits"), &[]).await
    }

    async fn search_movies(&self, query: &str, page: u32) -> CatalogResult<Value> {
        self.get("/search/movie", &[("query", query.to_string()), ("page", page.to_string())])
            .await
    }

    async fn movie_genres(&self) -> CatalogResult<Value> {
        self.get("/genre/movie/list", &[]).await
    }

    async fn movie_videos(&self, movie_id: i64) -> CatalogResult<Value> {
        self.get(&format!("/movie/{movie_id}/videos"), &[]).await
    }

    async fn popular_tv(&self, page: u32) -> CatalogResult<Value> {
        self.get("/tv/popular", &[("page", page.to_string())]).await
    }

    async fn tv_details(&self, tv_id: i64) -> CatalogResult<Value> {
        self.get(&format!("/tv/{tv_id}"), &[]).await
    }

    async fn tv_videos(&self, tv_id: i64) -> CatalogResult<Value> {
        self.get(&format!("/tv/{tv_id}/videos"), &[]).await
    }
}
