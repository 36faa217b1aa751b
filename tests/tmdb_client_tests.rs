use std::collections::HashMap;

use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use reelview::tmdb::{CatalogError, MetadataApi, TmdbClient};
use serde_json::{Value, json};

/// Serves `app` on a random local port and returns its base URL.
async fn spawn_catalog(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/3")
}

async fn echo(uri: Uri, Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({ "path": uri.path(), "params": params, "results": [] }))
}

fn echo_catalog() -> Router {
    Router::new()
        .route("/3/movie/popular", get(echo))
        .route("/3/movie/{id}", get(echo))
        .route("/3/movie/{id}/credits", get(echo))
        .route("/3/movie/{id}/videos", get(echo))
        .route("/3/search/movie", get(echo))
        .route("/3/genre/movie/list", get(echo))
        .route("/3/tv/popular", get(echo))
        .route("/3/tv/{id}", get(echo))
        .route("/3/tv/{id}/videos", get(echo))
}

fn client(base_url: String) -> TmdbClient {
    TmdbClient::new(reqwest::Client::new(), "test-key".to_string(), base_url)
}

#[tokio::test]
async fn test_requests_carry_key_and_params() {
    let tmdb = client(spawn_catalog(echo_catalog()).await);

    let body = tmdb.popular_movies(3).await.unwrap();
    assert_eq!(body["path"], "/3/movie/popular");
    assert_eq!(body["params"]["api_key"], "test-key");
    assert_eq!(body["params"]["page"], "3");

    let body = tmdb.search_movies("the matrix & more", 1).await.unwrap();
    assert_eq!(body["path"], "/3/search/movie");
    assert_eq!(body["params"]["query"], "the matrix & more");
    assert_eq!(body["params"]["page"], "1");
}

#[tokio::test]
async fn test_each_resource_hits_its_path() {
    let base = spawn_catalog(echo_catalog()).await;
    let tmdb = client(format!("{base}/"));

    let cases = [
        (tmdb.movie_details(550).await, "/3/movie/550"),
        (tmdb.movie_credits(550).await, "/3/movie/550/credits"),
        (tmdb.movie_videos(550).await, "/3/movie/550/videos"),
        (tmdb.movie_genres().await, "/3/genre/movie/list"),
        (tmdb.popular_tv(1).await, "/3/tv/popular"),
        (tmdb.tv_details(1399).await, "/3/tv/1399"),
        (tmdb.tv_videos(1399).await, "/3/tv/1399/videos"),
    ];

    for (result, path) in cases {
        let body = result.unwrap();
        assert_eq!(body["path"], path);
        assert_eq!(body["params"]["api_key"], "test-key");
    }
}

#[tokio::test]
async fn test_error_body_is_passed_through() {
    async fn missing(Path(id): Path<i64>) -> impl IntoResponse {
        let body = json!({
            "success": false,
            "status_code": 34,
            "status_message": format!("movie {id} not found"),
        });
        (StatusCode::NOT_FOUND, Json(body))
    }

    let tmdb = client(spawn_catalog(Router::new().route("/3/movie/{id}", get(missing))).await);

    let body = tmdb.movie_details(42).await.unwrap();
    assert_eq!(body["status_code"], 34);
    assert_eq!(body["status_message"], "movie 42 not found");
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    async fn proxy_error() -> (StatusCode, &'static str) {
        (StatusCode::BAD_GATEWAY, "<html>upstream proxy error</html>")
    }

    let tmdb = client(spawn_catalog(Router::new().route("/3/tv/{id}", get(proxy_error))).await);

    let err = tmdb.tv_details(1399).await.unwrap_err();
    assert!(matches!(err, CatalogError::Request(_)));
}

#[tokio::test]
async fn test_errors_do_not_leak_the_api_key() {
    async fn proxy_error() -> (StatusCode, &'static str) {
        (StatusCode::BAD_GATEWAY, "<html>upstream proxy error</html>")
    }

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let secret = "SUPERSECRETKEY".to_string();
    let unreachable =
        TmdbClient::new(reqwest::Client::new(), secret.clone(), format!("http://{addr}/3"));
    let err = unreachable.popular_movies(1).await.unwrap_err();
    assert!(!err.to_string().contains(&secret), "{err}");
    assert!(!format!("{err:?}").contains(&secret));

    let base = spawn_catalog(Router::new().route("/3/tv/{id}", get(proxy_error))).await;
    let garbled = TmdbClient::new(reqwest::Client::new(), secret.clone(), base);
    let err = garbled.tv_details(1399).await.unwrap_err();
    assert!(!err.to_string().contains(&secret), "{err}");
    assert!(!format!("{err:?}").contains(&secret));
}

#[tokio::test]
async fn test_unreachable_catalog_is_an_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let tmdb = client(format!("http://{addr}/3"));
    let err = tmdb.popular_movies(1).await.unwrap_err();
    assert!(matches!(err, CatalogError::Request(_)));
}
