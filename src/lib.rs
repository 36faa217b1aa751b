pub mod accounts;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod formatter;
pub mod library;
pub mod models;
pub mod routes;
pub mod session;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use sea_orm::DatabaseConnection;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer, cookie::Key};
use tower_sessions_sqlx_store::SqliteStore;

use crate::{accounts::AccountStore, config::Config, library::Library, tmdb::MetadataApi};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub metadata: Arc<dyn MetadataApi>,
    pub accounts: AccountStore,
    pub library: Library,
    pub sessions: SqliteStore,
}

impl AppState {
    pub async fn new(
        config: Config,
        metadata: Arc<dyn MetadataApi>,
        db: DatabaseConnection,
    ) -> anyhow::Result<Self> {
        let sessions = session::store(&db).await?;

        Ok(Self {
            config: Arc::new(config),
            metadata,
            accounts: AccountStore::new(db.clone()),
            library: Library::new(db),
            sessions,
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let session_layer = SessionManagerLayer::new(state.sessions.clone())
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::days(state.config.session_ttl_days)))
        .with_signed(signing_key(&state.config.session_secret));

    Router::new()
        .route("/", get(routes::index))
        .route("/register", get(routes::register_form).post(routes::register))
        .route("/login", get(routes::login_form).post(routes::login))
        .route("/logout", get(routes::logout))
        .route("/movie/{id}", get(routes::movie_detail))
        .route("/tv/{id}", get(routes::tv_detail))
        .route("/search", get(routes::search))
        .route("/api/movies", get(routes::api_movies))
        .route("/api/genres", get(routes::api_genres))
        .with_state(state)
        .layer(middleware::from_fn(session::persist_flash))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

fn signing_key(secret: &str) -> Key {
    match Key::try_from(secret.as_bytes()) {
        Ok(key) => key,
        Err(_) => {
            tracing::warn!(
                "SECRET_KEY is shorter than 64 bytes; sessions are signed with a random key and will not survive a restart"
            );
            Key::generate()
        },
    }
}
