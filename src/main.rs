use std::{sync::Arc, time::Duration};

use reelview::{AppState, config::Config, db, tmdb::TmdbClient};
use tower_sessions::ExpiredDeletion;

const SESSION_SWEEP_SECS: u64 = 60;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelview=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("reelview/0.1")
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let db = db::connect_and_migrate(&config.database_url).await?;

    let tmdb = TmdbClient::new(http, config.tmdb_api_key.clone(), config.tmdb_base_url.clone());

    let addr = config.addr;
    let state = Arc::new(AppState::new(config, Arc::new(tmdb), db).await?);

    let deletion_task = tokio::task::spawn(
        state.sessions.clone().continuously_delete_expired(Duration::from_secs(SESSION_SWEEP_SECS)),
    );

    let app = reelview::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "listening");
    axum::serve(listener, app).await?;

    deletion_task.abort();
    Ok(())
}
