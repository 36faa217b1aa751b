//! Signed-in user and flash messages, both kept in the session.
//!
//! Handlers that redirect attach a [`Flash`] to the response instead of
//! touching the session; [`persist_flash`] moves it into the session so the
//! next page that renders can show it.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tower_sessions::{Session, session};
use tower_sessions_sqlx_store::{SqliteStore, sqlx};

use crate::{accounts::User, models::Flash};

const USER_KEY: &str = "user";
const FLASH_KEY: &str = "flashes";

/// Session records live in the application database so sign-ins survive a
/// restart. Creates the session table on first use.
pub async fn store(db: &DatabaseConnection) -> Result<SqliteStore, sqlx::Error> {
    let store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
    store.migrate().await?;
    Ok(store)
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub username: String,
}

/// What every page needs from the session before rendering.
#[derive(Debug, Default)]
pub struct PageContext {
    pub user: Option<SessionUser>,
    pub flashes: Vec<Flash>,
}

impl PageContext {
    /// Reads the signed-in user and drains pending flashes.
    pub async fn load(session: &Session) -> Result<Self, session::Error> {
        Ok(Self { user: current_user(session).await?, flashes: take_flashes(session).await? })
    }
}

pub async fn current_user(session: &Session) -> Result<Option<SessionUser>, session::Error> {
    session.get::<SessionUser>(USER_KEY).await
}

pub async fn sign_in(session: &Session, user: &User) -> Result<(), session::Error> {
    session.cycle_id().await?;
    session
        .insert(USER_KEY, SessionUser { id: user.id, username: user.username.clone() })
        .await
}

pub async fn sign_out(session: &Session) -> Result<(), session::Error> {
    session.remove::<SessionUser>(USER_KEY).await?;
    session.cycle_id().await
}

pub async fn push_flash(session: &Session, flash: Flash) -> Result<(), session::Error> {
    let mut flashes = session.get::<Vec<Flash>>(FLASH_KEY).await?.unwrap_or_default();
    flashes.push(flash);
    session.insert(FLASH_KEY, flashes).await
}

pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, session::Error> {
    Ok(session.remove::<Vec<Flash>>(FLASH_KEY).await?.unwrap_or_default())
}

pub fn redirect_with_flash(to: &str, flash: Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    response.extensions_mut().insert(flash);
    response
}

pub async fn persist_flash(session: Session, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    if let Some(flash) = response.extensions_mut().remove::<Flash>() {
        if let Err(err) = push_flash(&session, flash).await {
            tracing::warn!(error = %err, "failed to store flash message");
        }
    }

    response
}
