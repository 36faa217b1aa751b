use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::{accounts::AccountError, models::Flash, session, tmdb::CatalogError};

const GENERIC_MESSAGE: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    /// The catalog could not be reached or sent something unusable.
    #[error("{flash}")]
    Upstream {
        flash: &'static str,
        #[source]
        source: CatalogError,
    },

    #[error(transparent)]
    Account(#[from] AccountError),

    #[error("storage error: {0}")]
    Storage(#[from] sea_orm::DbErr),

    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn upstream(flash: &'static str) -> impl FnOnce(CatalogError) -> Self {
        move |source| Self::Upstream { flash, source }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Upstream { flash, source } => {
                tracing::warn!(error = %source, "{flash}");
                session::redirect_with_flash("/", Flash::error(flash))
            },
            other => {
                tracing::error!(error = %other, "request failed");
                let body = crate::templates::error_page(GENERIC_MESSAGE);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;

    #[tokio::test]
    async fn internal_faults_render_a_generic_page() {
        let err = AppError::Storage(sea_orm::DbErr::Custom("no such table: users".to_string()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains(GENERIC_MESSAGE));
        assert!(!body.contains("no such table"));
    }
}
