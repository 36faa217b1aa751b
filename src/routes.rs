use std::sync::Arc;

use axum::{
    Json,
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::{Value, json};
use tower_sessions::Session;
use tracing::{debug, warn};

use crate::{
    AppState,
    error::{AppError, AppResult},
    formatter,
    models::{
        Flash, LoginRequest, MediaKind, MediaSummary, MovieDetail, RegisterRequest, SearchQuery,
        StoredMovie, TvDetail,
    },
    session::{self, PageContext, redirect_with_flash},
    templates,
    tmdb::{CatalogResult, MetadataApi},
};

const HOME_ROW_LIMIT: usize = 10;

pub async fn index(State(state): State<Arc<AppState>>, session: Session) -> AppResult<Html<String>> {
    let (movies, tv_shows) = match popular_rows(&*state.metadata).await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(error = %err, "failed to load popular titles");
            (Vec::new(), Vec::new())
        },
    };

    let ctx = PageContext::load(&session).await?;
    Ok(Html(templates::index_page(&ctx, &movies, &tv_shows)))
}

async fn popular_rows(
    metadata: &dyn MetadataApi,
) -> CatalogResult<(Vec<MediaSummary>, Vec<MediaSummary>)> {
    let mut movies = formatter::summaries(&metadata.popular_movies(1).await?, MediaKind::Movie)?;
    let mut tv_shows = formatter::summaries(&metadata.popular_tv(1).await?, MediaKind::Tv)?;
    movies.truncate(HOME_ROW_LIMIT);
    tv_shows.truncate(HOME_ROW_LIMIT);
    Ok((movies, tv_shows))
}

pub async fn register_form(session: Session) -> AppResult<Response> {
    if session::current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let ctx = PageContext::load(&session).await?;
    Ok(Html(templates::register_page(&ctx, "", "")).into_response())
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(req): Form<RegisterRequest>,
) -> AppResult<Response> {
    if session::current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    match state.accounts.register(&req.username, &req.email, &req.password).await {
        Ok(_) => Ok(redirect_with_flash(
            "/login",
            Flash::success("Account created successfully! Please log in."),
        )),
        Err(err) if err.is_validation() => {
            debug!(username = %req.username, reason = %err, "registration rejected");
            let mut ctx = PageContext::load(&session).await?;
            ctx.flashes.push(Flash::error(err.to_string()));
            Ok(Html(templates::register_page(&ctx, req.username.trim(), req.email.trim()))
                .into_response())
        },
        Err(err) => Err(err.into()),
    }
}

pub async fn login_form(session: Session) -> AppResult<Response> {
    if session::current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    let ctx = PageContext::load(&session).await?;
    Ok(Html(templates::login_page(&ctx, "")).into_response())
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(req): Form<LoginRequest>,
) -> AppResult<Response> {
    if session::current_user(&session).await?.is_some() {
        return Ok(Redirect::to("/").into_response());
    }

    match state.accounts.authenticate(&req.username, &req.password).await {
        Ok(user) => {
            session::sign_in(&session, &user).await?;
            debug!(user_id = user.id, "signed in");
            Ok(redirect_with_flash("/", Flash::success("Login successful!")))
        },
        Err(err) if err.is_validation() => {
            let mut ctx = PageContext::load(&session).await?;
            ctx.flashes.push(Flash::error(err.to_string()));
            Ok(Html(templates::login_page(&ctx, req.username.trim())).into_response())
        },
        Err(err) => Err(err.into()),
    }
}

pub async fn logout(session: Session) -> AppResult<Response> {
    if session::current_user(&session).await?.is_none() {
        return Ok(redirect_with_flash("/login", Flash::info("Please log in to access this page.")));
    }

    session::sign_out(&session).await?;
    Ok(redirect_with_flash("/", Flash::info("You have been logged out.")))
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(movie_id): Path<i64>,
) -> AppResult<Html<String>> {
    let movie = load_movie(&*state.metadata, movie_id)
        .await
        .map_err(AppError::upstream("Error loading movie details."))?;

    state.library.record_movie(&movie).await?;

    let ctx = PageContext::load(&session).await?;
    Ok(Html(templates::movie_page(&ctx, &movie)))
}

async fn load_movie(metadata: &dyn MetadataApi, movie_id: i64) -> CatalogResult<MovieDetail> {
    let detail = metadata.movie_details(movie_id).await?;
    let videos = metadata.movie_videos(movie_id).await?;
    let credits = metadata.movie_credits(movie_id).await?;
    formatter::movie_detail(movie_id, &detail, &videos, &credits)
}

pub async fn tv_detail(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(tv_id): Path<i64>,
) -> AppResult<Html<String>> {
    let show = load_tv(&*state.metadata, tv_id)
        .await
        .map_err(AppError::upstream("Error loading TV show details."))?;

    let ctx = PageContext::load(&session).await?;
    Ok(Html(templates::tv_page(&ctx, &show)))
}

async fn load_tv(metadata: &dyn MetadataApi, tv_id: i64) -> CatalogResult<TvDetail> {
    let detail = metadata.tv_details(tv_id).await?;
    let videos = metadata.tv_videos(tv_id).await?;
    formatter::tv_detail(tv_id, &detail, &videos)
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    session: Session,
    Query(q): Query<SearchQuery>,
) -> AppResult<Html<String>> {
    let query = q.query().to_string();
    let page = q.page_number();

    let mut ctx = PageContext::load(&session).await?;

    if query.is_empty() {
        return Ok(Html(templates::search_page(&ctx, &query, page, &[])));
    }

    let movies = match search_movies(&*state.metadata, &query, page).await {
        Ok(movies) => movies,
        Err(err) => {
            warn!(query = %query, error = %err, "search failed");
            ctx.flashes.push(Flash::error("Error performing search"));
            Vec::new()
        },
    };

    Ok(Html(templates::search_page(&ctx, &query, page, &movies)))
}

async fn search_movies(
    metadata: &dyn MetadataApi,
    query: &str,
    page: u32,
) -> CatalogResult<Vec<MediaSummary>> {
    let payload = metadata.search_movies(query, page).await?;
    formatter::summaries(&payload, MediaKind::Movie)
}

pub async fn api_movies(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<StoredMovie>>> {
    Ok(Json(state.library.movies().await?))
}

pub async fn api_genres(State(state): State<Arc<AppState>>) -> Response {
    match state.metadata.movie_genres().await {
        Ok(genres) => Json(genres).into_response(),
        Err(err) => {
            warn!(error = %err, "failed to load genres");
            let body: Value = json!({ "error": "genre list unavailable" });
            (StatusCode::BAD_GATEWAY, Json(body)).into_response()
        },
    }
}
