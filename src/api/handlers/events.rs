use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{users, watch_events};
use crate::error::{AppError, AppResult};
use crate::services::rotation::parse_watched_at;

use super::{double_option, AppState, OkIdResponse, OkResponse};

#[derive(Debug, Deserialize)]
pub struct SelectMovieRequest {
    pub picker_user_id: Option<i64>,
    pub movie_id: Option<String>,
    pub title: Option<String>,
    pub watched_at: Option<String>,
    pub search_url: Option<String>,
    pub poster_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WatchlogQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

#[derive(Debug, Serialize)]
pub struct WatchlogEntry {
    pub id: i64,
    pub title: String,
    pub movie_id: String,
    pub watched_at: NaiveDateTime,
    pub picker_name: String,
    pub search_url: Option<String>,
    pub poster_url: Option<String>,
    pub is_placeholder: bool,
}

#[derive(Debug, Serialize)]
pub struct WatchlogResponse {
    pub items: Vec<WatchlogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateWatchEventRequest {
    pub picker_user_id: Option<i64>,
    pub watched_at: Option<String>,
    pub title: Option<String>,
    pub movie_id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub search_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub poster_url: Option<Option<String>>,
}

/// Records a concrete movie choice as a watch event
pub async fn select_movie(
    State(state): State<AppState>,
    Json(request): Json<SelectMovieRequest>,
) -> AppResult<Json<OkIdResponse>> {
    let picker_user_id = request
        .picker_user_id
        .ok_or_else(|| AppError::InvalidInput("picker_user_id required".to_string()))?;

    let movie_id = match request.movie_id.as_deref() {
        Some(id) if !id.is_empty() => id,
        _ => return Err(AppError::InvalidInput("movie_id required".to_string())),
    };

    if users::get(&state.pool, picker_user_id).await?.is_none() {
        return Err(AppError::InvalidInput(
            "picker_user_id invalid".to_string(),
        ));
    }

    let watched_at = match request.watched_at.as_deref() {
        Some(raw) => parse_watched_at(raw)?,
        None => Utc::now().naive_utc(),
    };

    let title = request.title.as_deref().unwrap_or("Unknown title");

    let event = watch_events::insert(
        &state.pool,
        picker_user_id,
        movie_id,
        title,
        request.search_url.as_deref(),
        request.poster_url.as_deref(),
        watched_at,
    )
    .await?;

    Ok(Json(OkIdResponse::new(event.id)))
}

/// Newest-first watch history with picker names resolved; deleted pickers
/// show up as "unknown"
pub async fn watchlog(
    State(state): State<AppState>,
    Query(params): Query<WatchlogQuery>,
) -> AppResult<Json<WatchlogResponse>> {
    let limit = params.limit.clamp(1, 500);
    let events = watch_events::list_recent(&state.pool, limit).await?;

    let mut items = Vec::with_capacity(events.len());
    for event in events {
        let picker_name = match users::get(&state.pool, event.picker_user_id).await? {
            Some(user) => user.name,
            None => "unknown".to_string(),
        };

        items.push(WatchlogEntry {
            id: event.id,
            title: event.title.clone(),
            movie_id: event.movie_id.clone(),
            watched_at: event.watched_at,
            picker_name,
            search_url: event.search_url.clone(),
            poster_url: event.poster_url.clone(),
            is_placeholder: event.is_placeholder(),
        });
    }

    Ok(Json(WatchlogResponse { items }))
}

/// Edits a recorded event; a supplied picker id must reference an existing
/// user, URLs accept explicit nulls to clear them
pub async fn update_watch_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateWatchEventRequest>,
) -> AppResult<Json<OkResponse>> {
    let mut event = watch_events::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("watch event not found".to_string()))?;

    if let Some(picker_user_id) = request.picker_user_id {
        if users::get(&state.pool, picker_user_id).await?.is_none() {
            return Err(AppError::InvalidInput(
                "picker_user_id invalid".to_string(),
            ));
        }
        event.picker_user_id = picker_user_id;
    }
    if let Some(raw) = request.watched_at.as_deref() {
        event.watched_at = parse_watched_at(raw)?;
    }
    if let Some(title) = request.title {
        if !title.is_empty() {
            event.title = title;
        }
    }
    if let Some(movie_id) = request.movie_id {
        if !movie_id.is_empty() {
            event.movie_id = movie_id;
        }
    }
    if let Some(search_url) = request.search_url {
        event.search_url = search_url;
    }
    if let Some(poster_url) = request.poster_url {
        event.poster_url = poster_url;
    }

    watch_events::update(&state.pool, &event).await?;
    Ok(Json(OkResponse::new()))
}

pub async fn delete_watch_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    if !watch_events::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("watch event not found".to_string()));
    }

    Ok(Json(OkResponse::new()))
}
