use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::db::profiles;
use crate::error::{AppError, AppResult};
use crate::models::Profile;

use super::{AppState, OkResponse};

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub first_name: String,
    pub last_name: String,
    /// base64-encoded image
    pub avatar: Option<String>,
}

pub async fn list_profiles(State(state): State<AppState>) -> AppResult<Json<Vec<Profile>>> {
    let items = profiles::list(&state.pool).await?;
    Ok(Json(items))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Profile>> {
    let profile = profiles::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("profile not found".to_string()))?;

    Ok(Json(profile))
}

pub async fn create_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileRequest>,
) -> AppResult<(StatusCode, Json<Profile>)> {
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "first_name and last_name required".to_string(),
        ));
    }

    let profile = profiles::insert(
        &state.pool,
        request.first_name.trim(),
        request.last_name.trim(),
        request.avatar.as_deref(),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

/// Full replacement of the mutable fields; refreshes `updated_at`
pub async fn update_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ProfileRequest>,
) -> AppResult<Json<Profile>> {
    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "first_name and last_name required".to_string(),
        ));
    }

    let profile = profiles::update(
        &state.pool,
        id,
        request.first_name.trim(),
        request.last_name.trim(),
        request.avatar.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound("profile not found".to_string()))?;

    Ok(Json(profile))
}

pub async fn delete_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    if !profiles::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("profile not found".to_string()));
    }

    Ok(Json(OkResponse::new()))
}
