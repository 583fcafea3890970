use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::db::users;
use crate::error::AppResult;
use crate::services::rotation;

use super::{AppState, OkIdResponse};

#[derive(Debug, Serialize)]
pub struct NextPicker {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RotationNextResponse {
    pub next: Option<NextPicker>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmRequest {
    pub picker_user_id: Option<i64>,
    pub watched_at: Option<String>,
    pub title: Option<String>,
}

/// Whose turn is it to pick
pub async fn rotation_next(
    State(state): State<AppState>,
) -> AppResult<Json<RotationNextResponse>> {
    let next = match rotation::next_picker_id(&state.pool).await? {
        Some(id) => users::get(&state.pool, id).await?.map(|u| NextPicker {
            id: u.id,
            name: u.name,
            avatar_url: u.avatar_url,
        }),
        None => None,
    };

    Ok(Json(RotationNextResponse { next }))
}

/// Records a placeholder pick for the supplied or computed next picker.
/// The body is optional; an empty POST confirms the computed turn.
pub async fn rotation_confirm(
    State(state): State<AppState>,
    payload: Option<Json<ConfirmRequest>>,
) -> AppResult<Json<OkIdResponse>> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    let event = rotation::confirm_pick(
        &state.pool,
        request.picker_user_id,
        request.watched_at.as_deref(),
        request.title.as_deref(),
    )
    .await?;

    Ok(Json(OkIdResponse::new(event.id)))
}
