use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::users;
use crate::error::{AppError, AppResult};
use crate::models::User;

use super::{double_option, AppState, OkResponse};

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub items: Vec<User>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub order: Vec<i64>,
}

/// All rotation users in pick order
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<UsersResponse>> {
    let items = users::list_ordered(&state.pool).await?;
    Ok(Json(UsersResponse { items }))
}

/// Adds a user to the end of the rotation
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    let name = request.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(AppError::InvalidInput("name required".to_string()));
    }

    let position = match users::max_position(&state.pool).await? {
        Some(max) => max + 1,
        None => 0,
    };

    let user = users::insert(
        &state.pool,
        &name,
        request.email.as_deref(),
        request.avatar_url.as_deref(),
        position,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Partial update; a blank name is ignored, email and avatar_url accept
/// explicit nulls to clear them
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> AppResult<Json<User>> {
    let mut user = users::get(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    if let Some(name) = request.name {
        let trimmed = name.trim();
        if !trimmed.is_empty() {
            user.name = trimmed.to_string();
        }
    }
    if let Some(email) = request.email {
        user.email = email;
    }
    if let Some(avatar_url) = request.avatar_url {
        user.avatar_url = avatar_url;
    }

    users::update(&state.pool, &user).await?;
    Ok(Json(user))
}

/// Removes a user from the rotation permanently; past watch events keep
/// referencing the deleted id
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OkResponse>> {
    if !users::delete(&state.pool, id).await? {
        return Err(AppError::NotFound("user not found".to_string()));
    }

    Ok(Json(OkResponse::new()))
}

/// Reassigns positions wholesale: each listed id gets its index as the new
/// position. Unknown ids are ignored; repeating the same order is a no-op.
pub async fn reorder_users(
    State(state): State<AppState>,
    Json(request): Json<ReorderRequest>,
) -> AppResult<Json<OkResponse>> {
    for (position, user_id) in request.order.iter().enumerate() {
        users::set_position(&state.pool, *user_id, position as i64).await?;
    }

    Ok(Json(OkResponse::new()))
}
