use serde::{Deserialize, Deserializer, Serialize};

mod events;
mod profiles;
mod rotation;
mod search;
mod uploads;
mod users;

pub use events::{delete_watch_event, select_movie, update_watch_event, watchlog};
pub use profiles::{create_profile, delete_profile, get_profile, list_profiles, update_profile};
pub use rotation::{rotation_confirm, rotation_next};
pub use search::search_movies;
pub use uploads::upload_avatar;
pub use users::{create_user, delete_user, list_users, reorder_users, update_user};

use axum::{extract::State, Json};

use crate::error::AppResult;

use super::AppState;

/// Generic `{ "ok": true }` acknowledgment
#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn new() -> Self {
        Self { ok: true }
    }
}

impl Default for OkResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Acknowledgment carrying the id of a created row
#[derive(Debug, Serialize)]
pub struct OkIdResponse {
    pub ok: bool,
    pub id: i64,
}

impl OkIdResponse {
    pub fn new(id: i64) -> Self {
        Self { ok: true, id }
    }
}

/// Distinguishes an absent JSON field (outer None) from an explicit null
/// (Some(None)) in PATCH bodies
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Health check endpoint; touches the store
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<OkResponse>> {
    sqlx::query("SELECT 1").execute(&state.pool).await?;
    Ok(Json(OkResponse::new()))
}
