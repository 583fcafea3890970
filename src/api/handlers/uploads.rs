use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::AppState;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some(".png"),
        "image/jpeg" => Some(".jpg"),
        "image/webp" => Some(".webp"),
        "image/gif" => Some(".gif"),
        _ => None,
    }
}

/// Accepts a multipart image upload and stores it under the upload
/// directory; the returned URL is served by the `/uploads` static route
pub async fn upload_avatar(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let extension = field
            .content_type()
            .and_then(extension_for)
            .ok_or_else(|| AppError::InvalidInput("unsupported file type".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("failed to read upload: {e}")))?;

        let token = Uuid::new_v4().simple().to_string();
        let file_name = format!(
            "{}_{}{}",
            Utc::now().format("%Y%m%d%H%M%S"),
            &token[..8],
            extension
        );

        let path = state.upload_dir.join(&file_name);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

        tracing::info!(file = %file_name, bytes = data.len(), "Avatar uploaded");

        return Ok(Json(UploadResponse {
            url: format!("/uploads/{file_name}"),
        }));
    }

    Err(AppError::InvalidInput("file field required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_for_known_types() {
        assert_eq!(extension_for("image/png"), Some(".png"));
        assert_eq!(extension_for("image/jpeg"), Some(".jpg"));
        assert_eq!(extension_for("image/webp"), Some(".webp"));
        assert_eq!(extension_for("image/gif"), Some(".gif"));
    }

    #[test]
    fn test_extension_for_rejects_other_types() {
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for("image/svg+xml"), None);
    }
}
