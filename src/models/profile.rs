use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A person record in the profile service
///
/// Avatars are stored inline as base64 strings rather than file references.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Profile {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    /// base64-encoded image, if any
    pub avatar: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
