use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel movie id for rotation picks confirmed before a concrete choice
pub const PLACEHOLDER_MOVIE_ID: &str = "placeholder";

/// A recorded movie night
///
/// `picker_user_id` may reference a user that has since been deleted; history
/// is kept as-is and the rotation engine handles the dangling reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct WatchEvent {
    pub id: i64,
    pub picker_user_id: i64,
    pub movie_id: String,
    pub title: String,
    pub search_url: Option<String>,
    pub poster_url: Option<String>,
    pub watched_at: NaiveDateTime,
}

impl WatchEvent {
    /// Whether this event was recorded to advance rotation before a movie
    /// was actually chosen
    pub fn is_placeholder(&self) -> bool {
        self.movie_id == PLACEHOLDER_MOVIE_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(movie_id: &str) -> WatchEvent {
        WatchEvent {
            id: 1,
            picker_user_id: 1,
            movie_id: movie_id.to_string(),
            title: "Test".to_string(),
            search_url: None,
            poster_url: None,
            watched_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(event(PLACEHOLDER_MOVIE_ID).is_placeholder());
        assert!(!event("tmdb:movie:456").is_placeholder());
    }
}
