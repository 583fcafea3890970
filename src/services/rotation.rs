use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::SqlitePool;

use crate::db::{users, watch_events};
use crate::error::{AppError, AppResult};
use crate::models::{User, WatchEvent, PLACEHOLDER_MOVIE_ID};

/// Title recorded when a pick is confirmed without naming a movie
pub const PLACEHOLDER_TITLE: &str = "Placeholder - pick to follow";

/// Computes whose turn it is to pick next.
///
/// `users` must be ordered by (position asc, id asc). With no events the
/// first user is up. Otherwise the most recent event (by `watched_at`)
/// identifies the last picker and rotation advances one step, wrapping
/// around. A last picker that is no longer among the users (deleted after
/// the event) restarts the rotation at the first user; that is deliberate
/// fallback policy, not an error.
pub fn next_picker(users: &[User], events: &[WatchEvent]) -> Option<i64> {
    if users.is_empty() {
        return None;
    }

    let last = match events.iter().max_by_key(|e| e.watched_at) {
        Some(event) => event,
        None => return Some(users[0].id),
    };

    let next_index = users
        .iter()
        .position(|u| u.id == last.picker_user_id)
        .map(|i| (i + 1) % users.len())
        .unwrap_or(0);

    Some(users[next_index].id)
}

/// Resolves the next picker against the store
pub async fn next_picker_id(pool: &SqlitePool) -> AppResult<Option<i64>> {
    let ordered = users::list_ordered(pool).await?;
    let last = watch_events::latest(pool).await?;
    let events: Vec<WatchEvent> = last.into_iter().collect();

    Ok(next_picker(&ordered, &events))
}

/// Confirms a rotation pick by recording a placeholder event.
///
/// Uses the supplied picker id when given, otherwise the computed next
/// picker. Only inserts a WatchEvent; user rows are never touched.
pub async fn confirm_pick(
    pool: &SqlitePool,
    picker_user_id: Option<i64>,
    watched_at: Option<&str>,
    title: Option<&str>,
) -> AppResult<WatchEvent> {
    let picker_id = match picker_user_id {
        Some(id) => id,
        None => next_picker_id(pool)
            .await?
            .ok_or_else(|| AppError::InvalidInput("no users in rotation".to_string()))?,
    };

    let watched_at = match watched_at {
        Some(raw) => parse_watched_at(raw)?,
        None => Utc::now().naive_utc(),
    };

    let title = match title {
        Some(t) if !t.trim().is_empty() => t,
        _ => PLACEHOLDER_TITLE,
    };

    let event = watch_events::insert(
        pool,
        picker_id,
        PLACEHOLDER_MOVIE_ID,
        title,
        None,
        None,
        watched_at,
    )
    .await?;

    tracing::info!(event_id = event.id, picker_id, "Rotation pick confirmed");
    Ok(event)
}

/// Parses a client-supplied timestamp.
///
/// A bare date (`YYYY-MM-DD`) expands to midnight; otherwise an ISO-8601
/// datetime without offset is expected.
pub fn parse_watched_at(raw: &str) -> AppResult<NaiveDateTime> {
    let parsed = if raw.len() == 10 {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| d.and_time(NaiveTime::MIN))
            .ok()
    } else {
        raw.parse::<NaiveDateTime>().ok()
    };

    parsed.ok_or_else(|| AppError::InvalidInput(format!("invalid watched_at: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn user(id: i64, position: i64) -> User {
        User {
            id,
            name: format!("user-{id}"),
            email: None,
            avatar_url: None,
            position,
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn event(id: i64, picker_user_id: i64, day: u32) -> WatchEvent {
        WatchEvent {
            id,
            picker_user_id,
            movie_id: "tmdb:movie:456".to_string(),
            title: "The Matrix".to_string(),
            search_url: None,
            poster_url: None,
            watched_at: NaiveDate::from_ymd_opt(2024, 2, day)
                .unwrap()
                .and_hms_opt(20, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_no_users_yields_no_picker() {
        assert_eq!(next_picker(&[], &[]), None);
        assert_eq!(next_picker(&[], &[event(1, 1, 1)]), None);
    }

    #[test]
    fn test_no_events_yields_first_user_in_order() {
        let users = vec![user(1, 0), user(2, 1), user(3, 2)];
        assert_eq!(next_picker(&users, &[]), Some(1));
    }

    #[test]
    fn test_rotation_advances_past_last_picker() {
        // A(pos0), B(pos1), C(pos2); last picker B -> next is C
        let users = vec![user(1, 0), user(2, 1), user(3, 2)];
        assert_eq!(next_picker(&users, &[event(10, 2, 1)]), Some(3));
    }

    #[test]
    fn test_rotation_wraps_around() {
        let users = vec![user(1, 0), user(2, 1), user(3, 2)];
        assert_eq!(next_picker(&users, &[event(10, 3, 1)]), Some(1));
    }

    #[test]
    fn test_deleted_picker_falls_back_to_first_user() {
        // Last event references a user no longer in rotation
        let users = vec![user(1, 0), user(2, 1)];
        assert_eq!(next_picker(&users, &[event(10, 99, 1)]), Some(1));
    }

    #[test]
    fn test_most_recent_event_wins() {
        let users = vec![user(1, 0), user(2, 1), user(3, 2)];
        // Older event picked by C, newer by A -> next is B
        let events = vec![event(10, 3, 1), event(11, 1, 5)];
        assert_eq!(next_picker(&users, &events), Some(2));
    }

    #[test]
    fn test_order_follows_position_not_id() {
        // Highest id sits at position 0
        let users = vec![user(9, 0), user(1, 1), user(2, 2)];
        assert_eq!(next_picker(&users, &[]), Some(9));
        assert_eq!(next_picker(&users, &[event(10, 9, 1)]), Some(1));
    }

    #[test]
    fn test_single_user_rotation() {
        let users = vec![user(1, 0)];
        assert_eq!(next_picker(&users, &[event(10, 1, 1)]), Some(1));
    }

    #[test]
    fn test_parse_watched_at_date_only_expands_to_midnight() {
        let parsed = parse_watched_at("2024-03-15").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_watched_at_full_datetime() {
        let parsed = parse_watched_at("2024-03-15T20:30:00").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 15)
                .unwrap()
                .and_hms_opt(20, 30, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_watched_at_rejects_garbage() {
        assert!(parse_watched_at("not-a-date").is_err());
        assert!(parse_watched_at("2024-13-99").is_err());
    }
}
