use chrono::NaiveDateTime;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::WatchEvent;

const COLUMNS: &str = "id, picker_user_id, movie_id, title, search_url, poster_url, watched_at";

/// The most recent event by watched_at, if any
pub async fn latest(pool: &SqlitePool) -> AppResult<Option<WatchEvent>> {
    let event = sqlx::query_as::<_, WatchEvent>(&format!(
        "SELECT {COLUMNS} FROM watch_events ORDER BY watched_at DESC, id DESC LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(event)
}

/// Newest-first history, bounded by limit
pub async fn list_recent(pool: &SqlitePool, limit: i64) -> AppResult<Vec<WatchEvent>> {
    let events = sqlx::query_as::<_, WatchEvent>(&format!(
        "SELECT {COLUMNS} FROM watch_events ORDER BY watched_at DESC, id DESC LIMIT ?"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(events)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Option<WatchEvent>> {
    let event =
        sqlx::query_as::<_, WatchEvent>(&format!("SELECT {COLUMNS} FROM watch_events WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(event)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert(
    pool: &SqlitePool,
    picker_user_id: i64,
    movie_id: &str,
    title: &str,
    search_url: Option<&str>,
    poster_url: Option<&str>,
    watched_at: NaiveDateTime,
) -> AppResult<WatchEvent> {
    let event = sqlx::query_as::<_, WatchEvent>(&format!(
        "INSERT INTO watch_events (picker_user_id, movie_id, title, search_url, poster_url, watched_at)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING {COLUMNS}"
    ))
    .bind(picker_user_id)
    .bind(movie_id)
    .bind(title)
    .bind(search_url)
    .bind(poster_url)
    .bind(watched_at)
    .fetch_one(pool)
    .await?;

    Ok(event)
}

/// Persists the mutable columns of an already-loaded event
pub async fn update(pool: &SqlitePool, event: &WatchEvent) -> AppResult<()> {
    sqlx::query(
        "UPDATE watch_events
         SET picker_user_id = ?, movie_id = ?, title = ?, search_url = ?, poster_url = ?, watched_at = ?
         WHERE id = ?",
    )
    .bind(event.picker_user_id)
    .bind(&event.movie_id)
    .bind(&event.title)
    .bind(&event.search_url)
    .bind(&event.poster_url)
    .bind(event.watched_at)
    .bind(event.id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Returns false when no row matched
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM watch_events WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
