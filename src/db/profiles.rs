use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::Profile;

const COLUMNS: &str = "id, first_name, last_name, avatar, created_at, updated_at";

pub async fn list(pool: &SqlitePool) -> AppResult<Vec<Profile>> {
    let profiles =
        sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM profiles ORDER BY id ASC"))
            .fetch_all(pool)
            .await?;

    Ok(profiles)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Option<Profile>> {
    let profile =
        sqlx::query_as::<_, Profile>(&format!("SELECT {COLUMNS} FROM profiles WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;

    Ok(profile)
}

pub async fn insert(
    pool: &SqlitePool,
    first_name: &str,
    last_name: &str,
    avatar: Option<&str>,
) -> AppResult<Profile> {
    let now = Utc::now().naive_utc();

    let profile = sqlx::query_as::<_, Profile>(&format!(
        "INSERT INTO profiles (first_name, last_name, avatar, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING {COLUMNS}"
    ))
    .bind(first_name)
    .bind(last_name)
    .bind(avatar)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Full update; refreshes updated_at
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    first_name: &str,
    last_name: &str,
    avatar: Option<&str>,
) -> AppResult<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(&format!(
        "UPDATE profiles
         SET first_name = ?, last_name = ?, avatar = ?, updated_at = ?
         WHERE id = ?
         RETURNING {COLUMNS}"
    ))
    .bind(first_name)
    .bind(last_name)
    .bind(avatar)
    .bind(Utc::now().naive_utc())
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}

/// Returns false when no row matched
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM profiles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
