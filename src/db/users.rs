use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppResult;
use crate::models::User;

/// All users in rotation order: position ascending, id breaking ties
pub async fn list_ordered(pool: &SqlitePool) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, email, avatar_url, position, created_at
         FROM users ORDER BY position ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn get(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, avatar_url, position, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Highest assigned position, or None when the table is empty
pub async fn max_position(pool: &SqlitePool) -> AppResult<Option<i64>> {
    let max: Option<i64> = sqlx::query_scalar("SELECT MAX(position) FROM users")
        .fetch_one(pool)
        .await?;

    Ok(max)
}

pub async fn insert(
    pool: &SqlitePool,
    name: &str,
    email: Option<&str>,
    avatar_url: Option<&str>,
    position: i64,
) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, avatar_url, position, created_at)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id, name, email, avatar_url, position, created_at",
    )
    .bind(name)
    .bind(email)
    .bind(avatar_url)
    .bind(position)
    .bind(Utc::now().naive_utc())
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Persists the mutable columns of an already-loaded user
pub async fn update(pool: &SqlitePool, user: &User) -> AppResult<()> {
    sqlx::query("UPDATE users SET name = ?, email = ?, avatar_url = ?, position = ? WHERE id = ?")
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.avatar_url)
        .bind(user.position)
        .bind(user.id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Returns false when no row matched
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn set_position(pool: &SqlitePool, id: i64, position: i64) -> AppResult<()> {
    sqlx::query("UPDATE users SET position = ? WHERE id = ?")
        .bind(position)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(())
}
