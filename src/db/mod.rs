use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::error::AppResult;

pub mod profiles;
pub mod users;
pub mod watch_events;

/// Creates a SQLite connection pool
///
/// The database file is created on first run. The pool is shared across
/// requests; individual connections are acquired per query and released on
/// all exit paths.
pub async fn create_pool(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Creates the tables if they do not exist yet
pub async fn init_schema(pool: &SqlitePool) -> AppResult<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT,
            avatar_url TEXT,
            position INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS watch_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            picker_user_id INTEGER NOT NULL,
            movie_id TEXT NOT NULL,
            title TEXT NOT NULL,
            search_url TEXT,
            poster_url TEXT,
            watched_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            avatar TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_position ON users(position)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_events_watched_at ON watch_events(watched_at)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Seeds the rotation with a starter trio when the users table is empty
pub async fn seed_users(pool: &SqlitePool) -> AppResult<()> {
    if !users::list_ordered(pool).await?.is_empty() {
        return Ok(());
    }

    users::insert(pool, "Alex", Some("alex@local"), None, 0).await?;
    users::insert(pool, "Sam", Some("sam@local"), None, 1).await?;
    users::insert(pool, "Kim", Some("kim@local"), None, 2).await?;

    tracing::info!("Seeded rotation with default users");
    Ok(())
}
