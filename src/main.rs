use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use movie_night_api::api::{create_router, AppState};
use movie_night_api::config::Config;
use movie_night_api::db;
use movie_night_api::services::providers::{MetadataProvider, TmdbProvider};
use movie_night_api::services::search::SearchAggregator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::init_schema(&pool).await?;
    db::seed_users(&pool).await?;

    tokio::fs::create_dir_all(&config.upload_dir).await?;

    let provider: Option<Arc<dyn MetadataProvider>> = match &config.tmdb_api_key {
        Some(key) => Some(Arc::new(TmdbProvider::new(
            key.clone(),
            config.tmdb_api_url.clone(),
        )?)),
        None => {
            tracing::warn!("TMDB_API_KEY not set; search will serve mock results");
            None
        }
    };

    let state = AppState::new(
        pool,
        SearchAggregator::new(provider),
        config.upload_dir.clone().into(),
    );
    let app = create_router(state, &config.cors_origin_list());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
