use crate::error::AppResult;
use crate::models::{TmdbMovie, TmdbPerson, TmdbTvShow};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// External movie/TV metadata source
///
/// The aggregator treats every error from these calls as a transport-level
/// failure and applies its fallback policy; providers do not retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search movies by title
    async fn search_movies(&self, query: &str) -> AppResult<Vec<TmdbMovie>>;

    /// Search TV shows by title
    async fn search_tv(&self, query: &str) -> AppResult<Vec<TmdbTvShow>>;

    /// Search people by name
    async fn search_person(&self, query: &str) -> AppResult<Vec<TmdbPerson>>;

    /// Movie credits (cast entries) for a person
    async fn person_movie_credits(&self, person_id: u64) -> AppResult<Vec<TmdbMovie>>;
}
