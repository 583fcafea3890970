use std::sync::Arc;

use crate::models::{ResultKind, SearchMode, SearchResult, TmdbMovie, TmdbTvShow};
use crate::services::providers::MetadataProvider;

const MAX_RESULTS: usize = 20;
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w185";

/// Merges external movie/TV search results and degrades to static mock
/// data when no provider is configured or an external call fails.
///
/// The fallback is total and silent: `search` always returns a normal
/// result list, never an error. Failures are logged. One deliberate
/// asymmetry inherited as policy: in title mode a failed TV lookup is
/// swallowed (movie results still go out), while a failure anywhere else
/// drops the whole external attempt and serves mock results.
#[derive(Clone)]
pub struct SearchAggregator {
    provider: Option<Arc<dyn MetadataProvider>>,
}

impl SearchAggregator {
    pub fn new(provider: Option<Arc<dyn MetadataProvider>>) -> Self {
        Self { provider }
    }

    /// Aggregator without an external provider; serves mock results only
    pub fn disabled() -> Self {
        Self { provider: None }
    }

    pub async fn search(&self, query: &str, mode: SearchMode) -> Vec<SearchResult> {
        let Some(provider) = &self.provider else {
            return mock_results(query, mode);
        };

        match self.search_external(provider.as_ref(), query, mode).await {
            Ok(results) => results,
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    query = %query,
                    ?mode,
                    "External search failed, serving mock results"
                );
                mock_results(query, mode)
            }
        }
    }

    async fn search_external(
        &self,
        provider: &dyn MetadataProvider,
        query: &str,
        mode: SearchMode,
    ) -> crate::error::AppResult<Vec<SearchResult>> {
        match mode {
            SearchMode::Title => self.search_by_title(provider, query).await,
            SearchMode::Actor => self.search_by_actor(provider, query).await,
        }
    }

    async fn search_by_title(
        &self,
        provider: &dyn MetadataProvider,
        query: &str,
    ) -> crate::error::AppResult<Vec<SearchResult>> {
        let movies = provider.search_movies(query).await?;

        // TV failures are swallowed: movie results still go out
        let tv_shows = match provider.search_tv(query).await {
            Ok(shows) => shows,
            Err(err) => {
                tracing::warn!(error = %err, query = %query, "TV search failed, skipped");
                Vec::new()
            }
        };

        let mut ranked: Vec<(f64, SearchResult)> = movies
            .iter()
            .map(|m| (m.popularity.unwrap_or(0.0), movie_result(m, "Unknown title")))
            .chain(tv_shows.iter().map(|t| (t.popularity.unwrap_or(0.0), tv_result(t))))
            .collect();

        ranked.sort_by(|a, b| b.0.total_cmp(&a.0));
        ranked.truncate(MAX_RESULTS);

        Ok(ranked.into_iter().map(|(_, result)| result).collect())
    }

    async fn search_by_actor(
        &self,
        provider: &dyn MetadataProvider,
        query: &str,
    ) -> crate::error::AppResult<Vec<SearchResult>> {
        let people = provider.search_person(query).await?;

        // No matching person is a legitimate empty answer, not a failure
        let Some(person) = people.first() else {
            return Ok(Vec::new());
        };

        let mut credits = provider.person_movie_credits(person.id).await?;
        credits.sort_by(|a, b| {
            b.popularity
                .unwrap_or(0.0)
                .total_cmp(&a.popularity.unwrap_or(0.0))
        });
        credits.truncate(MAX_RESULTS);

        Ok(credits.iter().map(|m| movie_result(m, "")).collect())
    }
}

fn movie_result(movie: &TmdbMovie, fallback_title: &str) -> SearchResult {
    SearchResult {
        id: format!("tmdb:movie:{}", movie.id),
        title: movie
            .title
            .clone()
            .or_else(|| movie.original_title.clone())
            .unwrap_or_else(|| fallback_title.to_string()),
        year: release_year(movie.release_date.as_deref()),
        overview: movie.overview.clone().unwrap_or_default(),
        poster: poster_url(movie.poster_path.as_deref()),
        kind: ResultKind::Movie,
    }
}

fn tv_result(show: &TmdbTvShow) -> SearchResult {
    SearchResult {
        id: format!("tmdb:tv:{}", show.id),
        title: show
            .name
            .clone()
            .or_else(|| show.original_name.clone())
            .unwrap_or_else(|| "Unknown series".to_string()),
        year: release_year(show.first_air_date.as_deref()),
        overview: show.overview.clone().unwrap_or_default(),
        poster: poster_url(show.poster_path.as_deref()),
        kind: ResultKind::Tv,
    }
}

/// First four characters of a release/air date; empty when absent
fn release_year(date: Option<&str>) -> String {
    date.unwrap_or_default().chars().take(4).collect()
}

fn poster_url(path: Option<&str>) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{POSTER_BASE_URL}{p}"),
        _ => String::new(),
    }
}

/// Static canned results served when no API key is configured or the
/// external attempt fails.
///
/// Title mode filters by case-insensitive substring on the title; actor
/// mode returns the full set unfiltered. The asymmetry is intentional.
pub fn mock_results(query: &str, mode: SearchMode) -> Vec<SearchResult> {
    let base = vec![
        SearchResult {
            id: "tmdb:movie:123".to_string(),
            title: "Inception".to_string(),
            year: "2010".to_string(),
            overview: "A thief who steals corporate secrets...".to_string(),
            poster: String::new(),
            kind: ResultKind::Movie,
        },
        SearchResult {
            id: "tmdb:movie:456".to_string(),
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            overview: "A computer hacker learns...".to_string(),
            poster: String::new(),
            kind: ResultKind::Movie,
        },
        SearchResult {
            id: "tmdb:movie:789".to_string(),
            title: "Se7en".to_string(),
            year: "1995".to_string(),
            overview: "Two detectives hunt a serial killer...".to_string(),
            poster: String::new(),
            kind: ResultKind::Movie,
        },
    ];

    if mode == SearchMode::Actor {
        return base;
    }

    let needle = query.to_lowercase();
    base.into_iter()
        .filter(|m| m.title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::TmdbPerson;
    use crate::services::providers::MockMetadataProvider;

    fn movie(id: u64, title: &str, popularity: f64) -> TmdbMovie {
        TmdbMovie {
            id,
            title: Some(title.to_string()),
            original_title: None,
            release_date: Some("1999-03-30".to_string()),
            overview: Some("overview".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            popularity: Some(popularity),
        }
    }

    fn tv_show(id: u64, name: &str, popularity: f64) -> TmdbTvShow {
        TmdbTvShow {
            id,
            name: Some(name.to_string()),
            original_name: None,
            first_air_date: Some("2008-01-20".to_string()),
            overview: Some("overview".to_string()),
            poster_path: None,
            popularity: Some(popularity),
        }
    }

    fn transport_error() -> AppError {
        AppError::ExternalApi("TMDb API returned status 500: boom".to_string())
    }

    #[tokio::test]
    async fn test_no_provider_title_mode_filters_mock_set() {
        let aggregator = SearchAggregator::disabled();

        let results = aggregator.search("matrix", SearchMode::Title).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "The Matrix");
        assert_eq!(results[0].id, "tmdb:movie:456");
        assert_eq!(results[0].year, "1999");
    }

    #[tokio::test]
    async fn test_no_provider_title_filter_is_case_insensitive() {
        let aggregator = SearchAggregator::disabled();

        let results = aggregator.search("MATRIX", SearchMode::Title).await;
        assert_eq!(results.len(), 1);

        let results = aggregator.search("zzz-no-match", SearchMode::Title).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_no_provider_actor_mode_returns_full_mock_set() {
        let aggregator = SearchAggregator::disabled();

        let results = aggregator.search("keanu", SearchMode::Actor).await;

        assert_eq!(results.len(), 3);
    }

    #[tokio::test]
    async fn test_title_mode_merges_and_ranks_by_popularity() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_movies()
            .returning(|_| Ok(vec![movie(1, "Low", 5.0), movie(2, "High", 50.0)]));
        provider
            .expect_search_tv()
            .returning(|_| Ok(vec![tv_show(3, "Middle", 25.0)]));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("q", SearchMode::Title).await;

        let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["High", "Middle", "Low"]);
        assert_eq!(results[0].id, "tmdb:movie:2");
        assert_eq!(results[1].id, "tmdb:tv:3");
        assert_eq!(results[1].kind, ResultKind::Tv);
    }

    #[tokio::test]
    async fn test_title_mode_truncates_to_twenty() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_movies().returning(|_| {
            Ok((0..30)
                .map(|i| movie(i, &format!("m{i}"), i as f64))
                .collect())
        });
        provider.expect_search_tv().returning(|_| Ok(Vec::new()));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("q", SearchMode::Title).await;

        assert_eq!(results.len(), 20);
        // Highest popularity first
        assert_eq!(results[0].title, "m29");
    }

    #[tokio::test]
    async fn test_title_mode_missing_popularity_ranks_last() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_movies().returning(|_| {
            let mut unranked = movie(1, "Unranked", 0.0);
            unranked.popularity = None;
            Ok(vec![unranked, movie(2, "Ranked", 1.0)])
        });
        provider.expect_search_tv().returning(|_| Ok(Vec::new()));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("q", SearchMode::Title).await;

        assert_eq!(results[0].title, "Ranked");
        assert_eq!(results[1].title, "Unranked");
    }

    #[tokio::test]
    async fn test_tv_failure_is_swallowed_movie_results_survive() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_movies()
            .returning(|_| Ok(vec![movie(1, "Heat", 30.0)]));
        provider
            .expect_search_tv()
            .returning(|_| Err(transport_error()));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("heat", SearchMode::Title).await;

        // Movie-only results, not the mock set
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Heat");
    }

    #[tokio::test]
    async fn test_movie_failure_falls_back_to_mock() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_search_movies()
            .returning(|_| Err(transport_error()));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("matrix", SearchMode::Title).await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "tmdb:movie:456");
    }

    #[tokio::test]
    async fn test_actor_mode_no_person_yields_empty_not_mock() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_person().returning(|_| Ok(Vec::new()));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("nobody", SearchMode::Actor).await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_actor_mode_ranks_credits_of_first_person() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_person().returning(|_| {
            Ok(vec![
                TmdbPerson {
                    id: 6384,
                    name: Some("Keanu Reeves".to_string()),
                },
                TmdbPerson {
                    id: 999,
                    name: Some("Someone Else".to_string()),
                },
            ])
        });
        provider
            .expect_person_movie_credits()
            .withf(|person_id| *person_id == 6384)
            .returning(|_| Ok(vec![movie(1, "Minor", 2.0), movie(2, "John Wick", 80.0)]));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("keanu", SearchMode::Actor).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "John Wick");
        assert_eq!(results[0].kind, ResultKind::Movie);
    }

    #[tokio::test]
    async fn test_actor_mode_credit_failure_falls_back_to_mock() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_person().returning(|_| {
            Ok(vec![TmdbPerson {
                id: 1,
                name: Some("Someone".to_string()),
            }])
        });
        provider
            .expect_person_movie_credits()
            .returning(|_| Err(transport_error()));

        let aggregator = SearchAggregator::new(Some(Arc::new(provider)));
        let results = aggregator.search("someone", SearchMode::Actor).await;

        // Hard failure in actor mode degrades to the full mock set
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_release_year_derivation() {
        assert_eq!(release_year(Some("1999-03-30")), "1999");
        assert_eq!(release_year(Some("1999")), "1999");
        assert_eq!(release_year(Some("19")), "19");
        assert_eq!(release_year(Some("")), "");
        assert_eq!(release_year(None), "");
    }

    #[test]
    fn test_poster_url_formatting() {
        assert_eq!(
            poster_url(Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w185/abc.jpg"
        );
        assert_eq!(poster_url(None), "");
        assert_eq!(poster_url(Some("")), "");
    }

    #[test]
    fn test_title_falls_back_to_original_title() {
        let mut m = movie(7, "ignored", 1.0);
        m.title = None;
        m.original_title = Some("Original".to_string());
        assert_eq!(movie_result(&m, "Unknown title").title, "Original");

        m.original_title = None;
        assert_eq!(movie_result(&m, "Unknown title").title, "Unknown title");
    }
}
