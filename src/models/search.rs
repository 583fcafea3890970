use serde::{Deserialize, Serialize};

/// Search mode for the movie search endpoint
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Search movies and TV shows by title
    #[default]
    Title,
    /// Search by actor: first matching person's movie credits
    Actor,
}

/// Kind tag carried by every search result
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Movie,
    Tv,
}

/// A single ranked search result as returned to clients
///
/// `id` is synthetic: `tmdb:<kind>:<external id>`. `year` is the first four
/// characters of the release/first-air date, or empty when unknown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub year: String,
    pub overview: String,
    pub poster: String,
    pub kind: ResultKind,
}

/// Movie entry from TMDb search and credit responses
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
}

/// TV show entry from TMDb search responses
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbTvShow {
    pub id: u64,
    pub name: Option<String>,
    pub original_name: Option<String>,
    pub first_air_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
}

/// Person entry from TMDb person search responses
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TmdbPerson {
    pub id: u64,
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_deserialization() {
        let title: SearchMode = serde_json::from_str("\"title\"").unwrap();
        let actor: SearchMode = serde_json::from_str("\"actor\"").unwrap();
        assert_eq!(title, SearchMode::Title);
        assert_eq!(actor, SearchMode::Actor);
    }

    #[test]
    fn test_result_kind_serialization() {
        assert_eq!(serde_json::to_string(&ResultKind::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&ResultKind::Tv).unwrap(), "\"tv\"");
    }

    #[test]
    fn test_tmdb_movie_deserialization_with_nulls() {
        let json = r#"{
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "overview": "A computer hacker learns...",
            "poster_path": "/abc.jpg",
            "popularity": null
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 603);
        assert_eq!(movie.title.as_deref(), Some("The Matrix"));
        assert_eq!(movie.original_title, None);
        assert_eq!(movie.popularity, None);
    }
}
