use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{TmdbMovie, TmdbPerson, TmdbTvShow};
use crate::services::providers::MetadataProvider;

/// Upper bound on any single metadata call; a timeout counts as a
/// transport failure and feeds the aggregator's fallback policy
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const LANGUAGE: &str = "de-DE";

/// TMDb-backed metadata provider
#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[derive(Deserialize)]
struct ResultsEnvelope<T> {
    #[serde(default = "Vec::new")]
    results: Vec<T>,
}

#[derive(Deserialize)]
struct CreditsEnvelope {
    #[serde(default = "Vec::new")]
    cast: Vec<TmdbMovie>,
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movies(&self, query: &str) -> AppResult<Vec<TmdbMovie>> {
        let envelope: ResultsEnvelope<TmdbMovie> = self
            .get_json(
                "/search/movie",
                &[("query", query), ("include_adult", "false")],
            )
            .await?;

        tracing::debug!(
            query = %query,
            results = envelope.results.len(),
            "TMDb movie search completed"
        );

        Ok(envelope.results)
    }

    async fn search_tv(&self, query: &str) -> AppResult<Vec<TmdbTvShow>> {
        let envelope: ResultsEnvelope<TmdbTvShow> = self
            .get_json(
                "/search/tv",
                &[("query", query), ("include_adult", "false")],
            )
            .await?;

        tracing::debug!(
            query = %query,
            results = envelope.results.len(),
            "TMDb TV search completed"
        );

        Ok(envelope.results)
    }

    async fn search_person(&self, query: &str) -> AppResult<Vec<TmdbPerson>> {
        let envelope: ResultsEnvelope<TmdbPerson> = self
            .get_json("/search/person", &[("query", query)])
            .await?;

        Ok(envelope.results)
    }

    async fn person_movie_credits(&self, person_id: u64) -> AppResult<Vec<TmdbMovie>> {
        let envelope: CreditsEnvelope = self
            .get_json(&format!("/person/{person_id}/movie_credits"), &[])
            .await?;

        Ok(envelope.cast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_envelope_defaults_to_empty() {
        let envelope: ResultsEnvelope<TmdbMovie> = serde_json::from_str("{}").unwrap();
        assert!(envelope.results.is_empty());
    }

    #[test]
    fn test_credits_envelope_deserialization() {
        let json = r#"{
            "cast": [
                { "id": 27205, "title": "Inception", "popularity": 83.4 }
            ],
            "crew": []
        }"#;

        let envelope: CreditsEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.cast.len(), 1);
        assert_eq!(envelope.cast[0].id, 27205);
        assert_eq!(envelope.cast[0].popularity, Some(83.4));
    }
}
