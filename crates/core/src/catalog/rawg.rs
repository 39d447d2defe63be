use async_trait::async_trait;
use reqwest::{Client, Request};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{config::AppConfig, error::CatalogError, models::GameRecord};

use super::CatalogClient;

/// Envelope of `GET /games`.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    results: Option<Vec<GameRecord>>,
}

/// Client for the RAWG `games` search endpoint.
#[derive(Debug, Clone)]
pub struct RawgClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl RawgClient {
    /// Build a client from configuration.
    pub fn new(config: &AppConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    /// Whether a credential is available for outbound requests.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn build_search_request(&self, term: &str, page_size: u32) -> Result<Request, CatalogError> {
        let key = self.api_key.as_deref().ok_or(CatalogError::MissingApiKey)?;
        let url = format!("{}/games", self.base_url);
        let request = self
            .client
            .get(url)
            .query(&[
                ("key", key.to_string()),
                ("search", term.to_string()),
                ("page_size", page_size.to_string()),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl CatalogClient for RawgClient {
    async fn search(&self, term: &str, page_size: u32) -> Result<Vec<GameRecord>, CatalogError> {
        let request = self.build_search_request(term, page_size)?;
        info!(term, page_size, "Querying catalog");

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }

        let body = response.text().await?;
        let records = parse_search_body(&body)?;
        debug!(results = records.len(), "Catalog responded");
        Ok(records)
    }
}

/// Extract the result list from a search response body.
///
/// A body without a `results` field is an empty result set, not an error.
pub fn parse_search_body(body: &str) -> Result<Vec<GameRecord>, CatalogError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    if let Some(count) = response.count {
        debug!(count, "Catalog match count");
    }
    Ok(response.results.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{display_name, media::NAME_UNAVAILABLE};

    fn client_with_key(key: Option<&str>) -> RawgClient {
        let config = AppConfig {
            api_key: key.map(str::to_string),
            base_url: "https://api.example.test/api/".to_string(),
            ..AppConfig::default()
        };
        RawgClient::new(&config).expect("client builds")
    }

    #[test]
    fn search_request_carries_key_term_and_page_size() {
        let client = client_with_key(Some("secret"));
        let request = client
            .build_search_request("Halo Infinite", 1)
            .expect("request builds");
        let url = request.url();

        assert_eq!(url.path(), "/api/games");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "secret".to_string()),
                ("search".to_string(), "Halo Infinite".to_string()),
                ("page_size".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn missing_key_is_reported_before_any_request() {
        let client = client_with_key(Some("   "));
        assert!(!client.has_api_key());
        let err = client.build_search_request("Halo", 1).unwrap_err();
        assert!(matches!(err, CatalogError::MissingApiKey));
    }

    #[test]
    fn parses_results_envelope() {
        let body = r#"{
            "count": 812,
            "next": "https://api.rawg.io/api/games?page=2",
            "results": [
                { "id": 1, "name": "Halo Infinite", "rating": 4.5, "metacritic": 87 }
            ]
        }"#;
        let records = parse_search_body(body).expect("parses");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Halo Infinite");
    }

    #[test]
    fn null_scalars_fall_back_to_defaults() {
        let body = r#"{
            "results": [
                {
                    "id": 1,
                    "name": null,
                    "rating": null,
                    "tags": [{ "name": "Co-op", "language": null }]
                }
            ]
        }"#;
        let records = parse_search_body(body).expect("parses");
        assert_eq!(records.len(), 1);
        assert_eq!(display_name(&records[0]), NAME_UNAVAILABLE);
        assert_eq!(records[0].rating, 0.0);
        assert_eq!(records[0].tags[0].language, "");
    }

    #[test]
    fn missing_results_means_no_match() {
        let records = parse_search_body(r#"{ "detail": "Not found." }"#).expect("parses");
        assert!(records.is_empty());
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = parse_search_body("<html>502</html>").unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
