//! HTTP client for the places-search API.
//!
//! Wraps `reqwest` with API key management, typed response deserialization,
//! and checking of the `status` field every response envelope carries.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::types::{DetailsResponse, PlaceDetails, TextSearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Detail fields requested from the details endpoint. Keeping the field mask
/// narrow keeps the per-request billing tier down.
const DETAIL_FIELDS: &str = "name,formatted_address,formatted_phone_number,website,\
rating,user_ratings_total,business_status,types";

/// Client for the places-search API.
///
/// Manages the HTTP client, API key, and base URL. Use [`PlacesClient::new`]
/// for production or [`PlacesClient::with_base_url`] to point at a mock
/// server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl PlacesClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining endpoint paths appends rather than replaces the last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Issues one text-search request.
    ///
    /// When `page_token` is `Some`, the upstream continuation token is sent
    /// instead of the query text (the token encodes the original search).
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is neither `"OK"`
    ///   nor `"ZERO_RESULTS"`.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn text_search(
        &self,
        query: &str,
        radius_m: u32,
        page_token: Option<&str>,
    ) -> Result<TextSearchResponse, PlacesError> {
        let radius = radius_m.to_string();
        let params: Vec<(&str, &str)> = match page_token {
            Some(token) => vec![("pagetoken", token)],
            None => vec![("query", query), ("radius", &radius)],
        };
        let url = self.build_url("textsearch/json", &params)?;

        let body = self.request_json(&url).await?;
        let parsed: TextSearchResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("textsearch(query={query})"),
                source: e,
            })?;

        if parsed.status != "OK" && parsed.status != "ZERO_RESULTS" {
            return Err(PlacesError::ApiStatus {
                operation: format!("textsearch(query={query})"),
                status: describe_status(&parsed.status, parsed.error_message.as_deref()),
            });
        }

        Ok(parsed)
    }

    /// Fetches extended detail for a single place.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::ApiStatus`] if the envelope status is not `"OK"` or
    ///   the result payload is missing.
    /// - [`PlacesError::Http`] on network failure or non-2xx HTTP status.
    /// - [`PlacesError::Deserialize`] if the body does not match the expected
    ///   shape.
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            "details/json",
            &[("place_id", place_id), ("fields", DETAIL_FIELDS)],
        )?;

        let body = self.request_json(&url).await?;
        let parsed: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        if parsed.status != "OK" {
            return Err(PlacesError::ApiStatus {
                operation: format!("details(place_id={place_id})"),
                status: describe_status(&parsed.status, parsed.error_message.as_deref()),
            });
        }

        parsed.result.ok_or_else(|| PlacesError::ApiStatus {
            operation: format!("details(place_id={place_id})"),
            status: "OK with empty result".to_owned(),
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters. The API key is always appended.
    fn build_url(&self, endpoint: &str, extra: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in extra {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the response
    /// body as JSON.
    async fn request_json(&self, url: &Url) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url.clone()).send().await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: redact_key(url),
            source: e,
        })
    }
}

/// Combines the status code with the optional upstream message for error text.
fn describe_status(status: &str, error_message: Option<&str>) -> String {
    match error_message {
        Some(msg) => format!("{status} ({msg})"),
        None => status.to_owned(),
    }
}

/// Renders the URL for error context with the API key value removed.
fn redact_key(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == "key" {
                (k.into_owned(), "[redacted]".to_owned())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> PlacesClient {
        PlacesClient::with_base_url("test-key", 10, "leadscout-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_endpoint_and_key() {
        let client = test_client("https://maps.example.com/api/place");
        let url = client
            .build_url("textsearch/json", &[("query", "cafes in London")])
            .expect("url should build");
        assert_eq!(
            url.as_str(),
            "https://maps.example.com/api/place/textsearch/json?query=cafes+in+London&key=test-key"
        );
    }

    #[test]
    fn build_url_strips_trailing_slash() {
        let client = test_client("https://maps.example.com/api/place/");
        let url = client
            .build_url("details/json", &[("place_id", "p1")])
            .expect("url should build");
        assert!(url
            .as_str()
            .starts_with("https://maps.example.com/api/place/details/json?place_id=p1"));
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://maps.example.com");
        let url = client
            .build_url("textsearch/json", &[("query", "fish & chips")])
            .expect("url should build");
        assert!(
            url.as_str().contains("fish+%26+chips") || url.as_str().contains("fish%20%26%20chips"),
            "query param should be percent-encoded: {url}"
        );
    }

    #[test]
    fn redact_key_hides_credential() {
        let url = Url::parse("https://maps.example.com/details/json?place_id=p1&key=secret")
            .expect("parse");
        let redacted = redact_key(&url);
        assert!(!redacted.contains("secret"));
        assert!(redacted.contains("place_id=p1"));
    }

    #[test]
    fn describe_status_includes_upstream_message() {
        assert_eq!(
            describe_status("REQUEST_DENIED", Some("bad key")),
            "REQUEST_DENIED (bad key)"
        );
        assert_eq!(describe_status("INVALID_REQUEST", None), "INVALID_REQUEST");
    }
}
