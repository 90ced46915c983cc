//! Places API response types for the text-search and place-details endpoints.
//!
//! Both endpoints wrap their payload in an envelope carrying a `status`
//! string. `"OK"` means results are present; `"ZERO_RESULTS"` is a successful
//! empty search; anything else is an API-level failure and surfaces as
//! [`crate::PlacesError::ApiStatus`]. Summary records carry a subset of the
//! detail fields, so listing construction prefers detail values and falls
//! back to the summary.

use serde::Deserialize;

/// Envelope for `GET /textsearch/json`.
#[derive(Debug, Deserialize)]
pub struct TextSearchResponse {
    pub status: String,

    #[serde(default)]
    pub results: Vec<PlaceSummary>,

    /// Continuation token for the next page. The upstream API needs a short
    /// propagation delay before the token becomes valid.
    #[serde(default)]
    pub next_page_token: Option<String>,

    #[serde(default)]
    pub error_message: Option<String>,
}

/// One summary record from a text search.
#[derive(Debug, Deserialize)]
pub struct PlaceSummary {
    /// Opaque identifier unique per place; keys the follow-up detail request.
    pub place_id: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub formatted_address: Option<String>,

    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub user_ratings_total: Option<u32>,
}

/// Envelope for `GET /details/json`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,

    #[serde(default)]
    pub result: Option<PlaceDetails>,

    #[serde(default)]
    pub error_message: Option<String>,
}

/// Extended fields for a single place.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub formatted_address: Option<String>,

    #[serde(default)]
    pub formatted_phone_number: Option<String>,

    #[serde(default)]
    pub website: Option<String>,

    /// Absent for places with no reviews.
    #[serde(default)]
    pub rating: Option<f64>,

    #[serde(default)]
    pub user_ratings_total: Option<u32>,

    #[serde(default)]
    pub business_status: Option<String>,

    #[serde(default)]
    pub types: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_search_response_parses_minimal_payload() {
        let body = r#"{"status":"OK","results":[{"place_id":"p1"}]}"#;
        let parsed: TextSearchResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].place_id, "p1");
        assert!(parsed.next_page_token.is_none());
    }

    #[test]
    fn details_response_tolerates_missing_result() {
        let body = r#"{"status":"NOT_FOUND","error_message":"no such place"}"#;
        let parsed: DetailsResponse = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.status, "NOT_FOUND");
        assert!(parsed.result.is_none());
        assert_eq!(parsed.error_message.as_deref(), Some("no such place"));
    }

    #[test]
    fn place_details_defaults_absent_fields() {
        let body = r#"{"name":"Cafe"}"#;
        let parsed: PlaceDetails = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.name.as_deref(), Some("Cafe"));
        assert!(parsed.rating.is_none());
        assert!(parsed.types.is_empty());
    }
}
