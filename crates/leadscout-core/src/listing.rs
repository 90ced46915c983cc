//! The `Listing` data model shared by every crate in the workspace.
//!
//! A `Listing` is one discovered business. Its core fields are fixed once the
//! fetcher builds it from a detail response; only `emails` may be filled in
//! afterwards, exactly once, by the optional enrichment step.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a discovered email address came from.
///
/// Scraped addresses were observed on a fetched page. Guessed addresses are
/// low-confidence constructions like `info@<domain>` and must stay
/// distinguishable from observed facts all the way into the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailSource {
    Scraped,
    Guessed,
}

/// One email address attached to a listing, with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredEmail {
    /// Lowercased address.
    pub address: String,
    pub source: EmailSource,
}

impl DiscoveredEmail {
    #[must_use]
    pub fn scraped(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            source: EmailSource::Scraped,
        }
    }

    #[must_use]
    pub fn guessed(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            source: EmailSource::Guessed,
        }
    }
}

/// One discovered business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Display name. May be empty when the upstream record had none.
    pub name: String,

    /// Formatted street address.
    pub address: String,

    /// Formatted phone number; empty when the place has none on file.
    pub phone: String,

    /// Website URL as reported upstream; may be empty or scheme-less.
    pub website: String,

    /// Average rating; `None` for places with no reviews.
    pub rating: Option<f64>,

    /// Review count.
    pub total_reviews: u32,

    /// Opaque identifier unique per underlying place. The sole key used when
    /// merging listing batches.
    pub place_id: String,

    /// The query string that produced this listing, kept for provenance.
    pub search_term: String,

    /// Operational status reported upstream (e.g. `OPERATIONAL`).
    pub business_status: String,

    /// Comma-joined place type tags.
    pub types: String,

    /// When the detail response was received.
    pub scraped_at: DateTime<Utc>,

    /// Discovered emails in discovery order. Empty until enrichment runs.
    #[serde(default)]
    pub emails: Vec<DiscoveredEmail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_source_serializes_snake_case() {
        let json = serde_json::to_string(&EmailSource::Guessed).expect("serialize");
        assert_eq!(json, "\"guessed\"");
    }

    #[test]
    fn listing_round_trips_through_json() {
        let listing = Listing {
            name: "Test Cafe".to_string(),
            address: "1 High St".to_string(),
            phone: String::new(),
            website: "example.com".to_string(),
            rating: Some(4.5),
            total_reviews: 12,
            place_id: "pid-1".to_string(),
            search_term: "cafes".to_string(),
            business_status: "OPERATIONAL".to_string(),
            types: "cafe, food".to_string(),
            scraped_at: Utc::now(),
            emails: vec![DiscoveredEmail::scraped("info@example.com")],
        };
        let json = serde_json::to_string(&listing).expect("serialize");
        let back: Listing = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.place_id, "pid-1");
        assert_eq!(back.emails.len(), 1);
        assert_eq!(back.emails[0].source, EmailSource::Scraped);
    }
}
