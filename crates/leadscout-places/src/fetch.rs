//! Listing fetch loop: text search, per-result detail requests, and the
//! single continuation page the upstream API allows after a token delay.

use std::time::Duration;

use chrono::Utc;
use leadscout_core::Listing;

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::types::{PlaceDetails, PlaceSummary};

/// Validated parameters for one listing fetch.
#[derive(Debug, Clone)]
pub struct SearchSpec {
    term: String,
    location: String,
    radius_m: u32,
    max_results: usize,
}

impl SearchSpec {
    pub const DEFAULT_RADIUS_M: u32 = 5000;

    /// Builds a spec, enforcing the fetch contract up front: non-empty term
    /// and location, `max_results >= 1`, `radius_m > 0`.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::InvalidSpec`] when a constraint is violated.
    pub fn new(
        term: &str,
        location: &str,
        radius_m: u32,
        max_results: usize,
    ) -> Result<Self, PlacesError> {
        if term.trim().is_empty() {
            return Err(PlacesError::InvalidSpec("search term is empty".to_owned()));
        }
        if location.trim().is_empty() {
            return Err(PlacesError::InvalidSpec("location is empty".to_owned()));
        }
        if max_results == 0 {
            return Err(PlacesError::InvalidSpec(
                "max_results must be at least 1".to_owned(),
            ));
        }
        if radius_m == 0 {
            return Err(PlacesError::InvalidSpec(
                "radius_m must be positive".to_owned(),
            ));
        }
        Ok(Self {
            term: term.trim().to_owned(),
            location: location.trim().to_owned(),
            radius_m,
            max_results,
        })
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The combined query text sent upstream.
    #[must_use]
    pub fn query(&self) -> String {
        format!("{} in {}", self.term, self.location)
    }
}

impl PlacesClient {
    /// Fetches listings for one search spec.
    ///
    /// Issues a text search, then a detail request per summary (capped at
    /// `max_results`), combining detail and summary fields with detail
    /// preferred. If the first page carries a continuation token and the cap
    /// is not yet reached, one extra page is fetched after
    /// `page_token_delay_ms` — the upstream token is not valid immediately.
    /// `detail_delay_ms` is slept between detail requests.
    ///
    /// Per-listing failures are logged and skipped; a failed initial search
    /// yields an empty `Vec` rather than an error. Batch-level operations
    /// never propagate per-item failures past this boundary.
    pub async fn fetch_listings(
        &self,
        spec: &SearchSpec,
        detail_delay_ms: u64,
        page_token_delay_ms: u64,
    ) -> Vec<Listing> {
        let query = spec.query();

        let first_page = match self.text_search(&query, spec.radius_m, None).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!(term = %spec.term, error = %e, "initial search failed; returning no listings");
                return Vec::new();
            }
        };

        let mut listings = Vec::new();
        self.collect_page(spec, first_page.results, detail_delay_ms, &mut listings)
            .await;

        // At most one continuation page, and only when still under the cap.
        if listings.len() < spec.max_results {
            if let Some(token) = first_page.next_page_token.as_deref() {
                if page_token_delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(page_token_delay_ms)).await;
                }
                match self.text_search(&query, spec.radius_m, Some(token)).await {
                    Ok(page) => {
                        self.collect_page(spec, page.results, detail_delay_ms, &mut listings)
                            .await;
                    }
                    Err(e) => {
                        tracing::warn!(term = %spec.term, error = %e, "continuation page failed; keeping first-page listings");
                    }
                }
            }
        }

        listings
    }

    async fn collect_page(
        &self,
        spec: &SearchSpec,
        summaries: Vec<PlaceSummary>,
        detail_delay_ms: u64,
        listings: &mut Vec<Listing>,
    ) {
        for summary in summaries {
            if listings.len() >= spec.max_results {
                return;
            }

            match self.place_details(&summary.place_id).await {
                Ok(details) => {
                    listings.push(build_listing(spec.term(), &summary, &details));
                }
                Err(e) => {
                    tracing::warn!(
                        place_id = %summary.place_id,
                        error = %e,
                        "detail request failed; skipping listing"
                    );
                }
            }

            if detail_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(detail_delay_ms)).await;
            }
        }
    }
}

/// Combines summary and detail fields into a [`Listing`], preferring detail
/// values when present and falling back to the summary.
fn build_listing(term: &str, summary: &PlaceSummary, details: &PlaceDetails) -> Listing {
    Listing {
        name: details
            .name
            .clone()
            .or_else(|| summary.name.clone())
            .unwrap_or_default(),
        address: details
            .formatted_address
            .clone()
            .or_else(|| summary.formatted_address.clone())
            .unwrap_or_default(),
        phone: details.formatted_phone_number.clone().unwrap_or_default(),
        website: details.website.clone().unwrap_or_default(),
        rating: details.rating.or(summary.rating),
        total_reviews: details
            .user_ratings_total
            .or(summary.user_ratings_total)
            .unwrap_or(0),
        place_id: summary.place_id.clone(),
        search_term: term.to_owned(),
        business_status: details.business_status.clone().unwrap_or_default(),
        types: details.types.join(", "),
        scraped_at: Utc::now(),
        emails: Vec::new(),
    }
}
