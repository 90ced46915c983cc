//! The end-to-end scraping pipeline for one run.
//!
//! Composition, not inheritance: the pipeline owns a fetch capability
//! (`PlacesClient`) and an optional enrich capability (`EmailScout`) and
//! drives them sequentially per search term, publishing progress through the
//! caller's watch channel.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tokio::sync::watch;

use leadscout_core::{merge_batches, write_listings_csv, DiscoveredEmail, ExportError, Listing};
use leadscout_email::{guess, EmailScout};
use leadscout_places::{PlacesClient, SearchSpec};

use crate::status::{RunRequest, RunStatus};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("invalid run request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Tuning knobs forwarded from `AppConfig`.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub data_dir: PathBuf,
    pub detail_delay_ms: u64,
    pub page_token_delay_ms: u64,
    pub email_max_pages: usize,
}

/// Result of a completed run.
#[derive(Debug)]
pub struct RunOutcome {
    pub listings: Vec<Listing>,
    pub output_file: PathBuf,
}

pub struct Pipeline {
    places: PlacesClient,
    scout: EmailScout,
    options: PipelineOptions,
}

impl Pipeline {
    #[must_use]
    pub fn new(places: PlacesClient, scout: EmailScout, options: PipelineOptions) -> Self {
        Self {
            places,
            scout,
            options,
        }
    }

    /// Runs the full scrape: per term, fetch listings, optionally enrich
    /// with emails, then merge, deduplicate, and export to CSV.
    ///
    /// Per-term and per-listing failures are absorbed below this boundary;
    /// only an invalid request or a failed export is an error.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidRequest`] before any network call when the
    ///   request violates its constraints.
    /// - [`PipelineError::Export`] when the CSV cannot be written.
    pub async fn execute(
        &self,
        request: &RunRequest,
        status: &watch::Sender<RunStatus>,
    ) -> Result<RunOutcome, PipelineError> {
        let terms = validate_request(request)?;
        let total_terms = terms.len();

        let mut batches: Vec<Vec<Listing>> = Vec::with_capacity(total_terms);
        let mut found_so_far = 0usize;

        for (term_idx, term) in terms.iter().enumerate() {
            status.send_modify(|s| {
                s.current_query.clone_from(term);
                s.message = format!("Processing: {term}");
                s.progress_percent = progress_for(term_idx, 0, total_terms, request.max_results);
            });

            let spec = match SearchSpec::new(
                term,
                &request.location,
                SearchSpec::DEFAULT_RADIUS_M,
                request.max_results,
            ) {
                Ok(spec) => spec,
                Err(e) => {
                    tracing::warn!(term = %term, error = %e, "skipping term with invalid spec");
                    continue;
                }
            };

            let mut batch = self
                .places
                .fetch_listings(
                    &spec,
                    self.options.detail_delay_ms,
                    self.options.page_token_delay_ms,
                )
                .await;

            status.send_modify(|s| {
                s.message = format!("Found {} places for \"{term}\"", batch.len());
            });

            if request.include_emails {
                for (item_idx, listing) in batch.iter_mut().enumerate() {
                    status.send_modify(|s| {
                        s.message = format!("Getting email for: {}", listing.name);
                        s.progress_percent =
                            progress_for(term_idx, item_idx, total_terms, request.max_results);
                    });
                    self.enrich(listing).await;
                }
            }

            found_so_far += batch.len();
            status.send_modify(|s| {
                s.leads_found = found_so_far;
                s.progress_percent = progress_for(
                    term_idx,
                    request.max_results.saturating_sub(1),
                    total_terms,
                    request.max_results,
                );
            });

            batches.push(batch);
        }

        let listings = merge_batches(batches);
        let output_file = self
            .options
            .data_dir
            .join(output_file_name(&terms, Utc::now()));
        write_listings_csv(&output_file, &listings)?;

        status.send_modify(|s| {
            s.leads_found = listings.len();
            s.progress_percent = 100;
            s.message = format!(
                "Completed! Found {} leads. Saved to {}",
                listings.len(),
                output_file.display()
            );
        });

        Ok(RunOutcome {
            listings,
            output_file,
        })
    }

    /// Attaches emails to one listing, exactly once. Scraped addresses come
    /// first; when none were found a single guessed address is offered,
    /// tagged with its low-confidence provenance.
    async fn enrich(&self, listing: &mut Listing) {
        if listing.website.is_empty() {
            return;
        }

        let scraped = self
            .scout
            .discover(&listing.website, self.options.email_max_pages)
            .await;

        if scraped.is_empty() {
            if let Some(address) = guess::domain_of(&listing.website)
                .as_deref()
                .and_then(guess::guess_fallback_email)
            {
                listing.emails = vec![DiscoveredEmail::guessed(address)];
            }
            return;
        }

        listing.emails = scraped.into_iter().map(DiscoveredEmail::scraped).collect();
    }
}

fn validate_request(request: &RunRequest) -> Result<Vec<String>, PipelineError> {
    let terms: Vec<String> = request
        .search_terms
        .iter()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty())
        .collect();

    if terms.is_empty() {
        return Err(PipelineError::InvalidRequest(
            "at least one non-empty search term is required".to_owned(),
        ));
    }
    if request.location.trim().is_empty() {
        return Err(PipelineError::InvalidRequest(
            "location must not be empty".to_owned(),
        ));
    }
    if request.max_results == 0 {
        return Err(PipelineError::InvalidRequest(
            "max_results must be at least 1".to_owned(),
        ));
    }

    Ok(terms)
}

/// Progress estimate across `(term, item)` positions, capped at 95 until the
/// export completes.
fn progress_for(term_idx: usize, item_idx: usize, total_terms: usize, max_results: usize) -> u8 {
    let total = (total_terms * max_results).max(1);
    let done = term_idx * max_results + item_idx + 1;
    let percent = done * 100 / total;
    u8::try_from(percent.min(95)).unwrap_or(95)
}

/// Builds `leads_<terms>_<timestamp>.csv` from up to three search terms,
/// spaces underscored, commas dropped, clamped to a reasonable length.
fn output_file_name(terms: &[String], now: chrono::DateTime<Utc>) -> String {
    let mut cleaned = terms
        .iter()
        .take(3)
        .map(|t| t.replace(' ', "_").replace(',', ""))
        .collect::<Vec<_>>()
        .join("_");
    if terms.len() > 3 {
        cleaned.push_str(&format!("_and_{}_more", terms.len() - 3));
    }
    cleaned.truncate(50);

    format!("leads_{cleaned}_{}.csv", now.format("%Y%m%d_%H%M%S"))
}
