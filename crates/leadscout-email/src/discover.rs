//! Email discovery over a business website.
//!
//! Fetches the homepage plus a small number of contact/about pages, runs the
//! extraction passes on each, and merges the results in discovery order. Every
//! fetch failure degrades to "no emails from that page" — discovery never
//! raises for an unreachable or malformed site.

use std::time::Duration;

use crate::error::DiscoveryError;
use crate::extract::{emails_from_mailto, emails_from_text, html_to_text, secondary_page_urls};

/// Website email discoverer.
pub struct EmailScout {
    client: reqwest::Client,
    /// Delay between secondary page fetches, applied before each one.
    page_delay_ms: u64,
}

impl EmailScout {
    /// Creates a discoverer with a bounded request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        page_delay_ms: u64,
    ) -> Result<Self, DiscoveryError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            page_delay_ms,
        })
    }

    /// Discovers email addresses reachable from `website_url`.
    ///
    /// Visits the page itself plus up to `max_pages - 1` linked contact/about
    /// pages. Returns validated, lowercased addresses in discovery order,
    /// deduplicated. An empty, malformed, or unreachable URL yields an empty
    /// result.
    pub async fn discover(&self, website_url: &str, max_pages: usize) -> Vec<String> {
        let Some(url) = normalize_url(website_url) else {
            return Vec::new();
        };

        let Some((page_url, body)) = self.fetch_page(&url).await else {
            return Vec::new();
        };

        let mut emails = Vec::new();
        harvest_page(&body, &mut emails);

        let secondary = secondary_page_urls(&body, &page_url);
        let budget = max_pages.saturating_sub(1);

        for link in secondary.into_iter().take(budget) {
            if self.page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.page_delay_ms)).await;
            }
            match self.fetch_page(&link).await {
                Some((_, secondary_body)) => harvest_page(&secondary_body, &mut emails),
                // A failed secondary page never aborts the others.
                None => continue,
            }
        }

        emails
    }

    /// Fetches one page, returning its final URL (after redirects) and body.
    /// Any failure is logged and collapsed to `None`.
    async fn fetch_page(&self, url: &str) -> Option<(String, String)> {
        let response = match self.client.get(url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(url, error = %e, "page fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(url, status = %response.status(), "page returned non-success status");
            return None;
        }

        let final_url = response.url().to_string();
        match response.text().await {
            Ok(body) => Some((final_url, body)),
            Err(e) => {
                tracing::debug!(url, error = %e, "page body read failed");
                None
            }
        }
    }
}

/// Runs both extraction passes over one page and merges into `emails`,
/// preserving discovery order.
fn harvest_page(html: &str, emails: &mut Vec<String>) {
    let text = html_to_text(html);
    for address in emails_from_text(&text) {
        if !emails.contains(&address) {
            emails.push(address);
        }
    }
    for address in emails_from_mailto(html) {
        if !emails.contains(&address) {
            emails.push(address);
        }
    }
}

/// Normalizes a website URL: trims, rejects empty input, and injects an
/// `https://` scheme when none is present. A URL that already carries a
/// scheme passes through unchanged — the scheme is never duplicated.
#[must_use]
pub fn normalize_url(website_url: &str) -> Option<String> {
    let trimmed = website_url.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Some(trimmed.to_owned())
    } else {
        Some(format!("https://{trimmed}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_injects_scheme_once() {
        assert_eq!(
            normalize_url("no-scheme-example.com"),
            Some("https://no-scheme-example.com".to_string())
        );
        assert_eq!(
            normalize_url("https://no-scheme-example.com"),
            Some("https://no-scheme-example.com".to_string())
        );
        assert_eq!(
            normalize_url("http://plain.example.com"),
            Some("http://plain.example.com".to_string())
        );
    }

    #[test]
    fn normalize_rejects_empty_input() {
        assert_eq!(normalize_url(""), None);
        assert_eq!(normalize_url("   "), None);
    }

    #[test]
    fn harvest_merges_text_and_mailto_without_duplicates() {
        let html = r#"<p>Mail info@example.com</p>
                      <a href="mailto:info@example.com">Email</a>
                      <a href="mailto:sales@example.com?subject=hi">Sales</a>"#;
        let mut emails = Vec::new();
        harvest_page(html, &mut emails);
        assert_eq!(emails, vec!["info@example.com", "sales@example.com"]);
    }
}
