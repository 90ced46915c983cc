//! Low-confidence fallback: construct a common mailbox address from a known
//! domain when no address could be scraped. Callers must label the result as
//! guessed, never as an observed fact.

use crate::validate::is_valid_email;

const COMMON_MAILBOXES: [&str; 4] = ["info", "contact", "hello", "admin"];

/// Offers at most one guessed address of the form `info@<domain>` (or the
/// next common mailbox that validates). Returns `None` when the domain is
/// empty or no construction passes validation.
#[must_use]
pub fn guess_fallback_email(domain: &str) -> Option<String> {
    let domain = domain.trim().trim_start_matches("www.");
    if domain.is_empty() || !domain.contains('.') {
        return None;
    }

    COMMON_MAILBOXES
        .iter()
        .map(|mailbox| format!("{mailbox}@{domain}").to_lowercase())
        .find(|candidate| is_valid_email(candidate))
}

/// Extracts the host from a website URL for guessing, tolerating scheme-less
/// input. Returns `None` when nothing host-like can be found.
#[must_use]
pub fn domain_of(website_url: &str) -> Option<String> {
    let trimmed = website_url.trim();
    if trimmed.is_empty() {
        return None;
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    reqwest::Url::parse(&with_scheme)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_info_mailbox_first() {
        assert_eq!(
            guess_fallback_email("example.com"),
            Some("info@example.com".to_string())
        );
    }

    #[test]
    fn strips_www_prefix() {
        assert_eq!(
            guess_fallback_email("www.example.com"),
            Some("info@example.com".to_string())
        );
    }

    #[test]
    fn rejects_empty_or_tld_less_domains() {
        assert_eq!(guess_fallback_email(""), None);
        assert_eq!(guess_fallback_email("localhost"), None);
    }

    #[test]
    fn domain_of_handles_scheme_less_urls() {
        assert_eq!(
            domain_of("example.com/contact"),
            Some("example.com".to_string())
        );
        assert_eq!(
            domain_of("https://www.example.com/"),
            Some("www.example.com".to_string())
        );
        assert_eq!(domain_of(""), None);
    }
}
