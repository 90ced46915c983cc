//! Pattern extraction over fetched page content.
//!
//! Two regex passes run over the page text: a strict address pattern and a
//! lenient one that tolerates stray whitespace around `@` and `.` to catch
//! obfuscated listings ("info @ example . com"). `mailto:` anchors are
//! scanned separately from the raw HTML since their addresses never appear
//! in the visible text.

use regex::Regex;

use crate::validate::is_valid_email;

const STRICT_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b";
const LENIENT_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+\s*@\s*[A-Za-z0-9.-]+\s*\.\s*[A-Za-z]{2,}\b";

/// Link words marking a candidate secondary page worth visiting.
const SECONDARY_PAGE_HINTS: [&str; 3] = ["contact", "about", "info"];

/// Reduces an HTML document to its visible text.
///
/// Script and style blocks are dropped wholesale, remaining tags are replaced
/// with spaces so adjacent text runs do not fuse into false candidates.
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let script_re =
        Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>").expect("valid block regex");
    let tag_re = Regex::new(r"(?s)<[^>]*>").expect("valid tag regex");

    let without_blocks = script_re.replace_all(html, " ");
    tag_re.replace_all(&without_blocks, " ").into_owned()
}

/// Extracts validated, lowercased email candidates from page text, in
/// discovery order with duplicates removed.
#[must_use]
pub fn emails_from_text(text: &str) -> Vec<String> {
    let strict = Regex::new(STRICT_PATTERN).expect("valid strict email regex");
    let lenient = Regex::new(LENIENT_PATTERN).expect("valid lenient email regex");

    let mut found = Vec::new();
    for re in [&strict, &lenient] {
        for m in re.find_iter(text) {
            // The lenient pass matches with embedded whitespace; strip it
            // before validation so both passes normalise identically.
            let candidate: String = m.as_str().chars().filter(|c| !c.is_whitespace()).collect();
            push_candidate(&mut found, &candidate);
        }
    }
    found
}

/// Extracts addresses from `mailto:` anchors, dropping any `?subject=...`
/// query suffix before validation.
#[must_use]
pub fn emails_from_mailto(html: &str) -> Vec<String> {
    let re = Regex::new(r#"(?i)href\s*=\s*["']mailto:([^"']+)["']"#).expect("valid mailto regex");

    let mut found = Vec::new();
    for cap in re.captures_iter(html) {
        if let Some(m) = cap.get(1) {
            let address = m.as_str().split('?').next().unwrap_or("").trim();
            push_candidate(&mut found, address);
        }
    }
    found
}

/// Finds candidate secondary pages: anchors whose href or visible text
/// contains a hint word, resolved to absolute URLs against `base`.
#[must_use]
pub fn secondary_page_urls(html: &str, base: &str) -> Vec<String> {
    let anchor_re = Regex::new(r#"(?is)<a\b[^>]*href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#)
        .expect("valid anchor regex");

    let Ok(base_url) = reqwest::Url::parse(base) else {
        return Vec::new();
    };

    let mut urls = Vec::new();
    for cap in anchor_re.captures_iter(html) {
        let href = cap.get(1).map_or("", |m| m.as_str()).trim();
        let text = cap.get(2).map_or("", |m| m.as_str());

        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("javascript:")
        {
            continue;
        }

        let href_lower = href.to_lowercase();
        let text_lower = text.to_lowercase();
        let is_hinted = SECONDARY_PAGE_HINTS
            .iter()
            .any(|hint| href_lower.contains(hint) || text_lower.contains(hint));
        if !is_hinted {
            continue;
        }

        if let Ok(resolved) = base_url.join(href) {
            let resolved = resolved.to_string();
            if resolved != base_url.as_str() && !urls.contains(&resolved) {
                urls.push(resolved);
            }
        }
    }
    urls
}

/// Validates, lowercases, and appends a candidate, preserving first-seen order.
fn push_candidate(found: &mut Vec<String>, candidate: &str) {
    if !is_valid_email(candidate) {
        return;
    }
    let lowered = candidate.to_lowercase();
    if !found.contains(&lowered) {
        found.push(lowered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_to_text_drops_scripts_and_tags() {
        let html = "<html><script>var a = 'x@y.com';</script>\
                    <body><p>Reach us at info@example.com</p></body></html>";
        let text = html_to_text(html);
        assert!(text.contains("info@example.com"));
        assert!(!text.contains("x@y.com"));
    }

    #[test]
    fn strict_pass_finds_plain_addresses() {
        let emails = emails_from_text("Write to jane.doe@example.co.uk for details.");
        assert_eq!(emails, vec!["jane.doe@example.co.uk"]);
    }

    #[test]
    fn lenient_pass_catches_obfuscated_addresses() {
        let emails = emails_from_text("Contact: sales @ example . com");
        assert_eq!(emails, vec!["sales@example.com"]);
    }

    #[test]
    fn case_folding_collapses_duplicates() {
        let emails = emails_from_text(
            "Contact us at INFO@Example.COM or visit info@example.com for more.",
        );
        assert_eq!(emails, vec!["info@example.com"]);
    }

    #[test]
    fn invalid_candidates_are_dropped() {
        let emails = emails_from_text("bad: .a@b.com and a@b..com are listed");
        assert!(emails.is_empty());
    }

    #[test]
    fn mailto_query_suffix_is_stripped() {
        let html = r#"<a href="mailto:sales@example.com?subject=hi">Email</a>"#;
        assert_eq!(emails_from_mailto(html), vec!["sales@example.com"]);
    }

    #[test]
    fn mailto_addresses_are_lowercased() {
        let html = r#"<a href="mailto:Sales@Example.COM">Email</a>"#;
        assert_eq!(emails_from_mailto(html), vec!["sales@example.com"]);
    }

    #[test]
    fn secondary_urls_match_href_or_visible_text() {
        let html = r#"
            <a href="/contact-us">Get in touch</a>
            <a href="/team">About our people</a>
            <a href="/products">Products</a>
        "#;
        let urls = secondary_page_urls(html, "https://example.com/");
        assert_eq!(
            urls,
            vec![
                "https://example.com/contact-us".to_string(),
                "https://example.com/team".to_string(),
            ]
        );
    }

    #[test]
    fn secondary_urls_skip_mailto_fragment_and_javascript() {
        let html = r##"
            <a href="mailto:info@example.com">Contact</a>
            <a href="#contact">Contact anchor</a>
            <a href="javascript:void(0)">Contact popup</a>
        "##;
        assert!(secondary_page_urls(html, "https://example.com/").is_empty());
    }

    #[test]
    fn secondary_urls_resolve_relative_to_base_page() {
        let html = r#"<a href="contact.html">Contact</a>"#;
        let urls = secondary_page_urls(html, "https://example.com/shop/index.html");
        assert_eq!(urls, vec!["https://example.com/shop/contact.html"]);
    }

    #[test]
    fn secondary_urls_deduplicate() {
        let html = r#"
            <a href="/contact">Contact</a>
            <a href="/contact">Contact us</a>
        "#;
        let urls = secondary_page_urls(html, "https://example.com/");
        assert_eq!(urls.len(), 1);
    }
}
