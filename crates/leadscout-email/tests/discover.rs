//! Integration tests for `EmailScout` against wiremock-served pages.

use leadscout_email::EmailScout;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scout() -> EmailScout {
    EmailScout::new(10, "leadscout-test/0.1", 0).expect("scout construction should not fail")
}

fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_string(format!("<html><body>{body}</body></html>"))
}

#[tokio::test]
async fn discovers_emails_from_homepage_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "Contact us at INFO@Example.COM or visit info@example.com",
        ))
        .mount(&server)
        .await;

    let emails = scout().discover(&server.uri(), 3).await;
    assert_eq!(emails, vec!["info@example.com"]);
}

#[tokio::test]
async fn discovers_mailto_address_with_query_stripped() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="mailto:sales@example.com?subject=hi">Email</a>"#,
        ))
        .mount(&server)
        .await;

    let emails = scout().discover(&server.uri(), 3).await;
    assert_eq!(emails, vec!["sales@example.com"]);
}

#[tokio::test]
async fn follows_contact_page_and_merges_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"Welcome. <a href="/contact">Contact us</a> hello@example.com"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html_page("Our sales team: sales@example.com"))
        .mount(&server)
        .await;

    let emails = scout().discover(&server.uri(), 3).await;
    assert_eq!(emails, vec!["hello@example.com", "sales@example.com"]);
}

#[tokio::test]
async fn respects_max_pages_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/contact">Contact</a> <a href="/about">About</a>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(html_page("first@example.com"))
        .mount(&server)
        .await;

    // max_pages = 2 means homepage plus one secondary page; /about must not
    // be visited.
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("second@example.com"))
        .expect(0)
        .mount(&server)
        .await;

    let emails = scout().discover(&server.uri(), 2).await;
    assert_eq!(emails, vec!["first@example.com"]);
}

#[tokio::test]
async fn failed_secondary_page_is_skipped_silently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            r#"<a href="/contact">Contact</a> <a href="/about">About</a> top@example.com"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/contact"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("about@example.com"))
        .mount(&server)
        .await;

    let emails = scout().discover(&server.uri(), 3).await;
    assert_eq!(emails, vec!["top@example.com", "about@example.com"]);
}

#[tokio::test]
async fn unreachable_site_yields_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let emails = scout().discover(&server.uri(), 3).await;
    assert!(emails.is_empty());
}

#[tokio::test]
async fn empty_url_yields_empty_result() {
    let emails = scout().discover("", 3).await;
    assert!(emails.is_empty());
}

#[tokio::test]
async fn identical_pages_give_identical_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(
            "a@example.com b@example.com <a href='mailto:c@example.com'>c</a>",
        ))
        .mount(&server)
        .await;

    let scout = scout();
    let first = scout.discover(&server.uri(), 1).await;
    let second = scout.discover(&server.uri(), 1).await;
    assert_eq!(first, second);
    assert_eq!(
        first,
        vec!["a@example.com", "b@example.com", "c@example.com"]
    );
}
