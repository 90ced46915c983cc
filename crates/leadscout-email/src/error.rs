use thiserror::Error;

/// Errors surfaced by the email discoverer.
///
/// Page fetch failures during discovery are deliberately NOT represented
/// here: an unreachable page yields zero emails for that page, never an
/// error to the caller.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The underlying `reqwest::Client` could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
