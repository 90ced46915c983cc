use thiserror::Error;

/// Errors returned by the places-search API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-OK `status` field in its JSON envelope.
    #[error("places API returned status {status} for {operation}")]
    ApiStatus { operation: String, status: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A search spec failed its constraints before any network call.
    #[error("invalid search spec: {0}")]
    InvalidSpec(String),

    /// The configured base URL is not parseable.
    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
