//! Error types for the RetailCRM client.
//!
//! # Design
//! A response with status >= 400 is not an error here: it comes back as a
//! normal [`Response`](crate::Response) whose `is_successful()` is false.
//! The variants below cover what goes wrong before a response exists or
//! while reading one.

use thiserror::Error;

/// Result type alias for the client.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Boxed error produced by a [`Transport`](crate::Transport).
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum ApiError {
    /// DNS, connect, TLS, timeout or body read failure.
    #[error("transport failure: {0}")]
    Transport(#[source] TransportError),

    /// The CRM answered with a non-empty body that is not JSON.
    #[error("malformed response body (HTTP {status}): {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid status code: {0:?}")]
    InvalidStatus(String),

    /// A record could not be encoded into its JSON form field.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("record has no usable `{field}` identifier")]
    MissingIdentifier { field: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ureq::Error> for ApiError {
    fn from(err: ureq::Error) -> Self {
        ApiError::Transport(Box::new(err))
    }
}
