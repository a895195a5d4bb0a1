//! Client error types

use std::collections::BTreeMap;
use std::fmt::Write as _;
use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug, Clone)]
pub enum ClientError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("HTTP error {0}: {1}")]
    HttpError(u16, String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unrecognized response shape: {0}")]
    ResponseShape(#[from] opthouse_core::ShapeError),

    /// The server answered but reported errors in the envelope
    #[error("{action} rejected: {}", format_errors(.errors))]
    Api {
        action: String,
        errors: BTreeMap<String, String>,
    },

    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Fixed point error: {0}")]
    FixedPointError(String),
}

fn format_errors(errors: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (i, (code, message)) in errors.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "{code}: {message}");
    }
    out
}

impl From<opthouse_core::FixedError> for ClientError {
    fn from(err: opthouse_core::FixedError) -> Self {
        Self::FixedPointError(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
