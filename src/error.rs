//! Error types for request building and dispatch.
//!
//! [`HttpRequestError`] is the failure raised when an HTTP exchange does not
//! succeed. [`RestError`] is the crate-wide error returned by the builder
//! pipeline, the transport and the configuration layer.

use crate::request::AttributeKind;
use std::error::Error as StdError;
use std::fmt;

/// Boxed error used as the inner cause of an [`HttpRequestError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Generic HTTP request failure.
///
/// Carries an optional human-readable message and an optional inner cause.
#[derive(Debug, Default)]
pub struct HttpRequestError {
    message: Option<String>,
    source: Option<BoxError>,
}

impl HttpRequestError {
    /// Creates an error with neither a message nor a cause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error with the given message.
    ///
    /// # Arguments
    ///
    /// * `message` - Human-readable description of the failure
    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            source: None,
        }
    }

    /// Creates an error with a message and the error that caused it.
    ///
    /// # Arguments
    ///
    /// * `message` - Human-readable description of the failure
    /// * `source` - The underlying error
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: Some(message.into()),
            source: Some(source.into()),
        }
    }

    /// Returns the message, if one was supplied.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the inner cause, if one was supplied.
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

impl fmt::Display for HttpRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}", message),
            None => write!(f, "HTTP request failed"),
        }
    }
}

impl StdError for HttpRequestError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

/// Errors produced while building, sending or decoding a request.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// No registered builder accepts an attribute of this kind.
    #[error("No request builder registered for attribute '{0}'")]
    NoBuilder(AttributeKind),

    /// A builder could not apply its attribute to the message.
    #[error("Request build error: {0}")]
    Build(String),

    /// A request referenced a header model that is not registered.
    #[error("Unknown header model: {0}")]
    UnknownHeaderModel(String),

    /// The URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The request did not complete within the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Connection or transfer failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Encoding a request body or decoding a response body failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Options or settings are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The HTTP exchange itself failed.
    #[error(transparent)]
    Request(#[from] HttpRequestError),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RestError::Timeout
        } else if err.is_builder() {
            RestError::Build(err.to_string())
        } else if err.is_connect() {
            RestError::Network(format!("Connection failed: {}", err))
        } else {
            RestError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for RestError {
    fn from(err: url::ParseError) -> Self {
        RestError::InvalidUrl(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = RestError> = std::result::Result<T, E>;
