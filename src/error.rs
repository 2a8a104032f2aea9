//! Error types for the Zammad CLI.
//!
//! This module defines `ZammadError`, the unified error type used throughout
//! the crate. The HTTP client and resource operations never catch or
//! reinterpret these errors; they reach the command layer unchanged.
//!
//! # Security
//!
//! Error details are sanitized so the access token never appears in logs or
//! terminal output. Use `sanitize_message()` when building a message from
//! external text.

use thiserror::Error;

/// Unified error type for all Zammad CLI operations.
#[derive(Error, Debug)]
pub enum ZammadError {
    /// The Zammad API answered with a non-success status code.
    #[error("Zammad API error {status} on {path}: {detail}")]
    Api {
        /// The HTTP status code returned.
        status: u16,
        /// Best-effort human readable detail extracted from the response body.
        detail: String,
        /// The request path (including query string) that failed.
        path: String,
    },

    /// Configuration error - missing or invalid connection settings.
    #[error("{0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Reading or writing the stored credentials failed.
    #[error("credential storage error: {0}")]
    Storage(String),

    /// Terminal I/O failed while prompting.
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),
}

/// Classification of an API error by status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 401: invalid or expired credentials.
    Unauthorized,
    /// 403: the token lacks the required scope.
    Forbidden,
    /// 404: the resource does not exist.
    NotFound,
    /// Any other non-success status.
    Other,
}

impl ApiErrorKind {
    /// Classifies an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            _ => ApiErrorKind::Other,
        }
    }
}

/// Coarse failure kind callers react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A non-success HTTP response.
    Api(ApiErrorKind),
    /// Connection settings are missing or invalid.
    Config,
    /// Anything else: network, parse, storage or programming errors.
    Unexpected,
}

impl ZammadError {
    /// Creates an API error from a status, detail and request path.
    pub fn api(status: u16, detail: impl Into<String>, path: impl Into<String>) -> Self {
        ZammadError::Api {
            status,
            detail: detail.into(),
            path: path.into(),
        }
    }

    /// Creates the error returned when no credentials can be resolved.
    pub fn not_configured() -> Self {
        ZammadError::Config(
            "Not configured. Run `zammad auth login` or set ZAMMAD_URL and ZAMMAD_TOKEN."
                .to_string(),
        )
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        ZammadError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ZammadError::Validation(message.into())
    }

    /// Creates a credential storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        ZammadError::Storage(message.into())
    }

    /// Returns the coarse kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ZammadError::Api { status, .. } => ErrorKind::Api(ApiErrorKind::from_status(*status)),
            ZammadError::Config(_) => ErrorKind::Config,
            _ => ErrorKind::Unexpected,
        }
    }

    /// Returns the API error classification, if this is an API error.
    #[must_use]
    pub fn api_kind(&self) -> Option<ApiErrorKind> {
        match self.kind() {
            ErrorKind::Api(kind) => Some(kind),
            _ => None,
        }
    }

    /// Returns the HTTP status code, if this is an API error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            ZammadError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Sanitizes a message to remove any occurrence of the access token.
    ///
    /// Returns the message with every occurrence of `token` replaced with
    /// `[REDACTED]`. An empty token leaves the message untouched.
    #[must_use]
    pub fn sanitize_message(message: &str, token: &str) -> String {
        if token.is_empty() {
            return message.to_string();
        }
        message.replace(token, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, token: &str) -> String {
        Self::sanitize_message(&self.to_string(), token)
    }
}
