use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum CrackyApiError {
    InvalidHeader(String),
    Request(reqwest::Error),
    Unauthorized(String),
    Status(StatusCode, String),
    Serde(JsonError),
}

impl CrackyApiError {
    /// Returns true for the authentication-rejection failure class, which
    /// selects a different user-facing fallback than every other failure.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: Option<String>,
    pub detail: Option<String>,
}

impl ErrorBody {
    fn message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .and_then(non_empty_string)
            .or_else(|| self.detail.as_deref().and_then(non_empty_string))
    }
}

impl fmt::Display for CrackyApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHeader(value) => write!(f, "invalid header: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Unauthorized(message) => write!(f, "authentication rejected: {message}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::Serde(error) => write!(f, "serialization error: {error}"),
        }
    }
}

impl std::error::Error for CrackyApiError {}

impl From<reqwest::Error> for CrackyApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for CrackyApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

/// Extracts a human-readable message from a failure response body.
///
/// JSON bodies carrying `error` or `detail` win; otherwise the raw body is
/// used, falling back to the canonical status reason when the body is empty.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message() {
            return message.to_string();
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}

fn non_empty_string(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
