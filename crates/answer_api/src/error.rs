use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;

#[derive(Debug)]
pub enum AnswerApiError {
    InvalidBaseUrl(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    MalformedResponse(String),
}

impl fmt::Display for AnswerApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::MalformedResponse(message) => write!(f, "malformed response: {message}"),
        }
    }
}

impl std::error::Error for AnswerApiError {}

impl From<reqwest::Error> for AnswerApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

/// Error body shape used by the answering service: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub error: Option<String>,
}

/// Extracts a human-readable message from an error response body, falling
/// back to the raw body or the canonical status reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(ErrorPayload {
        error: Some(message),
    }) = serde_json::from_str::<ErrorPayload>(body)
    {
        let message = message.trim();
        if !message.is_empty() {
            return message.to_string();
        }
    }

    let body = body.trim();
    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
