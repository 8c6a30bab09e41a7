use serde::{Deserialize, Serialize};

/// Request payload for the `/chat` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub message: String,
    pub session_id: String,
}

impl AskRequest {
    #[must_use]
    pub fn new(message: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: session_id.into(),
        }
    }
}

/// Response payload from the `/chat` endpoint.
///
/// `response` is the reply text; `session_id`, when present, supersedes the
/// identifier the client sent. Both are optional at the serde layer so a
/// malformed body parses and is rejected by [`AskResponse::reply`] instead of
/// surfacing as a decode error with a different shape.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

impl AskResponse {
    /// Returns the reply text when the payload carries a non-empty one.
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        self.response
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}
