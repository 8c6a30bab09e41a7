//! Service-agnostic contract for resolving one conversational turn.

use std::fmt;

use async_trait::async_trait;

/// Successful reply from the answering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    /// Reply text appended to the transcript as a Bot turn.
    pub reply: String,
    /// Server-assigned session identifier superseding the client's, when present.
    pub session_id: Option<String>,
}

impl Answer {
    #[must_use]
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            session_id: None,
        }
    }

    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

/// The single externally visible failure kind for a send.
///
/// Covers network unreachability, non-success statuses, and malformed
/// payloads uniformly. The message is diagnostic only; the transcript always
/// receives the fixed error reply instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    message: String,
}

impl DeliveryFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DeliveryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DeliveryFailure {}

impl From<String> for DeliveryFailure {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for DeliveryFailure {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Remote answering service contract: exactly one call per accepted send.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn ask(&self, message: &str, session_id: &str) -> Result<Answer, DeliveryFailure>;
}

#[async_trait]
impl AnswerService for Box<dyn AnswerService> {
    async fn ask(&self, message: &str, session_id: &str) -> Result<Answer, DeliveryFailure> {
        self.as_ref().ask(message, session_id).await
    }
}
