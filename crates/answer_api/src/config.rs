use std::time::Duration;

use crate::url::DEFAULT_ANSWER_BASE_URL;

/// Transport configuration for answering service requests.
#[derive(Debug, Clone)]
pub struct AnswerApiConfig {
    /// Base URL for the answering service.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for AnswerApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ANSWER_BASE_URL.to_string(),
            user_agent: None,
            timeout: None,
        }
    }
}

impl AnswerApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
