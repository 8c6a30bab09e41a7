//! Environment-driven answering service selection.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use answer_api::{AnswerApiClient, AnswerApiConfig};
use async_trait::async_trait;
use chat_session::{Answer, AnswerService, DeliveryFailure};

use crate::service::HttpAnswerService;

pub const DEFAULT_PROVIDER_ID: &str = "http";
pub const PROVIDER_ENV_VAR: &str = "CHAT_CONSOLE_PROVIDER";
pub const BASE_URL_ENV_VAR: &str = "CHAT_CONSOLE_BASE_URL";
pub const TIMEOUT_ENV_VAR: &str = "CHAT_CONSOLE_TIMEOUT_SEC";

pub fn service_from_env() -> Result<Box<dyn AnswerService>, String> {
    let provider_id = std::env::var(PROVIDER_ENV_VAR)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());

    service_for_id(provider_id.as_deref().unwrap_or(DEFAULT_PROVIDER_ID))
}

pub fn service_for_id(provider_id: &str) -> Result<Box<dyn AnswerService>, String> {
    match provider_id {
        "http" => {
            let config = config_from_env()?;
            let client = AnswerApiClient::new(config).map_err(|error| error.to_string())?;
            Ok(Box::new(HttpAnswerService::new(client)))
        }
        "mock" => Ok(Box::new(MockAnswerService::default())),
        unknown => Err(format!(
            "Unsupported provider '{unknown}'. Available providers: http, mock"
        )),
    }
}

fn config_from_env() -> Result<AnswerApiConfig, String> {
    let mut config = AnswerApiConfig::default();

    if let Ok(base_url) = std::env::var(BASE_URL_ENV_VAR) {
        let base_url = base_url.trim();
        if !base_url.is_empty() {
            config = config.with_base_url(base_url);
        }
    }

    if let Ok(raw) = std::env::var(TIMEOUT_ENV_VAR) {
        config = config.with_timeout(parse_timeout(&raw)?);
    }

    Ok(config)
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let seconds: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("{TIMEOUT_ENV_VAR} must be a positive integer, got '{raw}'"))?;
    if seconds == 0 {
        return Err(format!("{TIMEOUT_ENV_VAR} must be > 0"));
    }
    Ok(Duration::from_secs(seconds))
}

/// Deterministic offline service cycling through canned replies.
#[derive(Debug, Default)]
pub struct MockAnswerService {
    next: AtomicUsize,
}

const MOCK_REPLIES: [&str; 4] = [
    "This is the mock answering service; no backend is configured.",
    "Your messages are echoed into a canned rotation of replies.",
    "Set CHAT_CONSOLE_PROVIDER=http to talk to a real backend.",
    "Still here. The transcript and session flow behave exactly as with http.",
];

#[async_trait]
impl AnswerService for MockAnswerService {
    async fn ask(&self, _message: &str, _session_id: &str) -> Result<Answer, DeliveryFailure> {
        let index = self.next.fetch_add(1, Ordering::Relaxed) % MOCK_REPLIES.len();
        Ok(Answer::new(MOCK_REPLIES[index]))
    }
}
