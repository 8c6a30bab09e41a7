use reqwest::{Client, Url};

use crate::config::AnswerApiConfig;
use crate::error::{parse_error_message, AnswerApiError};
use crate::payload::{AskRequest, AskResponse};
use crate::url::normalize_chat_url;

#[derive(Debug)]
pub struct AnswerApiClient {
    http: Client,
    endpoint: Url,
    config: AnswerApiConfig,
}

impl AnswerApiClient {
    pub fn new(config: AnswerApiConfig) -> Result<Self, AnswerApiError> {
        let endpoint = Url::parse(&normalize_chat_url(&config.base_url))
            .map_err(|_| AnswerApiError::InvalidBaseUrl(config.base_url.clone()))?;

        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(AnswerApiError::from)?;

        Ok(Self {
            http,
            endpoint,
            config,
        })
    }

    pub fn config(&self) -> &AnswerApiConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Sends one chat request and returns the parsed response.
    ///
    /// Non-success statuses and payloads without a non-empty `response`
    /// field are errors; the caller does not distinguish further.
    pub async fn ask(&self, request: &AskRequest) -> Result<AskResponse, AnswerApiError> {
        tracing::debug!(endpoint = %self.endpoint, "dispatching chat request");

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(AnswerApiError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnswerApiError::Status(
                status,
                parse_error_message(status, &body),
            ));
        }

        let payload = response
            .json::<AskResponse>()
            .await
            .map_err(AnswerApiError::from)?;

        if payload.reply().is_none() {
            return Err(AnswerApiError::MalformedResponse(
                "payload is missing a non-empty 'response' field".to_string(),
            ));
        }

        Ok(payload)
    }
}
