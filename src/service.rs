//! HTTP-backed implementation of the shared `chat_session` service contract.

use answer_api::{AnswerApiClient, AskRequest};
use async_trait::async_trait;
use chat_session::{Answer, AnswerService, DeliveryFailure};

/// `AnswerService` adapter backed by `answer_api` transport primitives.
///
/// Every transport failure maps uniformly into [`DeliveryFailure`]; the
/// controller does not distinguish error subtypes.
pub struct HttpAnswerService {
    client: AnswerApiClient,
}

impl HttpAnswerService {
    #[must_use]
    pub fn new(client: AnswerApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub fn client(&self) -> &AnswerApiClient {
        &self.client
    }
}

#[async_trait]
impl AnswerService for HttpAnswerService {
    async fn ask(&self, message: &str, session_id: &str) -> Result<Answer, DeliveryFailure> {
        let request = AskRequest::new(message, session_id);
        let response = self
            .client
            .ask(&request)
            .await
            .map_err(|error| DeliveryFailure::new(error.to_string()))?;

        let reply = response
            .reply()
            .map(str::to_string)
            .ok_or_else(|| DeliveryFailure::new("payload is missing a reply"))?;

        Ok(Answer {
            reply,
            session_id: response.session_id,
        })
    }
}
