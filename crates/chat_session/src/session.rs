use session_identity::SessionIdentity;

use crate::service::AnswerService;
use crate::transcript::Turn;

/// Fixed transcript reply appended when a send fails to produce a response.
pub const DELIVERY_FAILURE_REPLY: &str = "Error: could not get a response.";

/// Single-flight request lifecycle. Exactly one request may be Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Idle,
    Pending,
}

type ChangeListener = Box<dyn FnMut() + Send>;

/// The chat session controller.
///
/// Owns the ordered transcript of exchanged turns and the single-flight send
/// lifecycle. Driven by one logical actor: `send` is the only suspension
/// point, and the lifecycle flag checked at its entry is the sole concurrency
/// guard. There is no cancellation, retry, or timeout; a call that never
/// resolves leaves the session Pending.
pub struct ChatSession<S> {
    transcript: Vec<Turn>,
    lifecycle: Lifecycle,
    draft: String,
    identity: SessionIdentity,
    service: S,
    listeners: Vec<ChangeListener>,
}

impl<S: AnswerService> ChatSession<S> {
    #[must_use]
    pub fn new(service: S, identity: SessionIdentity) -> Self {
        Self {
            transcript: Vec::new(),
            lifecycle: Lifecycle::Idle,
            draft: String::new(),
            identity,
            service,
            listeners: Vec::new(),
        }
    }

    /// Read-only transcript snapshot, oldest turn first.
    #[must_use]
    pub fn transcript(&self) -> &[Turn] {
        &self.transcript
    }

    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// True while a send is outstanding; drives input gating and the
    /// typing indicator.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.lifecycle == Lifecycle::Pending
    }

    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Replaces the pending input text. Always succeeds; not observable
    /// through change notifications.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    /// Registers a callback invoked after transcript or lifecycle changes.
    pub fn subscribe(&mut self, listener: impl FnMut() + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Submits the current draft as one conversational turn.
    ///
    /// A no-op when the trimmed draft is empty or a send is already
    /// outstanding; a rejected call mutates nothing, including the draft.
    /// An accepted call appends the User turn before the remote call
    /// resolves, then appends exactly one Bot turn — the reply on success,
    /// [`DELIVERY_FAILURE_REPLY`] otherwise — and always returns to Idle.
    pub async fn send(&mut self) {
        if self.lifecycle == Lifecycle::Pending {
            return;
        }

        let message = self.draft.trim().to_string();
        if message.is_empty() {
            return;
        }

        self.transcript.push(Turn::user(message.clone()));
        self.draft.clear();
        self.lifecycle = Lifecycle::Pending;
        self.notify();

        let session_id = self.identity.get_or_create();
        tracing::debug!(session_id = %session_id, "dispatching user turn");

        match self.service.ask(&message, &session_id).await {
            Ok(answer) => {
                if let Some(new_id) = answer.session_id.as_deref() {
                    self.identity.update(new_id);
                }
                self.transcript.push(Turn::bot(answer.reply));
            }
            Err(failure) => {
                tracing::debug!(error = %failure, "send failed; appending fixed error turn");
                self.transcript.push(Turn::bot(DELIVERY_FAILURE_REPLY));
            }
        }

        self.lifecycle = Lifecycle::Idle;
        self.notify();
    }

    fn notify(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use session_identity::MemoryStorage;

    use super::*;
    use crate::service::{Answer, DeliveryFailure};

    struct EchoService;

    #[async_trait]
    impl AnswerService for EchoService {
        async fn ask(&self, message: &str, _session_id: &str) -> Result<Answer, DeliveryFailure> {
            Ok(Answer::new(format!("echo: {message}")))
        }
    }

    fn session(service: impl AnswerService + 'static) -> ChatSession<Box<dyn AnswerService>> {
        let identity = SessionIdentity::new(MemoryStorage::new());
        ChatSession::new(Box::new(service) as Box<dyn AnswerService>, identity)
    }

    #[tokio::test]
    async fn empty_draft_send_is_a_noop() {
        let mut chat = session(EchoService);

        chat.send().await;
        chat.set_draft("   ");
        chat.send().await;

        assert!(chat.transcript().is_empty());
        assert_eq!(chat.lifecycle(), Lifecycle::Idle);
        assert_eq!(chat.draft(), "   ");
    }

    #[tokio::test]
    async fn accepted_send_clears_draft_and_trims_message() {
        let mut chat = session(EchoService);

        chat.set_draft("  Hello  ");
        chat.send().await;

        assert_eq!(chat.draft(), "");
        assert_eq!(chat.transcript()[0], Turn::user("Hello"));
        assert_eq!(chat.transcript()[1], Turn::bot("echo: Hello"));
    }

    #[tokio::test]
    async fn listeners_observe_accepted_sends_only() {
        let mut chat = session(EchoService);
        let changes = Arc::new(AtomicUsize::new(0));
        let observed = Arc::clone(&changes);
        chat.subscribe(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        });

        chat.send().await;
        assert_eq!(changes.load(Ordering::SeqCst), 0);

        chat.set_draft("Hello");
        chat.send().await;

        // Once for the optimistic User turn + Pending, once for resolution.
        assert_eq!(changes.load(Ordering::SeqCst), 2);
    }
}
