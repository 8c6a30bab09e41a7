use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use chat_session::{
    Answer, AnswerService, ChatSession, DeliveryFailure, Lifecycle, Speaker, Turn,
    DELIVERY_FAILURE_REPLY,
};
use futures_util::task::noop_waker_ref;
use session_identity::{KeyValueStorage, MemoryStorage, SessionIdentity, SESSION_ID_KEY};

/// Replays a scripted sequence of results and records every call it saw.
#[derive(Clone, Default)]
struct ScriptedService {
    results: Arc<Mutex<VecDeque<Result<Answer, DeliveryFailure>>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl ScriptedService {
    fn push(&self, result: Result<Answer, DeliveryFailure>) {
        self.results.lock().unwrap().push_back(result);
    }

    fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnswerService for ScriptedService {
    async fn ask(&self, message: &str, session_id: &str) -> Result<Answer, DeliveryFailure> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), session_id.to_string()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DeliveryFailure::new("script exhausted")))
    }
}

/// Never resolves; models a backend that hangs forever.
struct StalledService;

#[async_trait]
impl AnswerService for StalledService {
    async fn ask(&self, _message: &str, _session_id: &str) -> Result<Answer, DeliveryFailure> {
        std::future::pending::<()>().await;
        unreachable!("stalled service never resolves")
    }
}

fn session_with(
    service: impl AnswerService + 'static,
    storage: MemoryStorage,
) -> ChatSession<Box<dyn AnswerService>> {
    let identity = SessionIdentity::new(storage);
    ChatSession::new(Box::new(service) as Box<dyn AnswerService>, identity)
}

#[tokio::test]
async fn hello_scenario_appends_user_then_bot_turn() {
    let service = ScriptedService::default();
    service.push(Ok(Answer::new("Hi there")));
    let mut chat = session_with(service.clone(), MemoryStorage::new());

    chat.set_draft("Hello");
    chat.send().await;

    assert_eq!(
        chat.transcript(),
        [Turn::user("Hello"), Turn::bot("Hi there")]
    );
    assert_eq!(chat.lifecycle(), Lifecycle::Idle);

    let calls = service.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "Hello");
    assert!(calls[0].1.starts_with("user_"));
}

#[tokio::test]
async fn reply_text_lands_verbatim() {
    let service = ScriptedService::default();
    service.push(Ok(Answer::new("Paris")));
    let mut chat = session_with(service, MemoryStorage::new());

    chat.set_draft("What is the capital of France?");
    chat.send().await;

    assert_eq!(chat.transcript()[1], Turn::bot("Paris"));
}

#[tokio::test]
async fn failed_send_appends_fixed_error_reply_and_returns_idle() {
    let service = ScriptedService::default();
    service.push(Err(DeliveryFailure::new("connection refused")));
    let mut chat = session_with(service, MemoryStorage::new());

    chat.set_draft("Hello");
    chat.send().await;

    assert_eq!(
        chat.transcript(),
        [Turn::user("Hello"), Turn::bot(DELIVERY_FAILURE_REPLY)]
    );
    assert_eq!(chat.lifecycle(), Lifecycle::Idle);
}

#[tokio::test]
async fn transcript_grows_by_two_per_accepted_send() {
    let service = ScriptedService::default();
    service.push(Ok(Answer::new("one")));
    service.push(Err(DeliveryFailure::new("boom")));
    service.push(Ok(Answer::new("three")));
    let mut chat = session_with(service, MemoryStorage::new());

    for (index, prompt) in ["first", "second", "third"].iter().enumerate() {
        chat.set_draft(*prompt);
        chat.send().await;
        assert_eq!(chat.transcript().len(), 2 * (index + 1));
        assert_eq!(chat.lifecycle(), Lifecycle::Idle);
    }

    // Earlier turns are never rewritten by later sends.
    assert_eq!(chat.transcript()[0], Turn::user("first"));
    assert_eq!(chat.transcript()[1], Turn::bot("one"));
    assert_eq!(chat.transcript()[3], Turn::bot(DELIVERY_FAILURE_REPLY));

    let speakers: Vec<Speaker> = chat
        .transcript()
        .iter()
        .map(|turn| turn.speaker)
        .collect();
    assert_eq!(
        speakers,
        [
            Speaker::User,
            Speaker::Bot,
            Speaker::User,
            Speaker::Bot,
            Speaker::User,
            Speaker::Bot,
        ]
    );
}

#[tokio::test]
async fn server_assigned_session_id_supersedes_stored_identifier() {
    let storage = MemoryStorage::new();
    let service = ScriptedService::default();
    service.push(Ok(Answer::new("Hi there").with_session_id("srv-42")));
    service.push(Ok(Answer::new("Still here")));
    let mut chat = session_with(service.clone(), storage.clone());

    chat.set_draft("Hello");
    chat.send().await;

    assert_eq!(
        storage.get(SESSION_ID_KEY).unwrap(),
        Some("srv-42".to_string())
    );

    chat.set_draft("Again");
    chat.send().await;

    let calls = service.calls();
    assert!(calls[0].1.starts_with("user_"));
    assert_eq!(calls[1].1, "srv-42");
}

#[tokio::test]
async fn send_while_pending_is_rejected_without_mutation() {
    let mut chat = session_with(StalledService, MemoryStorage::new());

    chat.set_draft("Hello");
    {
        let mut in_flight = Box::pin(chat.send());
        let mut cx = Context::from_waker(noop_waker_ref());
        assert!(matches!(in_flight.as_mut().poll(&mut cx), Poll::Pending));
        // Dropping the in-flight send models a call that never resolves:
        // the session stays Pending.
    }

    assert_eq!(chat.lifecycle(), Lifecycle::Pending);
    assert_eq!(chat.transcript(), [Turn::user("Hello")]);

    chat.set_draft("Another message");
    chat.send().await;

    assert_eq!(chat.lifecycle(), Lifecycle::Pending);
    assert_eq!(chat.transcript(), [Turn::user("Hello")]);
    assert_eq!(chat.draft(), "Another message");
}

#[tokio::test]
async fn user_turn_is_visible_before_the_call_resolves() {
    let mut chat = session_with(StalledService, MemoryStorage::new());

    chat.set_draft("Hello");
    let mut in_flight = Box::pin(chat.send());
    let mut cx = Context::from_waker(noop_waker_ref());
    assert!(matches!(in_flight.as_mut().poll(&mut cx), Poll::Pending));
    drop(in_flight);

    // Optimistic echo: the User turn landed before any response arrived.
    assert_eq!(chat.transcript(), [Turn::user("Hello")]);
    assert!(chat.is_pending());
}
