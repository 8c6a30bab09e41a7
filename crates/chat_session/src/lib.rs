//! Chat session core: the transcript-owning state machine and its
//! single-flight send lifecycle.
//!
//! [`ChatSession`] owns the append-only transcript, the ephemeral draft, and
//! the Idle/Pending request lifecycle. The remote answering service is an
//! injected [`AnswerService`]; rendering is decoupled through change
//! subscriptions. One `send` produces exactly one User turn and one Bot turn,
//! whether the remote call succeeds or fails.

pub mod service;
pub mod session;
pub mod transcript;

pub use service::{Answer, AnswerService, DeliveryFailure};
pub use session::{ChatSession, Lifecycle, DELIVERY_FAILURE_REPLY};
pub use transcript::{Speaker, Turn};
