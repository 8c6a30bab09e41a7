//! Transport-only HTTP client primitives for the answering service.
//!
//! This crate owns request building, response parsing, and the transport
//! error taxonomy for the `/chat` endpoint only. It carries no session or
//! transcript state and no retry policy; callers treat every failure
//! uniformly.

pub mod client;
pub mod config;
pub mod error;
pub mod payload;
pub mod url;

pub use client::AnswerApiClient;
pub use config::AnswerApiConfig;
pub use error::AnswerApiError;
pub use payload::{AskRequest, AskResponse};
pub use url::normalize_chat_url;
