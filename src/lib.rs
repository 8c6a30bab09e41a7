//! Terminal front-end for the chat session core.
//!
//! ## Provider bootstrap
//!
//! `chat_console` selects its answering service via environment:
//!
//! - `CHAT_CONSOLE_PROVIDER=http` (default) for the HTTP transport
//! - `CHAT_CONSOLE_PROVIDER=mock` for deterministic offline replies
//!
//! HTTP transport configuration:
//!
//! - `CHAT_CONSOLE_BASE_URL` — answering service base URL
//!   (default `http://127.0.0.1:5000`; the `/chat` path is appended)
//! - `CHAT_CONSOLE_TIMEOUT_SEC` — request timeout, must be > 0 when set
//!
//! The session identifier persists under `.chat_console/` in the working
//! directory and survives restarts; delete the directory to start a fresh
//! conversation.

pub mod providers;
pub mod service;
