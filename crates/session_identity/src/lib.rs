//! Session identity persistence for the chat client.
//!
//! Owns the single per-profile session identifier that correlates a client's
//! messages across requests on the backend. Storage is an injected capability
//! ([`KeyValueStorage`]) so hosts can swap the file-backed slot for an
//! in-memory one. When storage is unreadable or unwritable the manager
//! degrades to a fixed in-memory identifier instead of failing; the
//! degradation is logged once.

mod error;
mod identity;
mod storage;

pub use error::StorageError;
pub use identity::{SessionIdentity, DEFAULT_SESSION_ID, SESSION_ID_KEY};
pub use storage::{state_root, FileStorage, KeyValueStorage, MemoryStorage};
