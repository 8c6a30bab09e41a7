use time::OffsetDateTime;

use crate::error::StorageError;
use crate::storage::KeyValueStorage;

/// Storage key holding the session identifier.
pub const SESSION_ID_KEY: &str = "session_id";

/// Fallback identifier used for the process lifetime when storage is
/// unavailable. Matches the backend's own default session.
pub const DEFAULT_SESSION_ID: &str = "user1";

/// Manages the per-profile session identifier.
///
/// The identifier is created once, persisted through the injected storage
/// capability, and overwritten whenever the backend supplies a replacement.
/// Storage failures flip the manager into degraded mode: the identifier
/// stays coherent in memory and persistence is skipped from then on.
pub struct SessionIdentity {
    storage: Box<dyn KeyValueStorage>,
    cached: Option<String>,
    degraded: bool,
}

impl SessionIdentity {
    #[must_use]
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            cached: None,
            degraded: false,
        }
    }

    /// Returns the current session identifier, generating and persisting one
    /// on first use. Never fails; storage trouble degrades to
    /// [`DEFAULT_SESSION_ID`].
    pub fn get_or_create(&mut self) -> String {
        if let Some(id) = &self.cached {
            return id.clone();
        }

        if self.degraded {
            self.cached = Some(DEFAULT_SESSION_ID.to_string());
            return DEFAULT_SESSION_ID.to_string();
        }

        match self.storage.get(SESSION_ID_KEY) {
            Ok(Some(stored)) if !stored.trim().is_empty() => {
                let id = stored.trim().to_string();
                self.cached = Some(id.clone());
                id
            }
            Ok(_) => {
                let id = generate_session_id();
                if let Err(error) = self.storage.set(SESSION_ID_KEY, &id) {
                    self.degrade(&error);
                    self.cached = Some(DEFAULT_SESSION_ID.to_string());
                    return DEFAULT_SESSION_ID.to_string();
                }
                self.cached = Some(id.clone());
                id
            }
            Err(error) => {
                self.degrade(&error);
                self.cached = Some(DEFAULT_SESSION_ID.to_string());
                DEFAULT_SESSION_ID.to_string()
            }
        }
    }

    /// Overwrites the identifier with a server-supplied value. Empty and
    /// whitespace-only values are ignored; anything else is trusted.
    pub fn update(&mut self, new_id: &str) {
        let new_id = new_id.trim();
        if new_id.is_empty() {
            return;
        }

        self.cached = Some(new_id.to_string());

        if self.degraded {
            return;
        }

        if let Err(error) = self.storage.set(SESSION_ID_KEY, new_id) {
            self.degrade(&error);
        }
    }

    /// True once the manager has given up on durable storage.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    fn degrade(&mut self, error: &StorageError) {
        if !self.degraded {
            tracing::warn!(%error, "session storage unavailable; continuing with in-memory identifier");
        }
        self.degraded = true;
    }
}

fn generate_session_id() -> String {
    let now = OffsetDateTime::now_utc();
    let unix_millis = now.unix_timestamp_nanos() / 1_000_000;
    format!("user_{unix_millis}")
}
