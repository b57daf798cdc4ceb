//! Persistent session storage.
//!
//! The store is best-effort on both sides: an unreadable or corrupt record
//! loads as `None`, and a failed save is swallowed after a debug log. The
//! tracker degrades to stateless operation rather than surfacing storage
//! problems to the host page.
//!
//! Concurrent writers (multiple tabs sharing one store) race last-write-wins;
//! there is no cross-writer coordination.

use std::path::PathBuf;

use parking_lot::Mutex;
use tracing::debug;

use footfall_core::SessionRecord;

/// Durable key-value slot for the session record.
pub trait SessionStore: Send + Sync {
    /// Load the stored record; `None` on absence, corruption, or I/O failure.
    fn load(&self) -> Option<SessionRecord>;

    /// Persist the record; failures are swallowed.
    fn save(&self, record: &SessionRecord);
}

/// JSON-file-backed store, the durable analog of the original's
/// origin-scoped storage slot.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Option<SessionRecord> {
        let bytes = std::fs::read(&self.path).ok()?;
        match serde_json::from_slice(&bytes) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "discarding unreadable session record");
                None
            }
        }
    }

    fn save(&self, record: &SessionRecord) {
        let bytes = match serde_json::to_vec(record) {
            Ok(bytes) => bytes,
            Err(e) => {
                debug!(error = %e, "failed to serialize session record");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, bytes) {
            debug!(path = %self.path.display(), error = %e, "session save failed, continuing stateless");
        }
    }
}

/// In-memory store for tests and for the stateless degradation path.
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<SessionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<SessionRecord> {
        self.slot.lock().clone()
    }

    fn save(&self, record: &SessionRecord) {
        *self.slot.lock() = Some(record.clone());
    }
}
