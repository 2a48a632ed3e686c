use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};

use super::StorageBackend;

/// Fixed storage key for the watched-title set
pub const WATCHED_KEY: &str = "mcu_watched_productions";

/// Owns the set of watched titles and its durable persistence
///
/// The set is hydrated once at creation and re-persisted in full,
/// synchronously, on every mutation. The stored format is a bare JSON array
/// of title strings, unversioned. A `BTreeSet` keeps serialization
/// deterministic, so equal sets persist byte-identically.
pub struct WatchedStore {
    backend: Box<dyn StorageBackend>,
    watched: BTreeSet<String>,
}

impl WatchedStore {
    /// Hydrates the store from the backend
    ///
    /// A missing key or a value that does not parse as a JSON array of
    /// strings yields an empty set. Losing watched state is non-fatal, so
    /// the failure is logged at debug level and never surfaced.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let watched = match backend.read(WATCHED_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<BTreeSet<String>>(&raw) {
                Ok(set) => set,
                Err(e) => {
                    tracing::debug!(error = %e, "stored watched set unreadable, starting empty");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                tracing::debug!(error = %e, "watched set read failed, starting empty");
                BTreeSet::new()
            }
        };
        Self { backend, watched }
    }

    /// True iff `title` is currently marked watched
    pub fn is_watched(&self, title: &str) -> bool {
        self.watched.contains(title)
    }

    /// Flips the watched mark for `title` and persists the whole set
    ///
    /// Two identical toggles restore both the set and the persisted bytes.
    pub fn toggle(&mut self, title: &str) -> AppResult<()> {
        if !self.watched.remove(title) {
            self.watched.insert(title.to_string());
        }
        self.persist()
    }

    fn persist(&mut self) -> AppResult<()> {
        let encoded =
            serde_json::to_string(&self.watched).map_err(|e| AppError::Store(e.to_string()))?;
        self.backend.write(WATCHED_KEY, &encoded)
    }
}
