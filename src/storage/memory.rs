//! In-memory session storage for tests and `--ephemeral` runs.

use crate::domain::error::Result;
use crate::storage::backend::SessionStorage;
use crate::storage::models::SessionSnapshot;
use std::sync::{Arc, Mutex};

/// Session storage that never touches the filesystem.
///
/// Clones share the same slot, so a test can keep a handle and inspect what the
/// session store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<SessionSnapshot>>,
    writes: Arc<Mutex<usize>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a snapshot, as if written by an earlier run.
    #[must_use]
    pub fn with_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            slot: Arc::new(Mutex::new(snapshot)),
            writes: Arc::default(),
        }
    }

    /// Number of successful saves so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.lock().map_or(0, |count| *count)
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Result<SessionSnapshot> {
        let slot = self
            .slot
            .lock()
            .map_err(|e| crate::MovieflixError::Storage(format!("memory slot poisoned: {e}")))?;
        Ok(slot.clone())
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|e| crate::MovieflixError::Storage(format!("memory slot poisoned: {e}")))?;
        *slot = snapshot.clone();
        drop(slot);

        if let Ok(mut count) = self.writes.lock() {
            *count += 1;
        }
        Ok(())
    }
}
