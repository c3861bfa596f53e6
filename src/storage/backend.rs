//! Storage backend abstraction.
//!
//! The [`SessionStorage`] trait abstracts where the session snapshot lives, so the
//! session store can be tested against memory and run against a JSON file.

use crate::domain::error::Result;
use crate::storage::models::SessionSnapshot;

/// Abstraction over persistent session storage.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
/// - [`MemoryStorage`](crate::storage::MemoryStorage): in-process, for tests and ephemeral runs
///
/// # Examples
///
/// ```no_run
/// use movieflix::storage::{JsonStorage, SessionStorage};
/// use std::path::PathBuf;
///
/// let storage = JsonStorage::new(PathBuf::from("/tmp/movieflix/session.json"))?;
/// let snapshot = storage.load()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait SessionStorage: Send {
    /// Reads the last written snapshot.
    ///
    /// Returns a signed-out snapshot when nothing has been written yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self) -> Result<SessionSnapshot>;

    /// Replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. The previous snapshot must survive a
    /// failed write.
    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()>;
}
