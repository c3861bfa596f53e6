//! JSON file-based session storage.
//!
//! Uses atomic file writes (write-to-temp + rename) so a crash mid-write never
//! leaves a truncated snapshot behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "token": "eyJhbGciOi...",
//!   "user": {
//!     "id": "64f1c2",
//!     "email": "jane@example.com",
//!     "role": "admin",
//!     "isActive": true
//!   },
//!   "saved_at": 1760000000
//! }
//! ```

use crate::domain::error::{MovieflixError, Result};
use crate::storage::backend::SessionStorage;
use crate::storage::models::SessionSnapshot;
use std::path::{Path, PathBuf};

/// JSON file storage backend.
///
/// The last snapshot is kept in memory; every [`save`](SessionStorage::save)
/// rewrites the file.
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// Snapshot as last read or written.
    data: SessionSnapshot,
}

impl JsonStorage {
    /// Opens (or prepares) the snapshot file.
    ///
    /// Parent directories are created automatically. A file that exists but does
    /// not parse is ignored with a warning and the storage starts signed out; the
    /// next save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON session storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("no snapshot on disk, starting signed out");
            SessionSnapshot::signed_out()
        };

        Ok(Self { file_path, data })
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<SessionSnapshot> {
        let contents = std::fs::read_to_string(path)?;

        match serde_json::from_str::<SessionSnapshot>(&contents) {
            Ok(snapshot) => {
                tracing::debug!(
                    version = snapshot.version,
                    signed_in = snapshot.token.is_some(),
                    "loaded session snapshot"
                );
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(path = ?path, error = %e, "session snapshot unreadable, ignoring it");
                Ok(SessionSnapshot::signed_out())
            }
        }
    }

    fn save_to_file(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| MovieflixError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "session snapshot saved");
        Ok(())
    }
}

impl SessionStorage for JsonStorage {
    fn load(&self) -> Result<SessionSnapshot> {
        Ok(self.data.clone())
    }

    fn save(&mut self, snapshot: &SessionSnapshot) -> Result<()> {
        let _span = tracing::debug_span!("json_save_session",
            signed_in = snapshot.token.is_some()
        ).entered();

        self.save_to_file(snapshot)?;
        self.data = snapshot.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserProfile;

    #[test]
    fn test_round_trips_through_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("session.json");

        let mut storage = JsonStorage::new(path.clone()).expect("storage");
        let snapshot = SessionSnapshot::signed_in("tok1", UserProfile::new("1", "a@b.io", "admin"));
        storage.save(&snapshot).expect("save");

        let reopened = JsonStorage::new(path).expect("reopen");
        assert_eq!(reopened.load().expect("load"), snapshot);
    }

    #[test]
    fn test_corrupt_file_starts_signed_out() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").expect("write");

        let storage = JsonStorage::new(path).expect("storage");
        assert!(storage.load().expect("load").into_pair().is_none());
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");

        let mut storage = JsonStorage::new(path.clone()).expect("storage");
        storage.save(&SessionSnapshot::signed_out()).expect("save");

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }
}
