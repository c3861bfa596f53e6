//! Persisted session snapshot.
//!
//! The snapshot is the storage-layer representation of the session: an opaque,
//! versioned blob holding the token and the user profile. It is kept separate from
//! the in-memory [`SessionStore`](crate::session::SessionStore) so the on-disk
//! format can evolve independently.

use crate::domain::UserProfile;
use serde::{Deserialize, Serialize};

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Session data as written to storage.
///
/// Both fields are `None` after a logout; a snapshot where only one of them is
/// present is treated as empty on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Format version for future migrations.
    pub version: u32,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub user: Option<UserProfile>,

    /// Unix timestamp of the write.
    #[serde(default)]
    pub saved_at: i64,
}

impl SessionSnapshot {
    /// Snapshot holding a signed-in session.
    #[must_use]
    pub fn signed_in(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            token: Some(token.into()),
            user: Some(user),
            saved_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Snapshot of a signed-out session.
    #[must_use]
    pub fn signed_out() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            token: None,
            user: None,
            saved_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Returns the token and user only when both are present.
    #[must_use]
    pub fn into_pair(self) -> Option<(String, UserProfile)> {
        match (self.token, self.user) {
            (Some(token), Some(user)) => Some((token, user)),
            _ => None,
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::signed_out()
    }
}
