//! Client session: auth token plus the signed-in user.
//!
//! The token and the profile live in a single `Option<(String, UserProfile)>`, so no
//! caller can ever observe one without the other. Every change is written through
//! to the injected [`SessionStorage`] before the method returns.

use crate::domain::error::Result;
use crate::domain::UserProfile;
use crate::storage::{SessionSnapshot, SessionStorage};

/// Holds and persists the current session.
///
/// # Example
///
/// ```
/// use movieflix::session::SessionStore;
/// use movieflix::storage::MemoryStorage;
/// use movieflix::UserProfile;
///
/// let mut session = SessionStore::restore(Box::new(MemoryStorage::new()))?;
/// session.set_session("tok1", UserProfile::new("1", "root@movieflix.io", "admin"))?;
/// assert!(session.is_admin());
///
/// session.clear_session()?;
/// assert!(session.current_user().is_none());
/// assert!(!session.is_admin());
/// # Ok::<(), movieflix::MovieflixError>(())
/// ```
pub struct SessionStore {
    current: Option<(String, UserProfile)>,
    storage: Box<dyn SessionStorage>,
}

impl SessionStore {
    /// Rehydrates the session from storage.
    ///
    /// Called once at startup, before anything gated is rendered. A snapshot that
    /// holds only one of token/user restores as signed out.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be read.
    pub fn restore(storage: Box<dyn SessionStorage>) -> Result<Self> {
        let snapshot = storage.load()?;
        let current = snapshot.into_pair();

        tracing::debug!(
            signed_in = current.is_some(),
            role = current.as_ref().map(|(_, user)| user.role.as_str()),
            "session restored"
        );

        Ok(Self { current, storage })
    }

    /// Replaces the session with a new token and user and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written. The in-memory session
    /// is updated regardless, so the current run stays signed in.
    pub fn set_session(&mut self, token: impl Into<String>, user: UserProfile) -> Result<()> {
        let token = token.into();
        let _span = tracing::debug_span!("set_session", user_id = %user.id, role = %user.role).entered();

        let snapshot = SessionSnapshot::signed_in(token.clone(), user.clone());
        self.current = Some((token, user));
        self.storage.save(&snapshot)
    }

    /// Signs out and persists the empty session.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be written. The in-memory session
    /// is cleared regardless.
    pub fn clear_session(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("clear_session", was_signed_in = self.current.is_some()).entered();

        self.current = None;
        self.storage.save(&SessionSnapshot::signed_out())
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&UserProfile> {
        self.current.as_ref().map(|(_, user)| user)
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|(token, _)| token.as_str())
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// True iff the current user's role is `"admin"`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.current_user().is_some_and(UserProfile::is_admin)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.current_user())
            .field("has_token", &self.current.is_some())
            .finish_non_exhaustive()
    }
}
