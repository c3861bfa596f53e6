//! Route gating based on the current session.
//!
//! Authorization failures never redirect: the shell renders the denial in place of
//! the requested view.

use crate::app::Route;
use crate::session::SessionStore;

/// Message shown in place of a view the user may not see.
pub const ACCESS_DENIED_MESSAGE: &str = "Access denied: this page is only available to administrators.";

/// Outcome of checking a route against the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
}

/// Decides whether the current session may see `route`.
///
/// ```
/// use movieflix::app::Route;
/// use movieflix::session::{gate, Access, SessionStore};
/// use movieflix::storage::MemoryStorage;
///
/// let session = SessionStore::restore(Box::new(MemoryStorage::new()))?;
/// assert_eq!(gate(&Route::Home, &session), Access::Granted);
/// assert_eq!(gate(&Route::Analytics, &session), Access::Denied);
/// # Ok::<(), movieflix::MovieflixError>(())
/// ```
#[must_use]
pub fn gate(route: &Route, session: &SessionStore) -> Access {
    if route.requires_admin() && !session.is_admin() {
        tracing::debug!(route = %route, "route denied for current session");
        Access::Denied
    } else {
        Access::Granted
    }
}
