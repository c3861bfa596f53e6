//! Request sequencing for backend calls.
//!
//! Each issued request gets a fresh, strictly increasing id. Per [`Channel`] only
//! the most recently issued id is outstanding; a response whose id does not match
//! is stale and must be discarded, which makes "last issued wins" hold no matter
//! in which order the worker answers.

use std::collections::HashMap;

/// Independent lines of requests. A new request only supersedes older ones on the
/// same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Trending and search results feeding the catalog.
    Catalog,
    /// The movie details view.
    Detail,
    /// The analytics dashboard.
    Dashboard,
    /// Login, sign-up, forgot-password and logout.
    Auth,
}

#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    last_issued: u64,
    pending: HashMap<Channel, u64>,
}

impl RequestTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a new id for `channel`, superseding whatever was pending there.
    pub fn issue(&mut self, channel: Channel) -> u64 {
        self.last_issued += 1;
        let id = self.last_issued;
        if let Some(previous) = self.pending.insert(channel, id) {
            tracing::debug!(?channel, superseded = previous, request_id = id, "request superseded");
        }
        id
    }

    /// Accepts a response if `id` is the outstanding request on `channel`.
    ///
    /// Returns `false` for stale or unknown ids; the caller drops the response.
    pub fn settle(&mut self, channel: Channel, id: u64) -> bool {
        if self.pending.get(&channel) == Some(&id) {
            self.pending.remove(&channel);
            true
        } else {
            tracing::debug!(?channel, request_id = id, "discarding stale response");
            false
        }
    }

    /// Forgets the outstanding request on `channel` so its answer is discarded.
    pub fn cancel(&mut self, channel: Channel) {
        self.pending.remove(&channel);
    }

    #[must_use]
    pub fn is_pending(&self, channel: Channel) -> bool {
        self.pending.contains_key(&channel)
    }
}
