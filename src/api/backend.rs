//! Backend abstraction for the MovieFlix REST service.
//!
//! The worker talks to the backend only through [`CatalogApi`], so tests can swap in
//! an in-process fake and the HTTP transport stays in one place.

use crate::domain::{AuthPayload, Credentials, DashboardData, MovieRecord, PasswordReset, Result};

/// Parameters of a catalog search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text forwarded as the `search` parameter.
    pub query: String,
    /// One-based page number.
    pub page: u32,
    /// Optional sort hint (`rating`, `year`, `title`).
    pub sort: Option<String>,
}

impl SearchQuery {
    /// First page of results for `query`, without a sort hint.
    #[must_use]
    pub fn first_page(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            sort: None,
        }
    }

    #[must_use]
    pub fn with_sort(mut self, sort: Option<&str>) -> Self {
        self.sort = sort.map(str::to_string);
        self
    }
}

/// Operations the client needs from the backend.
///
/// Implementations must be `Send` because they live on the worker thread.
pub trait CatalogApi: Send {
    /// Exchanges credentials for a token and profile.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Api`](crate::MovieflixError::Api) when the backend
    /// rejects the credentials, or a transport/decode error.
    fn login(&self, credentials: &Credentials) -> Result<AuthPayload>;

    /// Creates an account and signs it in.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`CatalogApi::login`].
    fn register(&self, credentials: &Credentials) -> Result<AuthPayload>;

    /// Invalidates `token` on the backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot be reached.
    fn logout(&self, token: &str) -> Result<()>;

    /// Sets a new password for the account behind `reset.email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses or cannot be reached.
    fn forgot_password(&self, reset: &PasswordReset) -> Result<()>;

    /// Currently trending movies.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn trending(&self) -> Result<Vec<MovieRecord>>;

    /// Movies matching a search query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn search(&self, query: &SearchQuery) -> Result<Vec<MovieRecord>>;

    /// Full record of a single movie.
    ///
    /// # Errors
    ///
    /// Returns an error if the movie does not exist or the request fails.
    fn movie(&self, id: &str) -> Result<MovieRecord>;

    /// Aggregates for the analytics dashboard. Requires an admin token.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    fn dashboard(&self, token: Option<&str>) -> Result<DashboardData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page_defaults() {
        let query = SearchQuery::first_page("matrix");
        assert_eq!(query.page, 1);
        assert_eq!(query.sort, None);

        let sorted = query.with_sort(Some("year"));
        assert_eq!(sorted.sort.as_deref(), Some("year"));
    }
}
