//! Blocking HTTP implementation of [`CatalogApi`] on top of `ureq`.

use super::backend::{CatalogApi, SearchQuery};
use super::endpoints::Endpoints;
use super::models::{decode, expect_success, MovieList};
use crate::domain::{
    AuthPayload, Credentials, DashboardData, MovieRecord, MovieflixError, PasswordReset, Result,
};
use serde::Serialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("movieflix/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the MovieFlix backend.
///
/// Non-2xx statuses are returned as responses rather than transport errors so the
/// backend's `message` body can be surfaced to the user.
pub struct HttpApi {
    agent: ureq::Agent,
    endpoints: Endpoints,
}

impl HttpApi {
    /// Creates a client for `base_url` with a global per-request timeout.
    #[must_use]
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .new_agent();

        tracing::debug!(base_url, timeout_secs = timeout.as_secs(), "http api created");

        Self {
            agent,
            endpoints: Endpoints::new(base_url),
        }
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn get(&self, url: &str, params: &[(&str, &str)], token: Option<&str>) -> Result<(u16, String)> {
        let _span = tracing::debug_span!("http_get", url).entered();

        let mut request = self.agent.get(url).header("User-Agent", USER_AGENT);
        for (key, value) in params {
            request = request.query(*key, *value);
        }
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.call().map_err(transport_error)?;
        read_response(response)
    }

    fn post<B: Serialize>(&self, url: &str, body: &B, token: Option<&str>) -> Result<(u16, String)> {
        let _span = tracing::debug_span!("http_post", url).entered();

        let payload =
            serde_json::to_string(body).map_err(|e| MovieflixError::Decode(e.to_string()))?;

        let mut request = self
            .agent
            .post(url)
            .header("User-Agent", USER_AGENT)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send(payload.as_str()).map_err(transport_error)?;
        read_response(response)
    }
}

fn read_response(mut response: ureq::http::Response<ureq::Body>) -> Result<(u16, String)> {
    let status = response.status().as_u16();
    let body = response
        .body_mut()
        .read_to_string()
        .map_err(|e| MovieflixError::Transport(format!("Read failed: {e}")))?;

    tracing::debug!(status, bytes = body.len(), "http response received");
    Ok((status, body))
}

fn transport_error(error: ureq::Error) -> MovieflixError {
    tracing::debug!(error = %error, "http request failed");
    MovieflixError::Transport(error.to_string())
}

impl CatalogApi for HttpApi {
    fn login(&self, credentials: &Credentials) -> Result<AuthPayload> {
        let (status, body) = self.post(&self.endpoints.login(), credentials, None)?;
        decode(status, &body)
    }

    fn register(&self, credentials: &Credentials) -> Result<AuthPayload> {
        let (status, body) = self.post(&self.endpoints.register(), credentials, None)?;
        decode(status, &body)
    }

    fn logout(&self, token: &str) -> Result<()> {
        let (status, body) =
            self.post(&self.endpoints.logout(), &serde_json::json!({}), Some(token))?;
        expect_success(status, &body)
    }

    fn forgot_password(&self, reset: &PasswordReset) -> Result<()> {
        let (status, body) = self.post(&self.endpoints.forgot_password(), reset, None)?;
        expect_success(status, &body)
    }

    fn trending(&self) -> Result<Vec<MovieRecord>> {
        let (status, body) = self.get(&self.endpoints.trending(), &[], None)?;
        decode::<MovieList>(status, &body).map(|list| list.movies)
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<MovieRecord>> {
        let page = query.page.to_string();
        let mut params = vec![("search", query.query.as_str()), ("page", page.as_str())];
        if let Some(sort) = query.sort.as_deref() {
            params.push(("sort", sort));
        }

        let (status, body) = self.get(&self.endpoints.search(), &params, None)?;
        decode::<MovieList>(status, &body).map(|list| list.movies)
    }

    fn movie(&self, id: &str) -> Result<MovieRecord> {
        let (status, body) = self.get(&self.endpoints.movie(id), &[], None)?;
        decode(status, &body)
    }

    fn dashboard(&self, token: Option<&str>) -> Result<DashboardData> {
        let (status, body) = self.get(&self.endpoints.dashboard(), &[], token)?;
        decode(status, &body)
    }
}
