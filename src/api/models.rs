//! Wire envelopes and response decoding.
//!
//! Every successful response is wrapped as `{ "data": ... }`; failures carry a
//! `{ "message": ... }` body. Decoding lives here, apart from the transport, so it
//! can be exercised without a server.

use crate::domain::{lenient, MovieRecord, MovieflixError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Payload of the trending and search endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct MovieList {
    #[serde(default, deserialize_with = "lenient::records")]
    pub movies: Vec<MovieRecord>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Turns a status code and body into the enveloped payload or a typed error.
///
/// # Errors
///
/// - [`MovieflixError::Api`] for non-2xx statuses, carrying the backend's
///   `message` when present
/// - [`MovieflixError::Decode`] when a 2xx body does not match the envelope
pub fn decode<T: DeserializeOwned>(status: u16, body: &str) -> Result<T> {
    if !(200..300).contains(&status) {
        return Err(api_error(status, body));
    }

    serde_json::from_str::<Envelope<T>>(body)
        .map(|envelope| envelope.data)
        .map_err(|e| MovieflixError::Decode(e.to_string()))
}

/// Like [`decode`] but ignores the body of a successful response.
///
/// # Errors
///
/// Returns [`MovieflixError::Api`] for non-2xx statuses.
pub fn expect_success(status: u16, body: &str) -> Result<()> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(api_error(status, body))
    }
}

fn api_error(status: u16, body: &str) -> MovieflixError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status code {status}"));

    tracing::debug!(status, message = %message, "backend returned error");
    MovieflixError::Api { status, message }
}
