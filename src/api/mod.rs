//! Backend access for the MovieFlix REST service.
//!
//! # Modules
//!
//! - [`backend`]: The [`CatalogApi`] trait the worker depends on
//! - [`endpoints`]: URL layout under a configurable base
//! - [`models`]: Response envelopes and error decoding
//! - [`http`]: `ureq` implementation

pub mod backend;
pub mod endpoints;
pub mod http;
pub mod models;

pub use backend::{CatalogApi, SearchQuery};
pub use endpoints::{Endpoints, DEFAULT_API_BASE_URL};
pub use http::HttpApi;
