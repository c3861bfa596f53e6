//! Domain layer for the MovieFlix client.
//!
//! Core record types and the crate error, independent of storage, transport and
//! rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Catalog record
//! - [`user`]: User profile and credential shapes
//! - [`analytics`]: Dashboard aggregates
//! - [`lenient`]: Tolerant deserializers for loosely typed payloads

pub mod analytics;
pub mod error;
pub mod lenient;
pub mod movie;
pub mod user;

pub use analytics::DashboardData;
pub use error::{MovieflixError, Result};
pub use movie::MovieRecord;
pub use user::{AuthPayload, Credentials, PasswordReset, UserProfile};
