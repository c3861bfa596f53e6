//! Session layer: the persisted auth state and the route gate built on it.
//!
//! - [`store`]: token + user profile with write-through persistence
//! - [`access`]: admin gating for restricted routes

pub mod access;
pub mod store;

pub use access::{gate, Access, ACCESS_DENIED_MESSAGE};
pub use store::SessionStore;
