//! Storage layer for the persisted session snapshot.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `memory`: In-process storage for tests and ephemeral runs
//! - `models`: Snapshot record separate from the in-memory session

pub mod backend;
pub mod json;
pub mod memory;
pub mod models;

pub use backend::SessionStorage;
pub use json::JsonStorage;
pub use memory::MemoryStorage;
pub use models::SessionSnapshot;
