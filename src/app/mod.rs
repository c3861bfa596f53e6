//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the runtime (`main.rs`) and the domain, session,
//! storage and worker layers.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Command line → Events → Event Handler → State Mutations → Actions → Side Effects
//!                              ↑                                     ↓
//!                              └────────── Worker Responses ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`catalog`]: Catalog inputs and the pure projection over them
//! - [`commands`]: Shell line parser producing events
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Sort key and direction
//! - [`requests`]: Request sequencing for stale-response detection
//! - [`routes`]: Navigable views
//! - [`state`]: Central application state container and view model computation
//! - [`validation`]: Auth form validation

pub mod actions;
pub mod catalog;
pub mod commands;
pub mod handler;
pub mod modes;
pub mod requests;
pub mod routes;
pub mod state;
pub mod validation;

pub use actions::{Action, Notification, NotificationLevel};
pub use catalog::{project, CatalogState};
pub use commands::{parse_command, CommandError};
pub use handler::{handle_event, Event, HELP_TEXT};
pub use modes::{SortDirection, SortKey};
pub use requests::{Channel, RequestTracker};
pub use routes::Route;
pub use state::AppState;
pub use validation::ValidationError;
