//! Terminal user interface.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: View model to ANSI text
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_notification, render_to_string};
pub use theme::Theme;
pub use viewmodel::{Body, UIViewModel};
