//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event, allowing
//! multiple side effects to be queued atomically. The runtime in `main.rs` executes
//! them in order.
//!
//! # Example
//!
//! ```rust
//! use movieflix::app::Action;
//! use movieflix::worker::WorkerMessage;
//!
//! let actions = vec![Action::PostToWorker(WorkerMessage::trending(1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::worker::WorkerMessage;
use std::fmt;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient message shown to the user once (a toast).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Commands representing side effects to be executed by the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a request to the background worker thread.
    PostToWorker(WorkerMessage),

    /// Shows a transient notification.
    Notify(Notification),

    /// Hands a generated file to the user (written to the export directory).
    SaveFile {
        file_name: String,
        mime_type: &'static str,
        contents: String,
    },

    /// Leaves the event loop.
    Quit,
}
