//! Background worker thread for backend requests.
//!
//! All network I/O runs here so the event loop never blocks. Messages carry
//! tracing context across the thread boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation, thread spawning and message processing

pub mod handler;
pub mod messages;

pub use handler::{spawn, CatalogWorker, WorkerHandle};
pub use messages::{MovieSource, TraceContext, WorkerMessage, WorkerOperation, WorkerResponse};
