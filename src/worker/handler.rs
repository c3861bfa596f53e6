//! Worker thread implementation for backend requests.
//!
//! The worker owns the [`CatalogApi`] and runs every request off the event loop.
//! Results are delivered back through a caller-supplied callback, so the event loop
//! can merge them with its other inputs on a single channel.

use crate::api::CatalogApi;
use crate::domain::error::{MovieflixError, Result};
use crate::worker::messages::{MovieSource, WorkerMessage, WorkerOperation, WorkerResponse};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;

/// Executes [`WorkerMessage`]s against a backend.
pub struct CatalogWorker<A: CatalogApi> {
    api: A,
}

impl<A: CatalogApi> CatalogWorker<A> {
    pub const fn new(api: A) -> Self {
        Self { api }
    }

    /// Converts an API result into a response with consistent logging.
    fn handle_api_result<T, F>(
        request_id: u64,
        operation: WorkerOperation,
        result: Result<T>,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(request_id, operation = %operation, "backend request succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(request_id, operation = %operation, error = %e, "backend request failed");
                WorkerResponse::Error {
                    request_id,
                    operation,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Returns a guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);
        Some(otel_context.attach())
    }

    /// Runs one request to completion and returns its response.
    pub fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let request_id = message.request_id();
        let operation = message.operation();
        let _span = tracing::debug_span!(
            "worker_handle_message",
            request_id,
            operation = %operation
        )
        .entered();

        match message {
            WorkerMessage::Login { credentials, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.login(&credentials),
                |payload| WorkerResponse::AuthSucceeded {
                    request_id,
                    payload,
                    registered: false,
                },
            ),

            WorkerMessage::Register { credentials, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.register(&credentials),
                |payload| WorkerResponse::AuthSucceeded {
                    request_id,
                    payload,
                    registered: true,
                },
            ),

            WorkerMessage::Logout { token, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.logout(&token),
                |()| WorkerResponse::LoggedOut { request_id },
            ),

            WorkerMessage::ForgotPassword { reset, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.forgot_password(&reset),
                |()| WorkerResponse::PasswordReset { request_id },
            ),

            WorkerMessage::Trending { .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.trending(),
                |movies| {
                    tracing::debug!(count = movies.len(), "trending movies loaded");
                    WorkerResponse::MoviesLoaded {
                        request_id,
                        source: MovieSource::Trending,
                        movies,
                    }
                },
            ),

            WorkerMessage::Search { query, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.search(&query),
                |movies| {
                    tracing::debug!(count = movies.len(), "search results loaded");
                    WorkerResponse::MoviesLoaded {
                        request_id,
                        source: MovieSource::Search,
                        movies,
                    }
                },
            ),

            WorkerMessage::LoadMovie { id, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.movie(&id),
                |movie| WorkerResponse::MovieLoaded { request_id, movie },
            ),

            WorkerMessage::LoadDashboard { token, .. } => Self::handle_api_result(
                request_id,
                operation,
                self.api.dashboard(token.as_deref()),
                |data| WorkerResponse::DashboardLoaded { request_id, data },
            ),
        }
    }
}

/// Handle to a running worker thread.
pub struct WorkerHandle {
    sender: Sender<WorkerMessage>,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Queues a request for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Worker`] if the worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        tracing::debug!(request_id = message.request_id(), operation = %message.operation(), "posting to worker");
        self.sender
            .send(message)
            .map_err(|e| MovieflixError::Worker(format!("worker is gone: {e}")))
    }

    /// Closes the request channel and waits for in-flight work to finish.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Worker`] if the worker thread panicked.
    pub fn shutdown(self) -> Result<()> {
        drop(self.sender);
        self.thread
            .join()
            .map_err(|_| MovieflixError::Worker("worker thread panicked".to_string()))
    }
}

/// Spawns a worker thread that serves requests until the handle is dropped.
///
/// `deliver` is called with every response on the worker thread; returning `false`
/// stops the worker (the receiving side is gone).
///
/// # Errors
///
/// Returns an error if the OS refuses to spawn the thread.
pub fn spawn<A, F>(api: A, mut deliver: F) -> Result<WorkerHandle>
where
    A: CatalogApi + 'static,
    F: FnMut(WorkerResponse) -> bool + Send + 'static,
{
    let (sender, receiver) = mpsc::channel::<WorkerMessage>();
    let worker = CatalogWorker::new(api);

    let thread = std::thread::Builder::new()
        .name("movieflix-worker".to_string())
        .spawn(move || {
            tracing::debug!("worker thread started");
            for message in receiver {
                let response = worker.handle_message(message);
                if !deliver(response) {
                    tracing::debug!("response receiver dropped, stopping worker");
                    break;
                }
            }
            tracing::debug!("worker thread stopped");
        })?;

    Ok(WorkerHandle { sender, thread })
}
