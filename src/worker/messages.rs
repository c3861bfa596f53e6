//! Worker thread message types for cross-thread communication.
//!
//! Requests flow from the event loop to the worker as [`WorkerMessage`]s and come
//! back as [`WorkerResponse`]s. Every message carries the `request_id` the event
//! loop assigned when issuing it, so late answers to superseded requests can be
//! recognized and dropped.

use crate::api::SearchQuery;
use crate::domain::{AuthPayload, Credentials, DashboardData, MovieRecord, PasswordReset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distributed tracing context for cross-thread span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so spans opened on
/// the worker thread join the trace of the event that issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if no OpenTelemetry layer is installed or the current span
    /// context is invalid.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        let context = Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        };
        tracing::trace!(trace_id = %context.trace_id, "capturing trace context");
        Some(context)
    }
}

/// Kind of backend operation, used for logging and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerOperation {
    Login,
    Register,
    Logout,
    ForgotPassword,
    Trending,
    Search,
    Movie,
    Dashboard,
}

impl WorkerOperation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Logout => "logout",
            Self::ForgotPassword => "forgot password",
            Self::Trending => "trending",
            Self::Search => "search",
            Self::Movie => "movie details",
            Self::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for WorkerOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    login(Login { request_id: u64, credentials: Credentials }),
    register(Register { request_id: u64, credentials: Credentials }),
    logout(Logout { request_id: u64, token: String }),
    forgot_password(ForgotPassword { request_id: u64, reset: PasswordReset }),
    trending(Trending { request_id: u64 }),
    search(Search { request_id: u64, query: SearchQuery }),
    load_movie(LoadMovie { request_id: u64, id: String }),
    load_dashboard(LoadDashboard { request_id: u64, token: Option<String> }),
}

/// Requests sent from the event loop to the worker thread.
#[derive(Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    Login {
        request_id: u64,
        credentials: Credentials,
        trace_context: Option<TraceContext>,
    },

    Register {
        request_id: u64,
        credentials: Credentials,
        trace_context: Option<TraceContext>,
    },

    /// Invalidate the token on the backend.
    Logout {
        request_id: u64,
        token: String,
        trace_context: Option<TraceContext>,
    },

    ForgotPassword {
        request_id: u64,
        reset: PasswordReset,
        trace_context: Option<TraceContext>,
    },

    /// Fetch the trending list.
    Trending {
        request_id: u64,
        trace_context: Option<TraceContext>,
    },

    /// Run a catalog search.
    Search {
        request_id: u64,
        query: SearchQuery,
        trace_context: Option<TraceContext>,
    },

    /// Fetch a single movie for the details view.
    LoadMovie {
        request_id: u64,
        id: String,
        trace_context: Option<TraceContext>,
    },

    /// Fetch the analytics dashboard.
    LoadDashboard {
        request_id: u64,
        token: Option<String>,
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::Login { request_id, .. }
            | Self::Register { request_id, .. }
            | Self::Logout { request_id, .. }
            | Self::ForgotPassword { request_id, .. }
            | Self::Trending { request_id, .. }
            | Self::Search { request_id, .. }
            | Self::LoadMovie { request_id, .. }
            | Self::LoadDashboard { request_id, .. } => *request_id,
        }
    }

    #[must_use]
    pub const fn operation(&self) -> WorkerOperation {
        match self {
            Self::Login { .. } => WorkerOperation::Login,
            Self::Register { .. } => WorkerOperation::Register,
            Self::Logout { .. } => WorkerOperation::Logout,
            Self::ForgotPassword { .. } => WorkerOperation::ForgotPassword,
            Self::Trending { .. } => WorkerOperation::Trending,
            Self::Search { .. } => WorkerOperation::Search,
            Self::LoadMovie { .. } => WorkerOperation::Movie,
            Self::LoadDashboard { .. } => WorkerOperation::Dashboard,
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::Login { trace_context, .. }
            | Self::Register { trace_context, .. }
            | Self::Logout { trace_context, .. }
            | Self::ForgotPassword { trace_context, .. }
            | Self::Trending { trace_context, .. }
            | Self::Search { trace_context, .. }
            | Self::LoadMovie { trace_context, .. }
            | Self::LoadDashboard { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

// Credentials and tokens stay out of logs.
impl fmt::Debug for WorkerMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerMessage")
            .field("operation", &self.operation())
            .field("request_id", &self.request_id())
            .finish_non_exhaustive()
    }
}

/// Which endpoint produced a movie list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSource {
    Trending,
    Search,
}

/// Responses sent from the worker thread back to the event loop.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    /// Login or registration succeeded.
    AuthSucceeded {
        request_id: u64,
        payload: AuthPayload,
        /// `true` when the account was just created.
        registered: bool,
    },

    LoggedOut {
        request_id: u64,
    },

    PasswordReset {
        request_id: u64,
    },

    /// A full replacement list for the catalog.
    MoviesLoaded {
        request_id: u64,
        source: MovieSource,
        movies: Vec<MovieRecord>,
    },

    MovieLoaded {
        request_id: u64,
        movie: MovieRecord,
    },

    DashboardLoaded {
        request_id: u64,
        data: DashboardData,
    },

    /// The operation failed; `message` is suitable for display.
    Error {
        request_id: u64,
        operation: WorkerOperation,
        message: String,
    },
}

impl WorkerResponse {
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::AuthSucceeded { request_id, .. }
            | Self::LoggedOut { request_id }
            | Self::PasswordReset { request_id }
            | Self::MoviesLoaded { request_id, .. }
            | Self::MovieLoaded { request_id, .. }
            | Self::DashboardLoaded { request_id, .. }
            | Self::Error { request_id, .. } => *request_id,
        }
    }
}
