//! View model types representing renderable UI state.
//!
//! View models are created via `AppState::compute_viewmodel()` and consumed by
//! the renderer. They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use movieflix::ui::viewmodel::{Body, FooterInfo, HeaderInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: "MovieFlix".to_string(),
//!         user_label: None,
//!         show_stats: false,
//!     },
//!     body: Body::NotFound { path: "/nowhere".to_string() },
//!     footer: FooterInfo { keybindings: "home: back to catalog".to_string() },
//! };
//! assert!(vm.header.user_label.is_none());
//! ```

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub body: Body,
    pub footer: FooterInfo,
}

/// Top bar: brand, signed-in user (or a login link) and the admin-only stats entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    /// `"JD jane.doe@example.com"` when signed in, `None` shows the login link.
    pub user_label: Option<String>,
    /// Whether the "Stats" entry is offered.
    pub show_stats: bool,
}

/// Main content for the current route.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Catalog(CatalogView),
    MovieDetails(DetailView),
    Analytics(AnalyticsView),
    Form(FormView),
    /// The route needs a role the user lacks.
    AccessDenied { message: String },
    /// Terms and privacy pages.
    Static { title: String, text: String },
    NotFound { path: String },
}

/// Home page: search, genre and sort bars over the visible movies.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub search_bar: SearchBarInfo,
    pub genre_bar: Vec<GenreChip>,
    pub sort_bar: Vec<SortButton>,
    pub items: Vec<DisplayItem>,
    /// Size of the fetched result set before filtering.
    pub total: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub empty_state: Option<EmptyState>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
}

/// One selectable genre in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreChip {
    pub label: String,
    pub selected: bool,
}

/// One sort button; `arrow` is set on the active one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortButton {
    pub label: String,
    pub active: bool,
    pub arrow: Option<&'static str>,
}

/// Display information for a single movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// One-based position used by the `open` command.
    pub index: usize,
    pub title: String,
    pub year: String,
    pub genres: String,
    pub rating: String,
    /// Character ranges of `title` matching the query, `(start, end)` exclusive.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Shown when the catalog has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub loading: bool,
    pub error: Option<String>,
    pub title: String,
    /// Label/value rows in display order; empty values are omitted.
    pub fields: Vec<(String, String)>,
    pub plot: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsView {
    pub loading: bool,
    pub error: Option<String>,
    pub total_movies: u64,
    pub total_users: Option<u64>,
    pub avg_rating: Option<f64>,
    /// `(genre, percent of catalog)`.
    pub genre_shares: Vec<(String, u64)>,
    /// `(year, average runtime in minutes)`.
    pub yearly: Vec<(String, Option<f64>)>,
}

/// Login, sign-up and forgot-password pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub title: String,
    /// Command syntax to submit the form.
    pub usage: String,
    /// Inline validation or submit error.
    pub error: Option<String>,
    pub submitting: bool,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Command hints for the current page.
    pub keybindings: String,
}
