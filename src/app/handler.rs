//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user commands and
//! worker responses, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the command parser or the worker thread
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! # Event Types
//!
//! - **Catalog**: `QueryChanged`, `SubmitSearch`, `LoadTrending`, genre and sort events
//! - **Navigation**: `Navigate`, `OpenMovie`
//! - **Account**: `SubmitLogin`, `SubmitSignUp`, `SubmitForgotPassword`, `Logout`
//! - **Misc**: `ExportCsv`, `ToggleTheme`, `ShowHelp`, `Quit`
//! - **Worker**: `WorkerResponse` with typed message variants
//!
//! # Example
//!
//! ```rust
//! use movieflix::app::{handle_event, Action, AppState, Event};
//! use movieflix::session::SessionStore;
//! use movieflix::storage::MemoryStorage;
//! use movieflix::ui::Theme;
//!
//! let session = SessionStore::restore(Box::new(MemoryStorage::new()))?;
//! let mut state = AppState::new(session, Theme::default());
//!
//! let (_, actions) = handle_event(&mut state, &Event::LoadTrending)?;
//! assert!(matches!(actions[0], Action::PostToWorker(_)));
//! # Ok::<(), movieflix::MovieflixError>(())
//! ```

use super::actions::{Action, Notification};
use super::modes::{SortDirection, SortKey};
use super::requests::Channel;
use super::routes::Route;
use super::state::AppState;
use super::validation::{validate_login, validate_password_reset, validate_sign_up};
use crate::api::SearchQuery;
use crate::domain::error::Result;
use crate::domain::{AuthPayload, Credentials, PasswordReset};
use crate::export::{to_csv, CSV_FILE_NAME, CSV_MIME_TYPE};
use crate::session::{gate, Access};
use crate::worker::{MovieSource, WorkerMessage, WorkerOperation, WorkerResponse};

/// Command summary shown by `help`.
pub const HELP_TEXT: &str = "\
search <text>        fetch movies matching <text>
filter <text>        narrow the loaded movies (empty clears them)
trending             fetch trending movies
genre <name>         toggle a genre filter; `genre` alone clears it
sort <key>           rating | year | title | none (repeat to flip direction)
dir <asc|desc>       set the sort direction
open <n>             show details of the n-th visible movie
export               save the visible movies as movies.csv
go <path>            open a page, e.g. /login, /signup, /analytics
login <email> <password>
signup <email> <password> <confirm> agree
forgot <email> <new-password> <confirm>
logout | stats | home | theme | help | quit";

/// Events triggered by user commands or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Search box edited. A blank query also empties the result set.
    QueryChanged(String),
    /// Run the current query against the backend.
    SubmitSearch,
    LoadTrending,

    /// Toggle one genre; loosely typed names are resolved against loaded genres.
    ToggleGenre(String),
    ClearGenres,

    /// Sort button semantics: same key flips, new key starts descending.
    ClickSort(SortKey),
    ClearSort,
    SetSortDirection(SortDirection),

    Navigate(Route),
    /// Open the details page of the visible movie at this zero-based position.
    OpenMovie(usize),

    SubmitLogin {
        email: String,
        password: String,
    },
    SubmitSignUp {
        email: String,
        password: String,
        confirm_password: String,
        agree_to_terms: bool,
    },
    SubmitForgotPassword {
        email: String,
        new_password: String,
        confirm_password: String,
    },
    Logout,

    /// Save the visible movies as CSV.
    ExportCsv,
    ToggleTheme,
    ShowHelp,
    Quit,

    /// Wraps a response from the background worker thread.
    WorkerResponse(WorkerResponse),
}

impl Event {
    /// Short name for logs; never includes credentials.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::QueryChanged(_) => "query_changed",
            Self::SubmitSearch => "submit_search",
            Self::LoadTrending => "load_trending",
            Self::ToggleGenre(_) => "toggle_genre",
            Self::ClearGenres => "clear_genres",
            Self::ClickSort(_) => "click_sort",
            Self::ClearSort => "clear_sort",
            Self::SetSortDirection(_) => "set_sort_direction",
            Self::Navigate(_) => "navigate",
            Self::OpenMovie(_) => "open_movie",
            Self::SubmitLogin { .. } => "submit_login",
            Self::SubmitSignUp { .. } => "submit_sign_up",
            Self::SubmitForgotPassword { .. } => "submit_forgot_password",
            Self::Logout => "logout",
            Self::ExportCsv => "export_csv",
            Self::ToggleTheme => "toggle_theme",
            Self::ShowHelp => "show_help",
            Self::Quit => "quit",
            Self::WorkerResponse(_) => "worker_response",
        }
    }
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The boolean tells the runtime whether the screen needs to be redrawn.
///
/// # Errors
///
/// Currently infallible in practice: storage failures while persisting the session
/// are reported to the user as notifications rather than propagated, since the
/// in-memory session is already updated.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::QueryChanged(query) => {
            let blank = query.trim().is_empty();
            state.update_catalog(|catalog| {
                catalog.set_query(query.clone());
                if blank {
                    catalog.set_movies(Vec::new());
                }
            });
            if blank {
                state.requests.cancel(Channel::Catalog);
            }
            tracing::trace!(query_len = query.len(), cleared = blank, "query updated");
            Ok((true, vec![]))
        }
        Event::SubmitSearch => {
            let query = state.catalog().query().trim().to_string();
            if query.is_empty() {
                tracing::debug!("empty query, search skipped");
                return Ok((false, vec![]));
            }

            let request_id = state.requests.issue(Channel::Catalog);
            state.catalog_error = None;
            let search = SearchQuery::first_page(query).with_sort(state.catalog().sort_key().as_hint());
            Ok((true, vec![Action::PostToWorker(WorkerMessage::search(request_id, search))]))
        }
        Event::LoadTrending => {
            let request_id = state.requests.issue(Channel::Catalog);
            state.catalog_error = None;
            Ok((true, vec![Action::PostToWorker(WorkerMessage::trending(request_id))]))
        }
        Event::ToggleGenre(input) => {
            let genre = state.catalog().resolve_genre(input);
            tracing::debug!(input = %input, genre = %genre, "toggling genre");
            state.update_catalog(|catalog| catalog.toggle_genre(&genre));
            Ok((true, vec![]))
        }
        Event::ClearGenres => {
            state.update_catalog(|catalog| catalog.clear_genres());
            Ok((true, vec![]))
        }
        Event::ClickSort(key) => {
            state.update_catalog(|catalog| catalog.click_sort(*key));
            Ok((true, vec![]))
        }
        Event::ClearSort => {
            state.update_catalog(|catalog| catalog.clear_sort());
            Ok((true, vec![]))
        }
        Event::SetSortDirection(direction) => {
            state.update_catalog(|catalog| catalog.set_sort_direction(*direction));
            Ok((true, vec![]))
        }
        Event::Navigate(route) => Ok((true, navigate(state, route.clone()))),
        Event::OpenMovie(position) => {
            let Some(movie) = state.visible_movies().get(*position) else {
                return Ok((
                    false,
                    vec![Action::Notify(Notification::error(format!(
                        "No movie at position {}.",
                        position + 1
                    )))],
                ));
            };
            let route = Route::MovieDetails(movie.id.clone());
            Ok((true, navigate(state, route)))
        }
        Event::SubmitLogin { email, password } => {
            if let Err(e) = validate_login(email, password) {
                state.form_error = Some(e.to_string());
                return Ok((true, vec![]));
            }
            state.form_error = None;

            let request_id = state.requests.issue(Channel::Auth);
            let credentials = Credentials {
                email: email.clone(),
                password: password.clone(),
            };
            Ok((true, vec![Action::PostToWorker(WorkerMessage::login(request_id, credentials))]))
        }
        Event::SubmitSignUp {
            email,
            password,
            confirm_password,
            agree_to_terms,
        } => {
            if let Err(e) = validate_sign_up(email, password, confirm_password, *agree_to_terms) {
                state.form_error = Some(e.to_string());
                return Ok((true, vec![]));
            }
            state.form_error = None;

            let request_id = state.requests.issue(Channel::Auth);
            let credentials = Credentials {
                email: email.clone(),
                password: password.clone(),
            };
            Ok((true, vec![Action::PostToWorker(WorkerMessage::register(request_id, credentials))]))
        }
        Event::SubmitForgotPassword {
            email,
            new_password,
            confirm_password,
        } => {
            if let Err(e) = validate_password_reset(email, new_password, confirm_password) {
                state.form_error = Some(e.to_string());
                return Ok((true, vec![]));
            }
            state.form_error = None;

            let request_id = state.requests.issue(Channel::Auth);
            let reset = PasswordReset {
                email: email.clone(),
                new_password: new_password.clone(),
            };
            Ok((true, vec![Action::PostToWorker(WorkerMessage::forgot_password(request_id, reset))]))
        }
        Event::Logout => {
            let Some(token) = state.session.token().map(str::to_string) else {
                tracing::debug!("logout requested without a session");
                return Ok((false, vec![Action::Notify(Notification::info("You are not logged in."))]));
            };
            let request_id = state.requests.issue(Channel::Auth);
            Ok((false, vec![Action::PostToWorker(WorkerMessage::logout(request_id, token))]))
        }
        Event::ExportCsv => {
            let visible = state.visible_movies();
            let _span = tracing::debug_span!("export_csv", rows = visible.len()).entered();

            match to_csv(visible) {
                Some(contents) => Ok((
                    false,
                    vec![Action::SaveFile {
                        file_name: CSV_FILE_NAME.to_string(),
                        mime_type: CSV_MIME_TYPE,
                        contents,
                    }],
                )),
                None => Ok((false, vec![Action::Notify(Notification::info("Nothing to export."))])),
            }
        }
        Event::ToggleTheme => {
            state.theme = state.theme.toggled();
            tracing::debug!(theme = %state.theme.name, "theme toggled");
            Ok((true, vec![]))
        }
        Event::ShowHelp => Ok((false, vec![Action::Notify(Notification::info(HELP_TEXT))])),
        Event::Quit => Ok((false, vec![Action::Quit])),
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

/// Switches route and issues whatever fetch the new page needs.
fn navigate(state: &mut AppState, route: Route) -> Vec<Action> {
    state.set_route(route.clone());

    match route {
        Route::MovieDetails(id) => {
            let request_id = state.requests.issue(Channel::Detail);
            vec![Action::PostToWorker(WorkerMessage::load_movie(request_id, id))]
        }
        Route::Analytics => {
            if gate(&Route::Analytics, &state.session) == Access::Denied {
                return vec![];
            }
            let request_id = state.requests.issue(Channel::Dashboard);
            let token = state.session.token().map(str::to_string);
            vec![Action::PostToWorker(WorkerMessage::load_dashboard(request_id, token))]
        }
        _ => vec![],
    }
}

const fn channel_of(operation: WorkerOperation) -> Channel {
    match operation {
        WorkerOperation::Login
        | WorkerOperation::Register
        | WorkerOperation::Logout
        | WorkerOperation::ForgotPassword => Channel::Auth,
        WorkerOperation::Trending | WorkerOperation::Search => Channel::Catalog,
        WorkerOperation::Movie => Channel::Detail,
        WorkerOperation::Dashboard => Channel::Dashboard,
    }
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    let channel = match response {
        WorkerResponse::AuthSucceeded { .. }
        | WorkerResponse::LoggedOut { .. }
        | WorkerResponse::PasswordReset { .. } => Channel::Auth,
        WorkerResponse::MoviesLoaded { .. } => Channel::Catalog,
        WorkerResponse::MovieLoaded { .. } => Channel::Detail,
        WorkerResponse::DashboardLoaded { .. } => Channel::Dashboard,
        WorkerResponse::Error { operation, .. } => channel_of(*operation),
    };

    if !state.requests.settle(channel, response.request_id()) {
        return Ok((false, vec![]));
    }

    match response {
        WorkerResponse::AuthSucceeded { payload, registered, .. } => {
            Ok((true, sign_in(state, payload, *registered)))
        }
        WorkerResponse::LoggedOut { .. } => {
            let mut actions = vec![];
            if let Err(e) = state.session.clear_session() {
                tracing::warn!(error = %e, "failed to persist logout");
                actions.push(Action::Notify(Notification::error(format!(
                    "Could not save session: {e}"
                ))));
            }
            state.reset_catalog();
            state.set_route(Route::Home);
            actions.push(Action::Notify(Notification::success("Logged out.")));
            Ok((true, actions))
        }
        WorkerResponse::PasswordReset { .. } => {
            state.set_route(Route::Login);
            Ok((true, vec![Action::Notify(Notification::success("Password reset successful!"))]))
        }
        WorkerResponse::MoviesLoaded { source, movies, .. } => {
            tracing::debug!(count = movies.len(), ?source, "movies loaded");
            state.catalog_error = None;
            state.update_catalog(|catalog| catalog.set_movies(movies.clone()));

            let message = match source {
                MovieSource::Trending => "Trending movies loaded!",
                MovieSource::Search => "Search results loaded!",
            };
            Ok((true, vec![Action::Notify(Notification::success(message))]))
        }
        WorkerResponse::MovieLoaded { movie, .. } => {
            state.detail = Some(movie.clone());
            state.detail_error = None;
            Ok((true, vec![]))
        }
        WorkerResponse::DashboardLoaded { data, .. } => {
            state.dashboard = Some(data.clone());
            state.dashboard_error = None;
            Ok((true, vec![]))
        }
        WorkerResponse::Error { operation, message, .. } => {
            tracing::debug!(operation = %operation, error = %message, "worker reported failure");
            Ok((true, handle_failure(state, *operation, message)))
        }
    }
}

fn sign_in(state: &mut AppState, payload: &AuthPayload, registered: bool) -> Vec<Action> {
    let mut actions = vec![];

    if let Err(e) = state.session.set_session(payload.token.clone(), payload.user.clone()) {
        tracing::warn!(error = %e, "failed to persist session");
        actions.push(Action::Notify(Notification::error(format!(
            "Could not save session: {e}"
        ))));
    }

    state.reset_catalog();
    state.set_route(Route::Home);

    let message = if registered {
        "Account created. Welcome to MovieFlix!"
    } else {
        "Login successful"
    };
    actions.push(Action::Notify(Notification::success(message)));
    actions
}

/// Maps a failed operation to the user-facing outcome. State other than the error
/// slots stays at its last known good value.
fn handle_failure(state: &mut AppState, operation: WorkerOperation, message: &str) -> Vec<Action> {
    match operation {
        WorkerOperation::Login | WorkerOperation::Register => {
            vec![Action::Notify(Notification::error(format!("Login failed: {message}")))]
        }
        WorkerOperation::Logout => {
            vec![Action::Notify(Notification::error(format!("Logout failed: {message}")))]
        }
        WorkerOperation::ForgotPassword => {
            vec![Action::Notify(Notification::error(message))]
        }
        WorkerOperation::Trending | WorkerOperation::Search => {
            let text = if operation == WorkerOperation::Trending {
                "Failed to fetch trending movies."
            } else {
                "Failed to fetch search results."
            };
            state.catalog_error = Some(text.to_string());
            vec![Action::Notify(Notification::error(text))]
        }
        WorkerOperation::Movie => {
            state.detail_error = Some(message.to_string());
            vec![]
        }
        WorkerOperation::Dashboard => {
            state.dashboard_error = Some(message.to_string());
            vec![]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieRecord, UserProfile};
    use crate::storage::MemoryStorage;
    use crate::ui::Theme;

    fn state() -> AppState {
        let session = crate::session::SessionStore::restore(Box::new(MemoryStorage::new())).unwrap();
        AppState::new(session, Theme::default())
    }

    fn posted(actions: &[Action]) -> &WorkerMessage {
        match actions {
            [Action::PostToWorker(message), ..] => message,
            other => panic!("expected worker post, got {other:?}"),
        }
    }

    fn movies(n: usize) -> Vec<MovieRecord> {
        (0..n)
            .map(|i| MovieRecord::new(format!("tt{i}"), format!("Movie {i}")))
            .collect()
    }

    #[test]
    fn test_submit_search_posts_first_page() {
        let mut state = state();
        handle_event(&mut state, &Event::QueryChanged("heat".into())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();

        match posted(&actions) {
            WorkerMessage::Search { query, .. } => {
                assert_eq!(query.query, "heat");
                assert_eq!(query.page, 1);
            }
            other => panic!("unexpected message {other:?}"),
        }
        assert!(state.requests.is_pending(Channel::Catalog));
    }

    #[test]
    fn test_blank_search_is_skipped() {
        let mut state = state();
        handle_event(&mut state, &Event::QueryChanged("   ".into())).unwrap();
        let (_, actions) = handle_event(&mut state, &Event::SubmitSearch).unwrap();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_clearing_query_empties_catalog() {
        let mut state = state();
        state.update_catalog(|c| c.set_movies(movies(3)));
        handle_event(&mut state, &Event::QueryChanged(String::new())).unwrap();
        assert!(state.catalog().movies().is_empty());
    }

    #[test]
    fn test_stale_catalog_response_is_discarded() {
        let mut state = state();
        let (_, first) = handle_event(&mut state, &Event::LoadTrending).unwrap();
        let first_id = posted(&first).request_id();
        let (_, second) = handle_event(&mut state, &Event::LoadTrending).unwrap();
        let second_id = posted(&second).request_id();

        let latest = WorkerResponse::MoviesLoaded {
            request_id: second_id,
            source: MovieSource::Trending,
            movies: movies(2),
        };
        let stale = WorkerResponse::MoviesLoaded {
            request_id: first_id,
            source: MovieSource::Trending,
            movies: movies(5),
        };

        handle_event(&mut state, &Event::WorkerResponse(latest)).unwrap();
        let (redraw, actions) = handle_event(&mut state, &Event::WorkerResponse(stale)).unwrap();

        assert!(!redraw);
        assert!(actions.is_empty());
        assert_eq!(state.catalog().movies().len(), 2);
    }

    #[test]
    fn test_invalid_login_stays_inline() {
        let mut state = state();
        state.set_route(Route::Login);
        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitLogin {
                email: "nope".into(),
                password: "pw".into(),
            },
        )
        .unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.form_error.as_deref(), Some("Please enter a valid email address."));
        assert!(!state.requests.is_pending(Channel::Auth));
    }

    #[test]
    fn test_login_success_sets_session_and_resets_catalog() {
        let mut state = state();
        state.update_catalog(|c| {
            c.set_movies(movies(2));
            c.click_sort(SortKey::Title);
        });

        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitLogin {
                email: "a@b.co".into(),
                password: "pw".into(),
            },
        )
        .unwrap();
        let request_id = posted(&actions).request_id();

        let payload = AuthPayload {
            token: "tok".into(),
            user: UserProfile::new("1", "a@b.co", "user"),
        };
        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::AuthSucceeded {
                request_id,
                payload,
                registered: false,
            }),
        )
        .unwrap();

        assert_eq!(state.session.token(), Some("tok"));
        assert!(state.catalog().movies().is_empty());
        assert_eq!(state.catalog().sort_key(), SortKey::None);
        assert_eq!(state.route, Route::Home);
        assert_eq!(
            actions,
            vec![Action::Notify(Notification::success("Login successful"))]
        );
    }

    #[test]
    fn test_login_failure_notifies_with_backend_message() {
        let mut state = state();
        let (_, actions) = handle_event(
            &mut state,
            &Event::SubmitLogin {
                email: "a@b.co".into(),
                password: "pw".into(),
            },
        )
        .unwrap();
        let request_id = posted(&actions).request_id();

        let (_, actions) = handle_event(
            &mut state,
            &Event::WorkerResponse(WorkerResponse::Error {
                request_id,
                operation: WorkerOperation::Login,
                message: "Invalid credentials".into(),
            }),
        )
        .unwrap();

        assert_eq!(
            actions,
            vec![Action::Notify(Notification::error("Login failed: Invalid credentials"))]
        );
        assert!(!state.session.is_authenticated());
    }

    #[test]
    fn test_non_admin_analytics_issues_no_request() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Navigate(Route::Analytics)).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.route, Route::Analytics);
    }

    #[test]
    fn test_open_movie_fetches_details() {
        let mut state = state();
        state.update_catalog(|c| c.set_movies(movies(2)));

        let (_, actions) = handle_event(&mut state, &Event::OpenMovie(1)).unwrap();
        assert_eq!(state.route, Route::MovieDetails("tt1".into()));
        assert!(matches!(posted(&actions), WorkerMessage::LoadMovie { id, .. } if id == "tt1"));

        let (redraw, actions) = handle_event(&mut state, &Event::OpenMovie(9)).unwrap();
        assert!(!redraw);
        assert!(matches!(actions[0], Action::Notify(_)));
    }

    #[test]
    fn test_export_visible_movies() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::ExportCsv).unwrap();
        assert_eq!(actions, vec![Action::Notify(Notification::info("Nothing to export."))]);

        state.update_catalog(|c| c.set_movies(movies(2)));
        let (_, actions) = handle_event(&mut state, &Event::ExportCsv).unwrap();
        match &actions[0] {
            Action::SaveFile { file_name, mime_type, contents } => {
                assert_eq!(file_name, "movies.csv");
                assert_eq!(*mime_type, "text/csv");
                assert_eq!(contents.matches("\r\n").count(), 3);
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_logout_without_session() {
        let mut state = state();
        let (_, actions) = handle_event(&mut state, &Event::Logout).unwrap();
        assert!(matches!(&actions[0], Action::Notify(n) if n.message == "You are not logged in."));
    }

    #[test]
    fn test_toggle_theme() {
        let mut state = state();
        let before = state.theme.name.clone();
        handle_event(&mut state, &Event::ToggleTheme).unwrap();
        assert_ne!(state.theme.name, before);
    }
}
