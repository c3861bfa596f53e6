//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the running client: the catalog
//! inputs, the session, the current route, per-page fetch results and the request
//! sequencing state. It is mutated only by the event handler.
//!
//! # Architecture
//!
//! `AppState` separates the catalog inputs ([`CatalogState`]) from the derived
//! projection. The projection is cached together with the catalog revision it was
//! computed from and only recomputed after the catalog actually changed, which is
//! why the catalog can only be mutated through [`AppState::update_catalog`].
//!
//! # Example
//!
//! ```rust
//! use movieflix::app::AppState;
//! use movieflix::session::SessionStore;
//! use movieflix::storage::MemoryStorage;
//! use movieflix::ui::Theme;
//! use movieflix::MovieRecord;
//!
//! let session = SessionStore::restore(Box::new(MemoryStorage::new()))?;
//! let mut state = AppState::new(session, Theme::default());
//! state.update_catalog(|c| c.set_movies(vec![MovieRecord::new("1", "Heat")]));
//! assert_eq!(state.visible_movies().len(), 1);
//!
//! let viewmodel = state.compute_viewmodel();
//! assert_eq!(viewmodel.header.title, "MovieFlix");
//! # Ok::<(), movieflix::MovieflixError>(())
//! ```

use super::catalog::{project, CatalogState};
use super::modes::SortKey;
use super::requests::{Channel, RequestTracker};
use super::routes::Route;
use crate::domain::{DashboardData, MovieRecord};
use crate::session::{gate, Access, SessionStore, ACCESS_DENIED_MESSAGE};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    AnalyticsView, Body, CatalogView, DetailView, DisplayItem, EmptyState, FooterInfo, FormView,
    GenreChip, HeaderInfo, SearchBarInfo, SortButton, UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;

const APP_TITLE: &str = "MovieFlix";
const EMPTY_CATALOG: &str = "No movies — type to search & press Enter";
const NO_MATCHES: &str = "No movies match the current filters";

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Inputs of the catalog projection. Private so every change goes through
    /// [`AppState::update_catalog`] and keeps the cached projection coherent.
    catalog: CatalogState,

    /// Cached result of [`project`] over `catalog`.
    projection: Vec<MovieRecord>,

    /// Catalog revision `projection` was computed from.
    projection_revision: u64,

    /// Signed-in user and token, persisted through the session storage.
    pub session: SessionStore,

    pub route: Route,

    /// Active color scheme. Toggled at runtime, never persisted.
    pub theme: Theme,

    /// Latest outstanding request per channel.
    pub requests: RequestTracker,

    /// Last catalog fetch failure, shown above the grid.
    pub catalog_error: Option<String>,

    /// Movie shown on the details page.
    pub detail: Option<MovieRecord>,
    pub detail_error: Option<String>,

    pub dashboard: Option<DashboardData>,
    pub dashboard_error: Option<String>,

    /// Inline error of the auth form on screen.
    pub form_error: Option<String>,
}

impl AppState {
    /// Creates a state on the home route with an empty catalog.
    #[must_use]
    pub fn new(session: SessionStore, theme: Theme) -> Self {
        let catalog = CatalogState::new();
        let projection_revision = catalog.revision();
        Self {
            catalog,
            projection: Vec::new(),
            projection_revision,
            session,
            route: Route::Home,
            theme,
            requests: RequestTracker::new(),
            catalog_error: None,
            detail: None,
            detail_error: None,
            dashboard: None,
            dashboard_error: None,
            form_error: None,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    /// Applies `change` to the catalog and refreshes the cached projection if the
    /// catalog revision moved.
    pub fn update_catalog<F>(&mut self, change: F)
    where
        F: FnOnce(&mut CatalogState),
    {
        change(&mut self.catalog);
        self.refresh_projection();
    }

    /// Movies currently visible on the home page, in display order.
    #[must_use]
    pub fn visible_movies(&self) -> &[MovieRecord] {
        &self.projection
    }

    /// Resets the catalog to its initial state and drops any in-flight catalog
    /// fetch, so a late answer cannot refill it.
    pub fn reset_catalog(&mut self) {
        self.requests.cancel(Channel::Catalog);
        self.catalog_error = None;
        self.update_catalog(CatalogState::reset);
    }

    /// Switches the route and clears per-page leftovers of the previous one.
    pub fn set_route(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigating");

        if !matches!(route, Route::MovieDetails(_)) {
            self.requests.cancel(Channel::Detail);
        }
        if route != Route::Analytics {
            self.requests.cancel(Channel::Dashboard);
        }

        self.detail = None;
        self.detail_error = None;
        self.dashboard = None;
        self.dashboard_error = None;
        self.form_error = None;
        self.route = route;
    }

    /// Recomputes the projection when the catalog changed since the last run.
    fn refresh_projection(&mut self) {
        if self.catalog.revision() == self.projection_revision {
            return;
        }

        let _span = tracing::debug_span!("refresh_projection",
            total = self.catalog.movies().len(),
            revision = self.catalog.revision()
        )
        .entered();

        self.projection = project(&self.catalog);
        self.projection_revision = self.catalog.revision();

        tracing::debug!(visible = self.projection.len(), "projection refreshed");
    }

    /// Computes a renderable UI view model from current state.
    #[must_use]
    pub fn compute_viewmodel(&self) -> UIViewModel {
        let body = match gate(&self.route, &self.session) {
            Access::Denied => Body::AccessDenied {
                message: ACCESS_DENIED_MESSAGE.to_string(),
            },
            Access::Granted => self.compute_body(),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
        }
    }

    fn compute_body(&self) -> Body {
        match &self.route {
            Route::Home => Body::Catalog(self.compute_catalog()),
            Route::MovieDetails(id) => Body::MovieDetails(self.compute_detail(id)),
            Route::Analytics => Body::Analytics(self.compute_analytics()),
            Route::Login => Body::Form(self.compute_form(
                "Log in",
                "login <email> <password>   (forgot password? go /forgot-password)",
            )),
            Route::SignUp => Body::Form(self.compute_form(
                "Create account",
                "signup <email> <password> <confirm-password> agree",
            )),
            Route::ForgotPassword => Body::Form(self.compute_form(
                "Reset password",
                "forgot <email> <new-password> <confirm-password>",
            )),
            Route::Terms => Body::Static {
                title: "Terms of Service".to_string(),
                text: "Use of MovieFlix is subject to the service terms published by the operator."
                    .to_string(),
            },
            Route::Privacy => Body::Static {
                title: "Privacy Policy".to_string(),
                text: "MovieFlix stores your session token locally so you stay signed in."
                    .to_string(),
            },
            Route::NotFound(path) => Body::NotFound { path: path.clone() },
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        HeaderInfo {
            title: APP_TITLE.to_string(),
            user_label: self
                .session
                .current_user()
                .map(|user| format!("{} {}", user.initials(), user.email)),
            show_stats: self.session.is_admin(),
        }
    }

    fn compute_catalog(&self) -> CatalogView {
        let selected = self.catalog.genres();
        let mut genre_bar: Vec<GenreChip> = self
            .catalog
            .available_genres()
            .into_iter()
            .map(|label| GenreChip {
                selected: selected.iter().any(|s| s.eq_ignore_ascii_case(&label)),
                label,
            })
            .collect();
        // Selected genres that no longer occur in the results stay visible so
        // they can be deselected.
        for genre in selected {
            if !genre_bar.iter().any(|chip| chip.label.eq_ignore_ascii_case(genre)) {
                genre_bar.push(GenreChip {
                    label: genre.clone(),
                    selected: true,
                });
            }
        }

        let sort_bar = [SortKey::Rating, SortKey::Year, SortKey::Title]
            .into_iter()
            .map(|key| {
                let active = self.catalog.sort_key() == key;
                SortButton {
                    label: key.as_str().to_string(),
                    active,
                    arrow: active.then(|| self.catalog.sort_direction().arrow()),
                }
            })
            .collect();

        let matcher = (!self.catalog.query().is_empty()).then(SkimMatcherV2::default);
        let items: Vec<DisplayItem> = self
            .projection
            .iter()
            .enumerate()
            .map(|(i, movie)| self.compute_display_item(i + 1, movie, matcher.as_ref()))
            .collect();

        let loading = self.requests.is_pending(Channel::Catalog);
        let empty_state = if !items.is_empty() || loading {
            None
        } else if self.catalog.movies().is_empty() {
            Some(EmptyState {
                message: EMPTY_CATALOG.to_string(),
                subtitle: "or run `trending` to see what is popular".to_string(),
            })
        } else {
            Some(EmptyState {
                message: NO_MATCHES.to_string(),
                subtitle: "clear the genre filter or change the search text".to_string(),
            })
        };

        CatalogView {
            search_bar: SearchBarInfo {
                query: self.catalog.query().to_string(),
            },
            genre_bar,
            sort_bar,
            items,
            total: self.catalog.movies().len(),
            loading,
            error: self.catalog_error.clone(),
            empty_state,
        }
    }

    fn compute_display_item(
        &self,
        index: usize,
        movie: &MovieRecord,
        matcher: Option<&SkimMatcherV2>,
    ) -> DisplayItem {
        DisplayItem {
            index,
            title: movie.title.clone(),
            year: movie.year.map(|y| y.to_string()).unwrap_or_default(),
            genres: movie.genres.join(", "),
            rating: movie
                .imdb_rating
                .map(|r| format!("★ {r:.1}"))
                .unwrap_or_default(),
            highlight_ranges: matcher
                .map_or_else(Vec::new, |m| self.compute_highlight_ranges(&movie.title, m)),
        }
    }

    /// Coalesces fuzzy match indices of the query in `text` into ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.catalog.query()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_detail(&self, id: &str) -> DetailView {
        let loading = self.requests.is_pending(Channel::Detail);
        let Some(movie) = self.detail.as_ref().filter(|m| m.id == id) else {
            return DetailView {
                loading,
                error: self.detail_error.clone(),
                title: String::new(),
                fields: vec![],
                plot: None,
            };
        };

        let mut fields: Vec<(String, String)> = Vec::new();
        let mut push = |label: &str, value: String| {
            if !value.trim().is_empty() {
                fields.push((label.to_string(), value));
            }
        };

        push("Year", movie.year.map(|y| y.to_string()).unwrap_or_default());
        push("Genres", movie.genres.join(", "));
        push("Director", movie.director.clone());
        push("Actors", movie.actors.join(", "));
        push("Runtime", movie.runtime.map(|r| format!("{r} min")).unwrap_or_default());
        push("Language", movie.language.clone());
        push("Country", movie.country.clone());
        push(
            "IMDb",
            movie
                .imdb_rating
                .map(|r| {
                    if movie.imdb_votes.is_empty() {
                        format!("{r:.1}/10")
                    } else {
                        format!("{r:.1}/10 ({} votes)", movie.imdb_votes)
                    }
                })
                .unwrap_or_default(),
        );
        push("Metascore", movie.metascore.map(|m| format!("{m:.0}")).unwrap_or_default());
        push("Box office", movie.box_office.clone());
        push("Awards", movie.awards.clone());

        DetailView {
            loading,
            error: self.detail_error.clone(),
            title: movie.title.clone(),
            fields,
            plot: Some(movie.plot.clone()).filter(|p| !p.trim().is_empty()),
        }
    }

    fn compute_analytics(&self) -> AnalyticsView {
        let data = self.dashboard.clone().unwrap_or_default();

        AnalyticsView {
            loading: self.requests.is_pending(Channel::Dashboard),
            error: self.dashboard_error.clone(),
            total_movies: data.overview.total_movies,
            total_users: data.overview.total_users,
            avg_rating: data.overview.avg_rating,
            genre_shares: data
                .genre_shares()
                .into_iter()
                .map(|share| (share.genre, share.percentage))
                .collect(),
            yearly: data
                .yearly
                .into_iter()
                .map(|stat| (stat.year, stat.avg_runtime))
                .collect(),
        }
    }

    fn compute_form(&self, title: &str, usage: &str) -> FormView {
        FormView {
            title: title.to_string(),
            usage: usage.to_string(),
            error: self.form_error.clone(),
            submitting: self.requests.is_pending(Channel::Auth),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let account = if self.session.is_authenticated() {
            "logout"
        } else {
            "go /login  go /signup"
        };
        let stats = if self.session.is_admin() { "  stats" } else { "" };

        let keybindings = match self.route {
            Route::Home => format!(
                "search <text>  filter <text>  trending  genre <name>  sort rating|year|title  open <n>  export  {account}{stats}  theme  quit"
            ),
            Route::MovieDetails(_) | Route::Analytics => {
                format!("home: back to catalog  {account}  theme  quit")
            }
            Route::Login | Route::SignUp | Route::ForgotPassword => {
                "home: back to catalog  theme  quit".to_string()
            }
            Route::Terms | Route::Privacy | Route::NotFound(_) => {
                "home: back to catalog  quit".to_string()
            }
        };

        FooterInfo { keybindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::UserProfile;

    fn state() -> AppState {
        let session = SessionStore::restore(Box::new(MemoryStorage::new())).unwrap();
        AppState::new(session, Theme::default())
    }

    fn movies() -> Vec<MovieRecord> {
        vec![
            MovieRecord::new("tt1", "Inception")
                .with_year(2010)
                .with_genres(["Action", "Sci-Fi"])
                .with_imdb_rating(8.8),
            MovieRecord::new("tt2", "Amélie")
                .with_year(2001)
                .with_genres(["Drama"]),
        ]
    }

    #[test]
    fn test_projection_follows_catalog_changes() {
        let mut state = state();
        state.update_catalog(|c| c.set_movies(movies()));
        assert_eq!(state.visible_movies().len(), 2);

        state.update_catalog(|c| c.toggle_genre("drama"));
        assert_eq!(state.visible_movies()[0].title, "Amélie");

        state.reset_catalog();
        assert!(state.visible_movies().is_empty());
    }

    #[test]
    fn test_empty_catalog_shows_prompt() {
        let vm = state().compute_viewmodel();
        match vm.body {
            Body::Catalog(view) => {
                let empty = view.empty_state.expect("empty state");
                assert_eq!(empty.message, EMPTY_CATALOG);
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[test]
    fn test_filtered_out_catalog_shows_no_matches() {
        let mut state = state();
        state.update_catalog(|c| {
            c.set_movies(movies());
            c.set_query("zzz");
        });

        let Body::Catalog(view) = state.compute_viewmodel().body else {
            panic!("expected catalog");
        };
        assert_eq!(view.total, 2);
        assert_eq!(view.empty_state.map(|e| e.message).as_deref(), Some(NO_MATCHES));
    }

    #[test]
    fn test_catalog_view_marks_active_sort_and_genres() {
        let mut state = state();
        state.update_catalog(|c| {
            c.set_movies(movies());
            c.toggle_genre("Drama");
            c.click_sort(SortKey::Year);
        });

        let Body::Catalog(view) = state.compute_viewmodel().body else {
            panic!("expected catalog");
        };

        let year = view.sort_bar.iter().find(|b| b.label == "year").unwrap();
        assert!(year.active);
        assert_eq!(year.arrow, Some("↓"));
        assert!(view.genre_bar.iter().any(|g| g.label == "Drama" && g.selected));
        assert!(view.genre_bar.iter().any(|g| g.label == "Action" && !g.selected));
        assert_eq!(view.items[0].index, 1);
    }

    #[test]
    fn test_query_highlights_title() {
        let mut state = state();
        state.update_catalog(|c| {
            c.set_movies(movies());
            c.set_query("incep");
        });

        let Body::Catalog(view) = state.compute_viewmodel().body else {
            panic!("expected catalog");
        };
        assert_eq!(view.items[0].highlight_ranges, vec![(0, 5)]);
    }

    #[test]
    fn test_analytics_denied_in_place_for_non_admin() {
        let mut state = state();
        state
            .session
            .set_session("t", UserProfile::new("1", "joe@movieflix.io", "user"))
            .unwrap();
        state.set_route(Route::Analytics);

        let vm = state.compute_viewmodel();
        assert_eq!(
            vm.body,
            Body::AccessDenied {
                message: ACCESS_DENIED_MESSAGE.to_string()
            }
        );
        assert!(!vm.header.show_stats);
        assert_eq!(state.route, Route::Analytics);
    }

    #[test]
    fn test_header_for_admin() {
        let mut state = state();
        state
            .session
            .set_session("t", UserProfile::new("1", "root.admin@movieflix.io", "admin"))
            .unwrap();

        let header = state.compute_viewmodel().header;
        assert!(header.show_stats);
        assert_eq!(header.user_label.as_deref(), Some("RA root.admin@movieflix.io"));
    }

    #[test]
    fn test_detail_view_omits_empty_fields() {
        let mut state = state();
        state.set_route(Route::MovieDetails("tt1".into()));
        state.detail = Some(movies().remove(0));

        let Body::MovieDetails(view) = state.compute_viewmodel().body else {
            panic!("expected details");
        };
        assert_eq!(view.title, "Inception");
        let labels: Vec<_> = view.fields.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, ["Year", "Genres", "IMDb"]);
        assert_eq!(view.plot, None);
    }
}
