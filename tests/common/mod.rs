//! Shared fixtures: an in-process backend and helpers that run actions the way
//! the shell does.

#![allow(dead_code)]

use movieflix::api::{CatalogApi, SearchQuery};
use movieflix::app::{Action, Notification};
use movieflix::domain::analytics::{GenreStat, Overview};
use movieflix::domain::{AuthPayload, Credentials, PasswordReset};
use movieflix::storage::MemoryStorage;
use movieflix::worker::{CatalogWorker, WorkerResponse};
use movieflix::{
    handle_event, initialize_with_storage, AppState, Config, DashboardData, Event, MovieRecord,
    MovieflixError, Result, UserProfile,
};

pub const PASSWORD: &str = "secret";

pub fn library() -> Vec<MovieRecord> {
    vec![
        MovieRecord::new("tt1375666", "Inception")
            .with_year(2010)
            .with_genres(["Action", "Sci-Fi"])
            .with_imdb_rating(8.8),
        MovieRecord::new("tt0133093", "The Matrix")
            .with_year(1999)
            .with_genres(["Action", "Sci-Fi"])
            .with_imdb_rating(8.7),
        MovieRecord::new("tt0110912", "Pulp Fiction")
            .with_year(1994)
            .with_genres(["Crime", "Drama"])
            .with_imdb_rating(8.9),
        MovieRecord::new("tt0211915", "Amélie")
            .with_year(2001)
            .with_genres(["Comedy", "Romance"])
            .with_imdb_rating(8.3),
    ]
}

/// Backend double. Emails starting with `admin` sign in as administrators.
pub struct FakeApi {
    pub movies: Vec<MovieRecord>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self { movies: library() }
    }
}

impl FakeApi {
    fn sign_in(credentials: &Credentials) -> Result<AuthPayload> {
        if credentials.password != PASSWORD {
            return Err(MovieflixError::Api {
                status: 401,
                message: "Invalid email or password".to_string(),
            });
        }
        let role = if credentials.email.starts_with("admin") { "admin" } else { "user" };
        Ok(AuthPayload {
            token: format!("tok-{}", credentials.email),
            user: UserProfile::new("u-1", credentials.email.clone(), role),
        })
    }
}

impl CatalogApi for FakeApi {
    fn login(&self, credentials: &Credentials) -> Result<AuthPayload> {
        Self::sign_in(credentials)
    }

    fn register(&self, credentials: &Credentials) -> Result<AuthPayload> {
        Self::sign_in(credentials)
    }

    fn logout(&self, _token: &str) -> Result<()> {
        Ok(())
    }

    fn forgot_password(&self, reset: &PasswordReset) -> Result<()> {
        if reset.email.starts_with("ghost") {
            return Err(MovieflixError::Api {
                status: 404,
                message: "User not found".to_string(),
            });
        }
        Ok(())
    }

    fn trending(&self) -> Result<Vec<MovieRecord>> {
        Ok(self.movies.clone())
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<MovieRecord>> {
        if query.query == "offline" {
            return Err(MovieflixError::Transport("connection refused".to_string()));
        }
        let needle = query.query.to_lowercase();
        Ok(self
            .movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn movie(&self, id: &str) -> Result<MovieRecord> {
        self.movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| MovieflixError::Api {
                status: 404,
                message: "Movie not found".to_string(),
            })
    }

    fn dashboard(&self, token: Option<&str>) -> Result<DashboardData> {
        if !token.is_some_and(|t| t.starts_with("tok-admin")) {
            return Err(MovieflixError::Api {
                status: 403,
                message: "Forbidden".to_string(),
            });
        }
        Ok(DashboardData {
            overview: Overview {
                total_movies: 4,
                total_users: Some(2),
                avg_rating: Some(8.7),
            },
            genres: vec![
                GenreStat {
                    genre: "Action".to_string(),
                    count: 2,
                    avg_rating: Some(8.75),
                },
                GenreStat {
                    genre: "Drama".to_string(),
                    count: 1,
                    avg_rating: Some(8.9),
                },
            ],
            yearly: vec![],
        })
    }
}

pub fn app() -> AppState {
    app_with_storage(MemoryStorage::new())
}

pub fn app_with_storage(storage: MemoryStorage) -> AppState {
    initialize_with_storage(&Config::default(), Box::new(storage)).unwrap()
}

/// Drives one event to completion: every posted request is answered by the
/// worker synchronously and fed back. Returns the notifications shown and the
/// remaining (non-worker) actions.
pub fn run(
    state: &mut AppState,
    worker: &CatalogWorker<FakeApi>,
    event: Event,
) -> (Vec<Notification>, Vec<Action>) {
    let mut notifications = Vec::new();
    let mut other = Vec::new();
    let mut queue = vec![event];

    while let Some(event) = queue.pop() {
        let (_, actions) = handle_event(state, &event).unwrap();
        for action in actions {
            match action {
                Action::PostToWorker(message) => {
                    queue.push(Event::WorkerResponse(worker.handle_message(message)));
                }
                Action::Notify(notification) => notifications.push(notification),
                action => other.push(action),
            }
        }
    }

    (notifications, other)
}

/// Issues an event and returns the worker's response without feeding it back.
pub fn respond_later(
    state: &mut AppState,
    worker: &CatalogWorker<FakeApi>,
    event: Event,
) -> Vec<WorkerResponse> {
    let (_, actions) = handle_event(state, &event).unwrap();
    actions
        .into_iter()
        .filter_map(|action| match action {
            Action::PostToWorker(message) => Some(worker.handle_message(message)),
            _ => None,
        })
        .collect()
}

pub fn messages(notifications: &[Notification]) -> Vec<&str> {
    notifications.iter().map(|n| n.message.as_str()).collect()
}

pub fn titles(state: &AppState) -> Vec<String> {
    state.visible_movies().iter().map(|m| m.title.clone()).collect()
}
