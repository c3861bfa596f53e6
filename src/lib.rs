//! MovieFlix: a terminal client for the MovieFlix movie catalog.
//!
//! The crate provides:
//! - A catalog view-model with free-text search, multi-genre filtering and
//!   multi-key sorting over the fetched movies
//! - A session store holding the auth token and user profile, persisted to disk
//!   and restored at startup, gating admin-only views
//! - CSV export of the visible catalog
//! - A blocking HTTP backend client running on a background worker thread

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shell (main.rs)                           │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Command parsing and event handling               │
//! │  - Catalog projection and request sequencing        │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Session Layer │   │ Worker Layer  │
//! │ (ui/)         │   │ (session/,    │   │ (worker/,     │
//! │ - Rendering   │   │  storage/)    │   │  api/)        │
//! │ - Theming     │   │ - Auth state  │   │ - HTTP calls  │
//! │               │   │ - JSON I/O    │   │ - Tracing ctx │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure, Domain & Export                    │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Movie, user, analytics models (domain/)          │
//! │  - CSV serialization (export/)                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing to a local OTLP file       │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! Values are layered, later sources winning:
//!
//! 1. Built-in defaults
//! 2. `movieflix.toml` in the data directory, or the file passed with `--config`
//! 3. `key=value` overrides from the command line
//! 4. The `MOVIEFLIX_API_BASE_URL` environment variable
//!
//! ```toml
//! api_base_url = "https://movie-monengae-be.onrender.com"
//! export_dir = "~/Downloads"
//! theme = "movieflix-light"
//! trace_level = "debug"
//! request_timeout_secs = 20
//! ```
//!
//! # Example
//!
//! ```rust
//! use movieflix::storage::MemoryStorage;
//! use movieflix::{handle_event, initialize_with_storage, Config, Event};
//!
//! let mut state = initialize_with_storage(&Config::default(), Box::new(MemoryStorage::new()))?;
//!
//! let (render, actions) = handle_event(&mut state, &Event::QueryChanged("matrix".into()))?;
//! assert!(render);
//! assert!(actions.is_empty());
//! # Ok::<(), movieflix::MovieflixError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod export;
pub mod infrastructure;
pub mod session;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, parse_command, Action, AppState, Event, Route};
pub use domain::{DashboardData, MovieRecord, MovieflixError, Result, UserProfile};
pub use ui::Theme;

use api::DEFAULT_API_BASE_URL;
use infrastructure::paths;
use serde::Deserialize;
use session::SessionStore;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use storage::{JsonStorage, SessionStorage};

/// Environment variable overriding the backend base URL.
pub const API_BASE_URL_ENV: &str = "MOVIEFLIX_API_BASE_URL";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Backend root, without the `/api` suffix.
    pub api_base_url: String,

    /// Holds `session.json`, `movieflix.toml` and the trace file.
    pub data_dir: PathBuf,

    /// Where `export` writes `movies.csv`.
    pub export_dir: PathBuf,

    /// `trace`, `debug`, `info`, `warn` or `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Built-in theme: `movieflix-dark` or `movieflix-light`. Ignored if
    /// `theme_file` is set.
    #[serde(rename = "theme")]
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Per-request timeout for backend calls.
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            data_dir: paths::default_data_dir(),
            export_dir: paths::default_export_dir(),
            trace_level: None,
            theme_name: None,
            theme_file: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Config`] if the document is not valid TOML or
    /// contains unknown keys.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)
            .map_err(|e| MovieflixError::Config(format!("invalid config: {e}")))?;
        Ok(config.expand_paths())
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Config`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MovieflixError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Applies `key=value` overrides.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base_url`, `trace_level`, `theme`, `theme_file`: taken verbatim
    /// - `data_dir`, `export_dir`: `~` is expanded
    /// - `request_timeout_secs`: ignored unless it parses as a positive integer
    /// - unknown keys are ignored with a debug log
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use movieflix::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("theme".to_string(), "light".to_string());
    /// map.insert("request_timeout_secs".to_string(), "5".to_string());
    ///
    /// let config = Config::default().with_overrides(&map);
    /// assert_eq!(config.theme_name.as_deref(), Some("light"));
    /// assert_eq!(config.request_timeout_secs, 5);
    /// ```
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (key, value) in overrides {
            match key.as_str() {
                "api_base_url" => self.api_base_url.clone_from(value),
                "data_dir" => self.data_dir = paths::expand_tilde(value),
                "export_dir" => self.export_dir = paths::expand_tilde(value),
                "trace_level" => self.trace_level = Some(value.clone()),
                "theme" => self.theme_name = Some(value.clone()),
                "theme_file" => self.theme_file = Some(value.clone()),
                "request_timeout_secs" => {
                    if let Some(secs) = value.parse::<u64>().ok().filter(|s| *s > 0) {
                        self.request_timeout_secs = secs;
                    }
                }
                other => tracing::debug!(key = %other, "ignoring unknown config override"),
            }
        }
        self
    }

    /// Applies environment overrides through `lookup`.
    #[must_use]
    pub fn with_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }

    /// Resolves the full precedence chain.
    ///
    /// An explicit `config_path` must exist. Without one, `movieflix.toml` in the
    /// default data directory is used if present.
    ///
    /// # Errors
    ///
    /// Returns [`MovieflixError::Config`] if a config file cannot be read or parsed.
    pub fn load(config_path: Option<&Path>, overrides: &BTreeMap<String, String>) -> Result<Self> {
        let base = match config_path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = paths::config_file_path(&paths::default_data_dir());
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        Ok(base
            .with_overrides(overrides)
            .with_env(|key| std::env::var(key).ok()))
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    fn expand_paths(mut self) -> Self {
        self.data_dir = paths::expand_tilde(&self.data_dir.to_string_lossy());
        self.export_dir = paths::expand_tilde(&self.export_dir.to_string_lossy());
        self
    }
}

/// Creates the application state with the session stored in the data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or the session file
/// cannot be read.
pub fn initialize(config: &Config) -> Result<AppState> {
    let storage = JsonStorage::new(paths::session_file_path(&config.data_dir))?;
    initialize_with_storage(config, Box::new(storage))
}

/// Creates the application state over an arbitrary session backend.
///
/// The theme comes from `theme_file`, then `theme_name`, then the default; a theme
/// that fails to load falls back to the default.
///
/// # Errors
///
/// Returns an error if the session cannot be restored from `storage`.
pub fn initialize_with_storage(
    config: &Config,
    storage: Box<dyn SessionStorage>,
) -> Result<AppState> {
    tracing::debug!(api_base_url = %config.api_base_url, "initializing movieflix");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "unknown theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(paths::expand_tilde(theme_file)).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let session = SessionStore::restore(storage)?;
    Ok(AppState::new(session, theme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_toml_keeps_defaults_for_missing_keys() {
        let config = Config::from_toml_str(
            r#"
api_base_url = "http://localhost:8080"
theme = "light"
"#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.theme_name.as_deref(), Some("light"));
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.data_dir, Config::default().data_dir);
    }

    #[test]
    fn test_toml_rejects_unknown_keys() {
        let err = Config::from_toml_str("scan_depth = 4").unwrap_err();
        assert!(matches!(err, MovieflixError::Config(_)));
    }

    #[test]
    fn test_precedence_file_then_overrides_then_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movieflix.toml");
        std::fs::write(
            &path,
            "api_base_url = \"http://file\"\ntrace_level = \"warn\"\nrequest_timeout_secs = 9\n",
        )
        .unwrap();

        let mut overrides = BTreeMap::new();
        overrides.insert("api_base_url".to_string(), "http://flag".to_string());
        overrides.insert("request_timeout_secs".to_string(), "zero".to_string());

        let config = Config::from_file(&path).unwrap().with_overrides(&overrides);
        assert_eq!(config.api_base_url, "http://flag");
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
        assert_eq!(config.request_timeout(), Duration::from_secs(9));

        let config = config.with_env(|key| {
            (key == API_BASE_URL_ENV).then(|| "http://env".to_string())
        });
        assert_eq!(config.api_base_url, "http://env");

        let config = config.with_env(|_| Some("  ".to_string()));
        assert_eq!(config.api_base_url, "http://env");
    }

    #[test]
    fn test_explicit_missing_config_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml")), &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, MovieflixError::Config(_)));
    }

    #[test]
    fn test_initialize_picks_theme() {
        let config = Config {
            theme_name: Some("light".to_string()),
            ..Config::default()
        };
        let state = initialize_with_storage(&config, Box::new(MemoryStorage::new())).unwrap();
        assert_eq!(state.theme, Theme::light());

        let config = Config {
            theme_name: Some("light".to_string()),
            theme_file: Some("/definitely/not/here.toml".to_string()),
            ..Config::default()
        };
        let state = initialize_with_storage(&config, Box::new(MemoryStorage::new())).unwrap();
        assert_eq!(state.theme, Theme::default());
    }

    #[test]
    fn test_initialize_with_json_storage() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().join("nested"),
            ..Config::default()
        };

        let state = initialize(&config).unwrap();
        assert!(!state.session.is_authenticated());
        assert!(config.data_dir.exists());
    }
}
