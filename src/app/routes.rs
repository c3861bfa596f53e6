//! Client routes.
//!
//! The shell navigates between these views; [`Route::parse`] accepts the same paths
//! as the web client so links and history entries stay interchangeable.

use std::fmt;

/// A navigable view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Catalog search page (`/`).
    Home,
    Login,
    SignUp,
    ForgotPassword,
    /// Detail page of one movie (`/movie/:id`).
    MovieDetails(String),
    /// Admin dashboard (`/analytics`).
    Analytics,
    Terms,
    Privacy,
    /// Anything unrecognized; keeps the requested path for display.
    NotFound(String),
}

impl Route {
    /// Parses a path, ignoring any query string, fragment or trailing slash.
    ///
    /// ```
    /// use movieflix::app::Route;
    ///
    /// assert_eq!(Route::parse("/movie/tt1375666"), Route::MovieDetails("tt1375666".into()));
    /// assert_eq!(Route::parse("/analytics/"), Route::Analytics);
    /// assert_eq!(Route::parse("/nope"), Route::NotFound("/nope".into()));
    /// ```
    #[must_use]
    pub fn parse(path: &str) -> Self {
        let clean = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim();
        let trimmed = clean.trim_end_matches('/');

        match trimmed {
            "" => Self::Home,
            "/login" => Self::Login,
            "/signup" => Self::SignUp,
            "/forgot-password" => Self::ForgotPassword,
            "/analytics" => Self::Analytics,
            "/terms" => Self::Terms,
            "/privacy" => Self::Privacy,
            other => other
                .strip_prefix("/movie/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map_or_else(|| Self::NotFound(clean.to_string()), |id| Self::MovieDetails(id.to_string())),
        }
    }

    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_string(),
            Self::Login => "/login".to_string(),
            Self::SignUp => "/signup".to_string(),
            Self::ForgotPassword => "/forgot-password".to_string(),
            Self::MovieDetails(id) => format!("/movie/{id}"),
            Self::Analytics => "/analytics".to_string(),
            Self::Terms => "/terms".to_string(),
            Self::Privacy => "/privacy".to_string(),
            Self::NotFound(path) => path.clone(),
        }
    }

    /// Whether the route needs the admin role.
    #[must_use]
    pub const fn requires_admin(&self) -> bool {
        matches!(self, Self::Analytics)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_routes() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/login"), Route::Login);
        assert_eq!(Route::parse("/signup?ref=home"), Route::SignUp);
        assert_eq!(Route::parse("/forgot-password"), Route::ForgotPassword);
        assert_eq!(Route::parse("/terms"), Route::Terms);
        assert_eq!(Route::parse("/privacy#top"), Route::Privacy);
    }

    #[test]
    fn test_movie_route_needs_single_segment() {
        assert_eq!(Route::parse("/movie/"), Route::NotFound("/movie/".into()));
        assert_eq!(Route::parse("/movie/a/b"), Route::NotFound("/movie/a/b".into()));
    }

    #[test]
    fn test_path_round_trips() {
        for route in [
            Route::Home,
            Route::Login,
            Route::MovieDetails("tt0111161".into()),
            Route::Analytics,
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
