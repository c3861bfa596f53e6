//! URL layout of the backend.

/// Fallback base URL when neither config nor environment provide one.
pub const DEFAULT_API_BASE_URL: &str = "https://movie-monengae-be.onrender.com";

/// Absolute endpoint URLs derived from a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// Builds endpoints under `base`. Trailing slashes are dropped.
    ///
    /// ```
    /// use movieflix::api::Endpoints;
    ///
    /// let endpoints = Endpoints::new("http://localhost:5173/");
    /// assert_eq!(endpoints.login(), "http://localhost:5173/api/auth/login");
    /// ```
    #[must_use]
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    #[must_use]
    pub fn login(&self) -> String {
        self.join("/api/auth/login")
    }

    #[must_use]
    pub fn register(&self) -> String {
        self.join("/api/auth/register")
    }

    #[must_use]
    pub fn forgot_password(&self) -> String {
        self.join("/api/auth/forgot-password")
    }

    #[must_use]
    pub fn logout(&self) -> String {
        self.join("/api/auth/logout")
    }

    #[must_use]
    pub fn trending(&self) -> String {
        self.join("/api/movies/trending")
    }

    /// Search endpoint without query string; parameters are attached by the caller.
    #[must_use]
    pub fn search(&self) -> String {
        self.join("/api/movies/search")
    }

    #[must_use]
    pub fn movie(&self, id: &str) -> String {
        self.join(&format!("/api/movies/{}", encode_segment(id)))
    }

    #[must_use]
    pub fn dashboard(&self) -> String {
        self.join("/api/analytics/dashboard")
    }

    fn join(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}
