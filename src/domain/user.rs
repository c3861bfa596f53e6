//! Authenticated user profile and the credential shapes used to obtain one.

use serde::{Deserialize, Serialize};

/// Role value that grants access to admin-only views.
pub const ADMIN_ROLE: &str = "admin";

/// Profile of the signed-in user as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    /// Authorization role; `"admin"` is the only value the client interprets.
    pub role: String,
    #[serde(default)]
    pub is_active: bool,
}

impl UserProfile {
    #[must_use]
    pub fn new(id: impl Into<String>, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            role: role.into(),
            is_active: true,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }

    /// Up to two uppercase initials taken from the email's local part.
    ///
    /// ```
    /// use movieflix::UserProfile;
    ///
    /// let user = UserProfile::new("1", "jane.doe@example.com", "user");
    /// assert_eq!(user.initials(), "JD");
    /// ```
    #[must_use]
    pub fn initials(&self) -> String {
        let local = self.email.split('@').next().unwrap_or_default();
        local
            .split(|c: char| c == '.' || c == '_' || c == '-' || c.is_whitespace())
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Email and password submitted to the login and register endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload of the forgot-password endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordReset {
    pub email: String,
    pub new_password: String,
}

/// Token and profile returned by a successful login or registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: UserProfile,
}
