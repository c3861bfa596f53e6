//! Form validation for the auth pages.
//!
//! Validation failures are shown inline on the form and never reach the backend.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    /// Something@something.tld with no whitespace or extra `@`.
    static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// A form input the user has to correct before submitting again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Please agree to the terms and conditions.")]
    TermsNotAccepted,

    #[error("{0} is required.")]
    Missing(&'static str),
}

/// Checks an email address against the client-side pattern.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] when the address does not match.
///
/// ```
/// use movieflix::app::validation::validate_email;
///
/// assert!(validate_email("jane@example.com").is_ok());
/// assert!(validate_email("jane@example").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Login form: a valid email and a non-empty password.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::Missing("Password"));
    }
    Ok(())
}

/// Sign-up form: matching passwords, accepted terms and a valid email.
///
/// # Errors
///
/// Returns the first failing rule, checked in the order the form reports them.
pub fn validate_sign_up(
    email: &str,
    password: &str,
    confirm_password: &str,
    agree_to_terms: bool,
) -> Result<(), ValidationError> {
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if !agree_to_terms {
        return Err(ValidationError::TermsNotAccepted);
    }
    validate_email(email)?;
    if password.is_empty() {
        return Err(ValidationError::Missing("Password"));
    }
    Ok(())
}

/// Forgot-password form: matching new passwords and an email.
///
/// # Errors
///
/// Returns the first failing rule.
pub fn validate_password_reset(
    email: &str,
    new_password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if new_password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if email.trim().is_empty() {
        return Err(ValidationError::Missing("Email"));
    }
    if new_password.is_empty() {
        return Err(ValidationError::Missing("New password"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@sub.example.org").is_ok());

        assert_eq!(validate_email(""), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("no-at-sign.com"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a b@c.io"), Err(ValidationError::InvalidEmail));
        assert_eq!(validate_email("a@@c.io"), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_sign_up_rule_order() {
        assert_eq!(
            validate_sign_up("bad", "one", "two", false),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_sign_up("bad", "pw", "pw", false),
            Err(ValidationError::TermsNotAccepted)
        );
        assert_eq!(
            validate_sign_up("bad", "pw", "pw", true),
            Err(ValidationError::InvalidEmail)
        );
        assert!(validate_sign_up("new@movieflix.io", "pw", "pw", true).is_ok());
    }

    #[test]
    fn test_password_reset() {
        assert_eq!(
            validate_password_reset("a@b.co", "x", "y"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_reset("", "x", "x"),
            Err(ValidationError::Missing("Email"))
        );
        assert!(validate_password_reset("a@b.co", "x", "x").is_ok());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::PasswordMismatch.to_string(), "Passwords do not match.");
        assert_eq!(ValidationError::Missing("Password").to_string(), "Password is required.");
    }
}
