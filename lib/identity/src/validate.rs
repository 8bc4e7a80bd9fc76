//! Field-level validators for the login form.
//!
//! These run locally and synchronously; they exist to block obviously
//! malformed input before the provider is contacted. `None` means the
//! field is acceptable, `Some(message)` is the field-scoped error.

use validator::ValidateEmail;

/// Minimum password length accepted locally.
///
/// Matches the provider's documented minimum so local validation never
/// passes something the provider would reject on length alone.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Checks that the input has the shape of an email address.
#[must_use]
pub fn validate_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        return Some("Email is required".to_string());
    }
    if !email.validate_email() {
        return Some("Enter a valid email address".to_string());
    }
    None
}

/// Checks the local minimum password policy.
#[must_use]
pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".to_string());
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Some(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    None
}
