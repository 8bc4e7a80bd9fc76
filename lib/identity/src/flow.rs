//! Login and signup flows.
//!
//! These functions hold the submission semantics the pages render:
//! which checks run locally, when the provider is contacted, and what
//! message a failure surfaces. The two flows deliberately differ:
//!
//! - Login validates both fields locally and collapses every provider
//!   failure into one generic message, so a response never reveals
//!   whether an account exists.
//! - Signup only checks password/confirmation equality locally and
//!   surfaces the provider's own rejection message verbatim, falling
//!   back to a generic one when the failure carries no message.

use crate::error::ProviderError;
use crate::provider::IdentityProvider;
use crate::session::{Persistence, Session};
use crate::validate::{validate_email, validate_password};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// The single message shown for any login rejection.
pub const LOGIN_REJECTED_MESSAGE: &str = "Invalid email or password";

/// Shown when signup fails without a provider message.
pub const SIGNUP_FALLBACK_MESSAGE: &str = "Failed to create account";

/// Shown when the signup passwords differ.
pub const PASSWORD_MISMATCH_MESSAGE: &str = "Passwords do not match";

/// Per-field validation messages for the login form.
///
/// A field's entry is cleared as soon as the field is edited again;
/// submission is blocked while any entry is present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldErrors {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    /// Returns true if no field carries an error.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Input to the login flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
}

impl LoginForm {
    /// Runs the local field validators.
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        FieldErrors {
            email: validate_email(&self.email),
            password: validate_password(&self.password),
        }
    }

    /// Persistence mode implied by the "remember me" choice.
    #[must_use]
    pub fn persistence(&self) -> Persistence {
        if self.remember {
            Persistence::Durable
        } else {
            Persistence::SessionScoped
        }
    }
}

/// Why a login submission did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// Local validation failed; the provider was not contacted.
    Blocked(FieldErrors),
    /// The provider turned the attempt down, for any reason.
    Rejected,
}

impl LoginError {
    /// The message to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Blocked(_) => "",
            Self::Rejected => LOGIN_REJECTED_MESSAGE,
        }
    }
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blocked(errors) => {
                write!(f, "login blocked by local validation: {errors:?}")
            }
            Self::Rejected => write!(f, "{LOGIN_REJECTED_MESSAGE}"),
        }
    }
}

impl std::error::Error for LoginError {}

/// Submits a login attempt.
///
/// Field validation runs first and blocks without contacting the
/// provider. Otherwise the persistence mode is configured from the
/// "remember me" choice and the credentials go to the provider. The
/// caller navigates only on `Ok`.
pub async fn submit_login(
    provider: &dyn IdentityProvider,
    form: &LoginForm,
) -> Result<Session, LoginError> {
    let errors = form.validate();
    if !errors.is_clear() {
        return Err(LoginError::Blocked(errors));
    }

    provider.configure_persistence(form.persistence());

    match provider.sign_in(&form.email, &form.password).await {
        Ok(session) => Ok(session),
        Err(error) => {
            // Detail stays in the log; the user sees only the generic
            // message regardless of the underlying reason.
            tracing::info!(error = %error, "sign-in rejected");
            Err(LoginError::Rejected)
        }
    }
}

/// Input to the signup flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Why a signup submission did not create an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// Passwords differ; the provider was not contacted.
    PasswordMismatch,
    /// The provider rejected the request.
    Provider { message: String },
}

impl SignupError {
    /// The message to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::PasswordMismatch => PASSWORD_MISMATCH_MESSAGE,
            Self::Provider { message } => message,
        }
    }
}

impl fmt::Display for SignupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SignupError {}

/// Submits a signup attempt.
///
/// Only the password/confirmation equality check runs locally; email
/// shape and password strength are the provider's checks. A provider
/// rejection surfaces its own message when it has one.
pub async fn submit_signup(
    provider: &dyn IdentityProvider,
    form: &SignupForm,
) -> Result<Session, SignupError> {
    if form.password != form.confirm_password {
        return Err(SignupError::PasswordMismatch);
    }

    match provider.sign_up(&form.email, &form.password).await {
        Ok(session) => Ok(session),
        Err(error) => {
            tracing::info!(error = %error, "sign-up rejected");
            let message = match error {
                ProviderError::Rejected { message } => message,
                _ => SIGNUP_FALLBACK_MESSAGE.to_string(),
            };
            Err(SignupError::Provider { message })
        }
    }
}

/// Ends a session, best effort.
///
/// Provider-side revocation failure is logged and swallowed: the caller
/// always proceeds to drop its local session state, so the user ends up
/// signed out locally no matter what the provider said.
pub async fn submit_sign_out(provider: &dyn IdentityProvider, session: &Session) {
    if let Err(error) = provider.sign_out(session).await {
        tracing::warn!(
            uid = %session.uid(),
            error = %error,
            "provider sign-out failed; ending local session anyway"
        );
    }
}

/// Guard allowing at most one submission in flight per form.
///
/// Not a mutex: losing `begin` simply means the submission is dropped,
/// and `finish` must run on every exit path of a won submission.
#[derive(Debug, Default)]
pub struct SubmitGate {
    in_flight: AtomicBool,
}

impl SubmitGate {
    /// Creates an idle gate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate. Returns false if a submission is already in
    /// flight, in which case the caller must not submit.
    pub fn begin(&self) -> bool {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Releases the gate.
    pub fn finish(&self) {
        self.in_flight.store(false, Ordering::Release);
    }

    /// Returns true while a submission is in flight.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::fake::FakeProvider;
    use std::sync::atomic::Ordering as AtomicOrdering;

    fn login_form(email: &str, password: &str) -> LoginForm {
        LoginForm {
            email: email.to_string(),
            password: password.to_string(),
            remember: false,
        }
    }

    fn signup_form(email: &str, password: &str, confirm: &str) -> SignupForm {
        SignupForm {
            email: email.to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[tokio::test]
    async fn malformed_email_blocks_login_without_provider_contact() {
        let provider = FakeProvider::new();

        for bad in ["", "not-an-email", "alice@"] {
            let result = submit_login(&provider, &login_form(bad, "secret123")).await;
            match result {
                Err(LoginError::Blocked(errors)) => assert!(errors.email.is_some()),
                other => panic!("expected Blocked, got {other:?}"),
            }
        }

        assert_eq!(provider.sign_in_calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn short_password_blocks_login_without_provider_contact() {
        let provider = FakeProvider::new();

        let result = submit_login(&provider, &login_form("alice@example.com", "abc")).await;
        match result {
            Err(LoginError::Blocked(errors)) => {
                assert!(errors.password.is_some());
                assert!(errors.email.is_none());
            }
            other => panic!("expected Blocked, got {other:?}"),
        }

        assert_eq!(provider.sign_in_calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn successful_login_returns_the_provider_session() {
        let provider = FakeProvider::new();

        let session = submit_login(&provider, &login_form("alice@example.com", "secret123"))
            .await
            .expect("should sign in");

        assert_eq!(session.email(), "alice@example.com");
        assert_eq!(provider.sign_in_calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test]
    async fn remember_me_configures_durable_persistence() {
        let provider = FakeProvider::new();
        let mut form = login_form("alice@example.com", "secret123");
        form.remember = true;

        submit_login(&provider, &form).await.expect("should sign in");
        assert_eq!(provider.configured_persistence(), Persistence::Durable);

        form.remember = false;
        submit_login(&provider, &form).await.expect("should sign in");
        assert_eq!(
            provider.configured_persistence(),
            Persistence::SessionScoped
        );
    }

    #[tokio::test]
    async fn every_login_failure_surfaces_the_generic_message() {
        // Wrong password, unknown account, transport failure: the user
        // sees the same thing in all cases.
        let failures = [
            ProviderError::InvalidCredentials,
            ProviderError::Rejected {
                message: "ACCOUNT_DISABLED".to_string(),
            },
            ProviderError::Transport {
                reason: "timeout".to_string(),
            },
        ];

        for failure in failures {
            let provider = FakeProvider::rejecting_sign_in(failure);
            let result =
                submit_login(&provider, &login_form("alice@example.com", "secret123")).await;
            match result {
                Err(LoginError::Rejected) => {
                    assert_eq!(LoginError::Rejected.message(), LOGIN_REJECTED_MESSAGE);
                }
                other => panic!("expected Rejected, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn password_mismatch_blocks_signup_without_provider_contact() {
        let provider = FakeProvider::new();

        let result = submit_signup(
            &provider,
            &signup_form("alice@example.com", "secret123", "secret124"),
        )
        .await;

        assert_eq!(result, Err(SignupError::PasswordMismatch));
        assert_eq!(provider.sign_up_calls.load(AtomicOrdering::SeqCst), 0);
    }

    #[tokio::test]
    async fn signup_surfaces_the_provider_message_verbatim() {
        let provider = FakeProvider::rejecting_sign_up(ProviderError::Rejected {
            message: "Email already registered".to_string(),
        });

        let result = submit_signup(
            &provider,
            &signup_form("alice@example.com", "secret123", "secret123"),
        )
        .await;

        match result {
            Err(error) => assert_eq!(error.message(), "Email already registered"),
            other => panic!("expected provider rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signup_falls_back_to_generic_message_without_provider_detail() {
        let provider = FakeProvider::rejecting_sign_up(ProviderError::Transport {
            reason: "connection reset".to_string(),
        });

        let result = submit_signup(
            &provider,
            &signup_form("alice@example.com", "secret123", "secret123"),
        )
        .await;

        match result {
            Err(error) => assert_eq!(error.message(), SIGNUP_FALLBACK_MESSAGE),
            other => panic!("expected provider rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn signup_does_not_validate_email_locally() {
        // Unlike login, signup trusts the provider to check the email.
        let provider = FakeProvider::new();

        submit_signup(&provider, &signup_form("not-an-email", "secret123", "secret123"))
            .await
            .expect("fake provider accepts anything");

        assert_eq!(provider.sign_up_calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sign_out_completes_even_when_the_provider_refuses() {
        let provider = FakeProvider::rejecting_sign_out(ProviderError::Transport {
            reason: "connection reset".to_string(),
        });
        let session = FakeProvider::session();

        // Returns unit either way; the rejection must not escape.
        submit_sign_out(&provider, &session).await;

        assert_eq!(provider.sign_out_calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sign_out_revokes_with_the_provider_once() {
        let provider = FakeProvider::new();
        let session = FakeProvider::session();

        submit_sign_out(&provider, &session).await;

        assert_eq!(provider.sign_out_calls.load(AtomicOrdering::SeqCst), 1);
    }

    #[test]
    fn submit_gate_refuses_a_second_submission_in_flight() {
        let gate = SubmitGate::new();

        assert!(gate.begin());
        assert!(!gate.begin(), "second begin must lose while in flight");
        assert!(gate.is_in_flight());

        gate.finish();
        assert!(!gate.is_in_flight());
        assert!(gate.begin(), "gate must reopen after finish");
    }

    #[test]
    fn field_errors_clear_state() {
        assert!(FieldErrors::default().is_clear());
        assert!(
            !FieldErrors {
                email: Some("bad".to_string()),
                password: None,
            }
            .is_clear()
        );
    }
}
