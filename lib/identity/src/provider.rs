//! The identity-provider collaborator.
//!
//! All durable authentication state (accounts, credentials, session
//! lifetime policy) lives behind this trait. The application only ever
//! consumes the operations below; pages and flows are written against
//! the trait so tests can substitute a scripted fake.

use crate::error::ProviderError;
use crate::session::{Persistence, Session};
use async_trait::async_trait;

/// Operations consumed from the external identity provider.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Sets the persistence mode for sessions issued after this call.
    fn configure_persistence(&self, mode: Persistence);

    /// Verifies credentials and issues a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    /// Creates an account and issues a session for it.
    ///
    /// Email shape and password strength are the provider's checks, not
    /// ours; rejections come back as [`ProviderError::Rejected`] with
    /// the provider's own message.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Session, ProviderError>;

    /// Revokes the session with the provider.
    async fn sign_out(&self, session: &Session) -> Result<(), ProviderError>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! Scripted provider for flow tests.

    use super::*;
    use chrono::Duration;
    use crate::session::Uid;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory provider that records every call and returns scripted
    /// results.
    pub struct FakeProvider {
        pub sign_in_result: Mutex<Result<Session, ProviderError>>,
        pub sign_up_result: Mutex<Result<Session, ProviderError>>,
        pub sign_out_result: Mutex<Result<(), ProviderError>>,
        pub sign_in_calls: AtomicUsize,
        pub sign_up_calls: AtomicUsize,
        pub sign_out_calls: AtomicUsize,
        pub persistence: Mutex<Persistence>,
    }

    impl FakeProvider {
        pub fn new() -> Self {
            Self {
                sign_in_result: Mutex::new(Ok(Self::session())),
                sign_up_result: Mutex::new(Ok(Self::session())),
                sign_out_result: Mutex::new(Ok(())),
                sign_in_calls: AtomicUsize::new(0),
                sign_up_calls: AtomicUsize::new(0),
                sign_out_calls: AtomicUsize::new(0),
                persistence: Mutex::new(Persistence::default()),
            }
        }

        pub fn rejecting_sign_in(error: ProviderError) -> Self {
            let fake = Self::new();
            *fake.sign_in_result.lock().expect("lock") = Err(error);
            fake
        }

        pub fn rejecting_sign_up(error: ProviderError) -> Self {
            let fake = Self::new();
            *fake.sign_up_result.lock().expect("lock") = Err(error);
            fake
        }

        pub fn rejecting_sign_out(error: ProviderError) -> Self {
            let fake = Self::new();
            *fake.sign_out_result.lock().expect("lock") = Err(error);
            fake
        }

        pub fn session() -> Session {
            Session::new(
                Uid::from("uid_fake"),
                "alice@example.com".to_string(),
                "token_fake".to_string(),
                None,
                Duration::hours(1),
                Persistence::SessionScoped,
            )
        }

        pub fn configured_persistence(&self) -> Persistence {
            *self.persistence.lock().expect("lock")
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeProvider {
        fn configure_persistence(&self, mode: Persistence) {
            *self.persistence.lock().expect("lock") = mode;
        }

        async fn sign_in(&self, _email: &str, _password: &str) -> Result<Session, ProviderError> {
            self.sign_in_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_in_result.lock().expect("lock").clone()
        }

        async fn sign_up(&self, _email: &str, _password: &str) -> Result<Session, ProviderError> {
            self.sign_up_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_up_result.lock().expect("lock").clone()
        }

        async fn sign_out(&self, _session: &Session) -> Result<(), ProviderError> {
            self.sign_out_calls.fetch_add(1, Ordering::SeqCst);
            self.sign_out_result.lock().expect("lock").clone()
        }
    }
}
