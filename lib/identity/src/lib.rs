//! Authentication domain for the gatehouse application.
//!
//! This crate is UI-free: it defines the identity-provider seam, the
//! session types that cross it, the local field validators, and the
//! login/signup flows that decide when the provider is contacted and
//! what message a failure surfaces. The server crate wires these into
//! pages and server functions.

pub mod error;
pub mod flow;
pub mod observer;
pub mod provider;
#[cfg(feature = "rest")]
pub mod rest;
pub mod session;
pub mod validate;

pub use error::ProviderError;
pub use flow::{
    FieldErrors, LoginError, LoginForm, SignupError, SignupForm, SubmitGate, submit_login,
    submit_sign_out, submit_signup, LOGIN_REJECTED_MESSAGE, PASSWORD_MISMATCH_MESSAGE,
    SIGNUP_FALLBACK_MESSAGE,
};
pub use observer::{AuthPhase, AuthSnapshot};
pub use provider::IdentityProvider;
#[cfg(feature = "rest")]
pub use rest::RestIdentityProvider;
pub use session::{Persistence, Session, Uid};
