//! Error types for identity-provider operations.

use std::fmt;

/// Errors from calls to the identity provider.
///
/// Credential rejections collapse into
/// [`ProviderError::InvalidCredentials`] with no further detail; a
/// caller cannot distinguish an unknown account from a wrong password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider rejected the credentials. Wrong password, unknown
    /// account, and disabled account all land here.
    InvalidCredentials,
    /// The provider rejected the request with its own message
    /// (e.g. weak password or duplicate email on sign-up).
    Rejected { message: String },
    /// The provider could not be reached.
    Transport { reason: String },
    /// The provider answered with something we could not interpret.
    InvalidResponse { reason: String },
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => {
                write!(f, "provider rejected the credentials")
            }
            Self::Rejected { message } => {
                write!(f, "provider rejected the request: {message}")
            }
            Self::Transport { reason } => {
                write!(f, "provider unreachable: {reason}")
            }
            Self::InvalidResponse { reason } => {
                write!(f, "unexpected provider response: {reason}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}
