//! Domain error types for server operations.

use leptos::server_fn::error::ServerFnError;
use std::fmt;

/// Failures while reading the session cookie.
///
/// Every variant means "treat the request as unauthenticated"; the
/// variants exist so logs can tell a missing cookie from a corrupted
/// or stale one.
#[derive(Debug)]
pub enum SessionCookieError {
    /// No session cookie was present on the request.
    Missing,
    /// The cookie value could not be decoded into a session.
    Undecodable { details: String },
    /// The cookie decoded, but the session's token has expired.
    Expired,
}

impl fmt::Display for SessionCookieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "no session cookie"),
            Self::Undecodable { details } => {
                write!(f, "undecodable session cookie: {details}")
            }
            Self::Expired => write!(f, "session cookie expired"),
        }
    }
}

impl std::error::Error for SessionCookieError {}

impl SessionCookieError {
    /// Convert to a user-safe ServerFnError.
    pub fn into_server_error(self) -> ServerFnError {
        // All cookie problems look the same to the client.
        ServerFnError::new("Not authenticated")
    }
}
