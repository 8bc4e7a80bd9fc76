//! Session and user identity types.
//!
//! A [`Session`] is the transient, observed copy of an authenticated
//! identity. The identity provider owns the durable record; the
//! application never persists a session itself and treats "a session is
//! present" as the definition of "authenticated".

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque user identifier issued by the identity provider.
///
/// The provider guarantees uniqueness; the application never inspects
/// the contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uid(String);

impl Uid {
    /// Creates a uid from the provider-issued string.
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Returns the uid as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Uid {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Uid {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// How long a session should outlive the issuing interaction.
///
/// Durable sessions survive a browser restart; session-scoped ones end
/// with the current tab lifetime. The policy itself is enforced by the
/// cookie layer and the provider, not by this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// Session survives browser restarts.
    Durable,
    /// Session lasts only for the current browser session.
    #[default]
    SessionScoped,
}

/// An authenticated identity observed from the provider.
///
/// Created by a successful sign-in or sign-up; destroyed by sign-out or
/// provider-side expiry. Holds the provider tokens needed for follow-up
/// calls (revocation, refresh).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-issued opaque user identifier.
    uid: Uid,
    /// Email address the identity was registered with.
    email: String,
    /// Bearer token for provider calls on behalf of this session.
    id_token: String,
    /// Token for refreshing the id token, when the provider issues one.
    refresh_token: Option<String>,
    /// When the id token stops being accepted by the provider.
    expires_at: DateTime<Utc>,
    /// Persistence mode the session was issued under.
    persistence: Persistence,
}

impl Session {
    /// Creates a session from provider-issued fields.
    ///
    /// `expires_in` is the provider's token lifetime from now.
    #[must_use]
    pub fn new(
        uid: Uid,
        email: String,
        id_token: String,
        refresh_token: Option<String>,
        expires_in: Duration,
        persistence: Persistence,
    ) -> Self {
        Self {
            uid,
            email,
            id_token,
            refresh_token,
            expires_at: Utc::now() + expires_in,
            persistence,
        }
    }

    /// Reconstitutes a session from previously observed fields.
    #[must_use]
    pub fn from_parts(
        uid: Uid,
        email: String,
        id_token: String,
        refresh_token: Option<String>,
        expires_at: DateTime<Utc>,
        persistence: Persistence,
    ) -> Self {
        Self {
            uid,
            email,
            id_token,
            refresh_token,
            expires_at,
            persistence,
        }
    }

    /// Returns the provider-issued user identifier.
    #[must_use]
    pub fn uid(&self) -> &Uid {
        &self.uid
    }

    /// Returns the email address of the authenticated identity.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the bearer token for provider calls.
    #[must_use]
    pub fn id_token(&self) -> &str {
        &self.id_token
    }

    /// Returns the refresh token, if the provider issued one.
    #[must_use]
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// Returns when the id token expires.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Returns the persistence mode the session was issued under.
    #[must_use]
    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    /// Returns true if the provider no longer accepts the id token.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}
