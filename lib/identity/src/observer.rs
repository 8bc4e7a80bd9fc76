//! The observed authentication state shared by every page.
//!
//! Pages never ask the provider directly whether someone is signed in;
//! they read a snapshot of the last observation. The crucial rule lives
//! in [`AuthPhase::classify`]: while the first observation is still in
//! flight the state is `Checking`, and `Checking` must never be treated
//! as `Unauthenticated` — pages take no authorization decision until the
//! observer has settled.

/// A point-in-time observation of the provider's session state.
///
/// `loading` is true until the first observation arrives. The type is
/// generic over the user representation so the same gating logic serves
/// both the full [`Session`](crate::session::Session) and any trimmed
/// display type a UI layer round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSnapshot<U> {
    pub user: Option<U>,
    pub loading: bool,
}

impl<U> AuthSnapshot<U> {
    /// Snapshot before the first observation has arrived.
    #[must_use]
    pub fn checking() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// Snapshot of a settled observation.
    #[must_use]
    pub fn settled(user: Option<U>) -> Self {
        Self {
            user,
            loading: false,
        }
    }
}

/// The three-way gate every protected page renders from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPhase<U> {
    /// The observer has not settled yet; render a neutral indicator and
    /// take no navigation action.
    Checking,
    /// A user is present; protected content may render.
    Authenticated(U),
    /// The observer settled with no user; redirect to login.
    Unauthenticated,
}

impl<U> AuthPhase<U> {
    /// Classifies a snapshot into a gate phase.
    ///
    /// "Not yet known" is never "logged out": a loading snapshot is
    /// `Checking` even if a stale user value is present.
    #[must_use]
    pub fn classify(snapshot: AuthSnapshot<U>) -> Self {
        if snapshot.loading {
            return Self::Checking;
        }
        match snapshot.user {
            Some(user) => Self::Authenticated(user),
            None => Self::Unauthenticated,
        }
    }
}
