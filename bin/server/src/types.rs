//! Shared types used across server functions and UI components.

/// The authenticated identity as the UI sees it.
///
/// A trimmed view of the server-side session: tokens never leave the
/// server, the client only learns who is signed in.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionInfo {
    pub uid: String,
    pub email: String,
}

#[cfg(feature = "ssr")]
impl From<&gatehouse_identity::Session> for SessionInfo {
    fn from(session: &gatehouse_identity::Session) -> Self {
        Self {
            uid: session.uid().to_string(),
            email: session.email().to_string(),
        }
    }
}
