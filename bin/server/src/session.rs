//! Session cookie transport.
//!
//! The application keeps no session store of its own: the provider
//! session rides in an HttpOnly cookie as base64-wrapped JSON, and
//! every server function reconstitutes it from the request. The cookie
//! lifetime is where the persistence choice takes effect: durable
//! sessions get a Max-Age, session-scoped ones are dropped when the
//! browser closes.

use crate::config::CookieConfig;
use crate::error::SessionCookieError;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use gatehouse_identity::{IdentityProvider, Persistence, Session};
use std::sync::Arc;
use time::Duration as TimeDuration;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "session";

/// Provider handle shared with server functions via request extension.
pub type SharedProvider = Arc<dyn IdentityProvider>;

/// Encodes a session for cookie storage.
pub fn encode_session(session: &Session) -> Result<String, SessionCookieError> {
    let json = serde_json::to_vec(session).map_err(|e| SessionCookieError::Undecodable {
        details: e.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a cookie value back into a session.
pub fn decode_session(value: &str) -> Result<Session, SessionCookieError> {
    let json = URL_SAFE_NO_PAD
        .decode(value)
        .map_err(|e| SessionCookieError::Undecodable {
            details: e.to_string(),
        })?;
    serde_json::from_slice(&json).map_err(|e| SessionCookieError::Undecodable {
        details: e.to_string(),
    })
}

/// Builds the session cookie for a freshly issued session.
///
/// Durable sessions carry `Max-Age` so the cookie survives a browser
/// restart; session-scoped ones carry none and end with the browser
/// session.
pub fn session_cookie(
    session: &Session,
    config: &CookieConfig,
) -> Result<Cookie<'static>, SessionCookieError> {
    let value = encode_session(session)?;
    let builder = Cookie::build((SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(config.secure_cookies)
        .same_site(SameSite::Lax);

    let builder = match session.persistence() {
        Persistence::Durable => builder.max_age(TimeDuration::days(config.durable_days)),
        Persistence::SessionScoped => builder,
    };
    Ok(builder.build())
}

/// Builds the cookie that removes the session cookie.
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(TimeDuration::ZERO)
        .build()
}

/// Reconstitutes the session from the request's cookie jar.
///
/// A missing, corrupted, or expired cookie is an unauthenticated
/// request, not a server error.
pub fn session_from_jar(jar: &CookieJar) -> Result<Session, SessionCookieError> {
    let cookie = jar.get(SESSION_COOKIE).ok_or(SessionCookieError::Missing)?;
    let session = decode_session(cookie.value())?;
    if session.is_expired() {
        return Err(SessionCookieError::Expired);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use gatehouse_identity::Uid;

    fn session(persistence: Persistence, expires_in: Duration) -> Session {
        Session::new(
            Uid::from("uid_1"),
            "alice@example.com".to_string(),
            "tok_1".to_string(),
            Some("refresh_1".to_string()),
            expires_in,
            persistence,
        )
    }

    fn config() -> CookieConfig {
        CookieConfig::default()
    }

    #[test]
    fn cookie_value_roundtrips() {
        let original = session(Persistence::Durable, Duration::hours(1));
        let value = encode_session(&original).expect("encode");
        let decoded = decode_session(&value).expect("decode");
        assert_eq!(original, decoded);
    }

    #[test]
    fn tampered_value_is_rejected() {
        let value = encode_session(&session(Persistence::Durable, Duration::hours(1)))
            .expect("encode");
        let tampered = format!("{value}x");
        assert!(decode_session(&tampered).is_err());
    }

    #[test]
    fn durable_session_cookie_carries_max_age() {
        let cookie = session_cookie(&session(Persistence::Durable, Duration::hours(1)), &config())
            .expect("build");
        assert_eq!(cookie.max_age(), Some(TimeDuration::days(30)));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    }

    #[test]
    fn session_scoped_cookie_carries_no_max_age() {
        let cookie = session_cookie(
            &session(Persistence::SessionScoped, Duration::hours(1)),
            &config(),
        )
        .expect("build");
        assert_eq!(cookie.max_age(), None);
    }

    #[test]
    fn removal_cookie_expires_immediately() {
        let cookie = removal_cookie();
        assert_eq!(cookie.max_age(), Some(TimeDuration::ZERO));
        assert_eq!(cookie.value(), "");
    }

    #[test]
    fn jar_without_cookie_is_unauthenticated() {
        let jar = CookieJar::new();
        assert!(matches!(
            session_from_jar(&jar),
            Err(SessionCookieError::Missing)
        ));
    }

    #[test]
    fn jar_with_live_session_reconstitutes_it() {
        let original = session(Persistence::Durable, Duration::hours(1));
        let value = encode_session(&original).expect("encode");
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, value));

        let restored = session_from_jar(&jar).expect("should restore");
        assert_eq!(restored, original);
    }

    #[test]
    fn expired_session_in_jar_is_rejected() {
        let stale = session(Persistence::Durable, Duration::seconds(-1));
        let value = encode_session(&stale).expect("encode");
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, value));

        assert!(matches!(
            session_from_jar(&jar),
            Err(SessionCookieError::Expired)
        ));
    }
}
