//! Main Leptos application component, routing, and account server functions.

use crate::pages::{DashboardPage, LoginPage, SignupPage};
use crate::types::SessionInfo;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// The shared authentication observer.
///
/// Provided once at the application root and read by every page; pages
/// never call [`current_session`] themselves. Actions that change the
/// signed-in state refetch it.
pub type SessionResource = Resource<Result<Option<SessionInfo>, ServerFnError>>;

/// Server function returning who is currently signed in.
///
/// `Ok(None)` is the normal signed-out answer; a missing, corrupted, or
/// expired session cookie all land there.
#[server]
pub async fn current_session() -> Result<Option<SessionInfo>, ServerFnError> {
    use crate::error::SessionCookieError;
    use crate::session::session_from_jar;
    use axum_extra::extract::CookieJar;

    let jar: CookieJar = leptos_axum::extract().await?;

    match session_from_jar(&jar) {
        Ok(session) => Ok(Some(SessionInfo::from(&session))),
        Err(SessionCookieError::Missing) => Ok(None),
        Err(error) => {
            tracing::debug!(error = %error, "unusable session cookie treated as signed out");
            Ok(None)
        }
    }
}

/// Server function performing a credential sign-in.
///
/// On success the issued session is set as the response cookie, with a
/// lifetime chosen by `remember`. Every failure comes back as the same
/// generic rejection.
#[server]
pub async fn sign_in(
    email: String,
    password: String,
    remember: bool,
) -> Result<(), ServerFnError> {
    use crate::config::CookieConfig;
    use crate::session::{SharedProvider, session_cookie};
    use axum::Extension;
    use axum::http::{HeaderValue, header};
    use gatehouse_identity::{LOGIN_REJECTED_MESSAGE, LoginForm, submit_login};

    let Extension(provider): Extension<SharedProvider> = leptos_axum::extract().await?;
    let Extension(cookie_config): Extension<CookieConfig> = leptos_axum::extract().await?;

    let form = LoginForm {
        email,
        password,
        remember,
    };
    let session = submit_login(provider.as_ref(), &form)
        .await
        .map_err(|_| ServerFnError::new(LOGIN_REJECTED_MESSAGE))?;

    let cookie = session_cookie(&session, &cookie_config).map_err(|e| e.into_server_error())?;
    let response: leptos_axum::ResponseOptions = expect_context();
    response.append_header(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );

    tracing::info!(uid = %session.uid(), "signed in");
    Ok(())
}

/// Server function creating an account and signing it in.
///
/// Provider rejections keep their own message so the page can show it
/// verbatim.
#[server]
pub async fn sign_up(
    email: String,
    password: String,
    confirm_password: String,
) -> Result<(), ServerFnError> {
    use crate::config::CookieConfig;
    use crate::session::{SharedProvider, session_cookie};
    use axum::Extension;
    use axum::http::{HeaderValue, header};
    use gatehouse_identity::{SignupForm, submit_signup};

    let Extension(provider): Extension<SharedProvider> = leptos_axum::extract().await?;
    let Extension(cookie_config): Extension<CookieConfig> = leptos_axum::extract().await?;

    let form = SignupForm {
        email,
        password,
        confirm_password,
    };
    let session = submit_signup(provider.as_ref(), &form)
        .await
        .map_err(|e| ServerFnError::new(e.message()))?;

    let cookie = session_cookie(&session, &cookie_config).map_err(|e| e.into_server_error())?;
    let response: leptos_axum::ResponseOptions = expect_context();
    response.append_header(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie.to_string())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );

    tracing::info!(uid = %session.uid(), "account created");
    Ok(())
}

/// Server function ending the current session.
///
/// Provider-side revocation is best effort: a failure is logged and the
/// cookie is cleared regardless, so the user always ends up signed out
/// locally.
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    use crate::session::{SharedProvider, removal_cookie, session_from_jar};
    use axum::Extension;
    use axum::http::{HeaderValue, header};
    use axum_extra::extract::CookieJar;
    use gatehouse_identity::submit_sign_out;

    let jar: CookieJar = leptos_axum::extract().await?;
    let Extension(provider): Extension<SharedProvider> = leptos_axum::extract().await?;

    match session_from_jar(&jar) {
        Ok(session) => {
            submit_sign_out(provider.as_ref(), &session).await;
            tracing::info!(uid = %session.uid(), "signed out");
        }
        Err(error) => {
            tracing::debug!(error = %error, "sign-out without a usable session");
        }
    }

    let response: leptos_axum::ResponseOptions = expect_context();
    response.append_header(
        header::SET_COOKIE,
        HeaderValue::from_str(&removal_cookie().to_string())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );
    Ok(())
}

/// The main application component.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session: SessionResource = Resource::new(|| (), |_| current_session());
    provide_context(session);

    view! {
        <Title text="gatehouse"/>
        <Router>
            <main class="container">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=path!("/") view=LoginPage/>
                    <Route path=path!("/signup") view=SignupPage/>
                    <Route path=path!("/dashboard") view=DashboardPage/>
                </Routes>
            </main>
        </Router>
    }
}
