//! Dashboard page component.

use crate::app::{SessionResource, sign_out};
use crate::types::SessionInfo;
use gatehouse_identity::{AuthPhase, AuthSnapshot};
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;

/// Protected dashboard.
///
/// Renders from the shared session observer and never treats "still
/// checking" as "signed out": while the observer is unsettled a neutral
/// indicator shows, and only a settled absence redirects to login.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<SessionResource>();

    let sign_out_action = Action::new(|_: &()| async move { sign_out().await });
    let navigate = use_navigate();
    Effect::new(move || {
        // Leave for the login page whether or not revocation succeeded;
        // the server cleared the cookie either way.
        if sign_out_action.value().get().is_some() {
            session.refetch();
            navigate("/", Default::default());
        }
    });

    view! {
        <div class="dashboard-page">
            <Suspense fallback=move || view! { <p class="auth-checking">"Loading..."</p> }>
                {move || {
                    let snapshot = match session.get() {
                        None => AuthSnapshot::checking(),
                        Some(result) => AuthSnapshot::settled(result.ok().flatten()),
                    };
                    match AuthPhase::classify(snapshot) {
                        AuthPhase::Checking => {
                            view! { <p class="auth-checking">"Loading..."</p> }.into_any()
                        }
                        AuthPhase::Authenticated(info) => view! {
                            <DashboardContent info=info sign_out=sign_out_action/>
                        }
                        .into_any(),
                        AuthPhase::Unauthenticated => view! { <Redirect path="/"/> }.into_any(),
                    }
                }}
            </Suspense>
        </div>
    }
}

/// Dashboard content shown once the observer settled on a user.
#[component]
fn DashboardContent(
    info: SessionInfo,
    sign_out: Action<(), Result<(), ServerFnError>>,
) -> impl IntoView {
    view! {
        <header class="dashboard-header">
            <h1>"Dashboard"</h1>
            <div class="dashboard-user">
                <span class="user-email">{info.email}</span>
                <button
                    class="sign-out-button"
                    disabled=move || sign_out.pending().get()
                    on:click=move |_| {
                        sign_out.dispatch(());
                    }
                >
                    "Sign out"
                </button>
            </div>
        </header>
        <section class="metric-cards">
            <div class="metric-card">
                <h2>"Total Projects"</h2>
                <p class="metric-value">"12"</p>
            </div>
            <div class="metric-card">
                <h2>"Tasks Completed"</h2>
                <p class="metric-value">"87%"</p>
            </div>
            <div class="metric-card">
                <h2>"New Messages"</h2>
                <p class="metric-value">"5"</p>
            </div>
        </section>
        <section class="recent-activity">
            <h2>"Recent Activity"</h2>
            <ul class="activity-list">
                <li class="activity-item">
                    <span>"Updated profile picture"</span>
                    <span class="activity-time">"2h ago"</span>
                </li>
                <li class="activity-item">
                    <span>"Completed project \"Website Redesign\""</span>
                    <span class="activity-time">"1d ago"</span>
                </li>
                <li class="activity-item">
                    <span>"Sent a message to John Doe"</span>
                    <span class="activity-time">"3d ago"</span>
                </li>
            </ul>
        </section>
    }
}
