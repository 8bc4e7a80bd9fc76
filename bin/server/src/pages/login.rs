//! Login page component.

use crate::app::{SessionResource, sign_in};
use gatehouse_identity::{AuthPhase, AuthSnapshot, LOGIN_REJECTED_MESSAGE, LoginForm, SubmitGate};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::components::Redirect;
use leptos_router::hooks::use_navigate;
use std::sync::Arc;

/// Login page with local field validation.
///
/// An already-signed-in visitor is sent straight to the dashboard.
/// Field errors block submission without any provider contact and clear
/// as soon as the field is edited. A provider rejection shows the one
/// generic message, whatever the underlying reason was.
#[component]
pub fn LoginPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (remember, set_remember) = signal(false);
    let (email_error, set_email_error) = signal(Option::<String>::None);
    let (password_error, set_password_error) = signal(Option::<String>::None);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let gate = StoredValue::new(Arc::new(SubmitGate::new()));
    let submit = Action::new(|input: &(String, String, bool)| {
        let (email, password, remember) = input.clone();
        async move { sign_in(email, password, remember).await }
    });

    let session = expect_context::<SessionResource>();
    let navigate = use_navigate();
    Effect::new(move || {
        if let Some(result) = submit.value().get() {
            gate.with_value(|g| g.finish());
            match result {
                Ok(()) => {
                    session.refetch();
                    navigate("/dashboard", Default::default());
                }
                Err(_) => set_form_error.set(Some(LOGIN_REJECTED_MESSAGE.to_string())),
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_form_error.set(None);

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
            remember: remember.get_untracked(),
        };
        let errors = form.validate();
        set_email_error.set(errors.email.clone());
        set_password_error.set(errors.password.clone());
        if !errors.is_clear() {
            return;
        }

        if !gate.with_value(|g| g.begin()) {
            return;
        }
        submit.dispatch((form.email, form.password, form.remember));
    };

    view! {
        <div class="login-page">
            <Suspense fallback=|| ()>
                {move || {
                    let snapshot = match session.get() {
                        None => AuthSnapshot::checking(),
                        Some(result) => AuthSnapshot::settled(result.ok().flatten()),
                    };
                    match AuthPhase::classify(snapshot) {
                        AuthPhase::Authenticated(_) => {
                            Some(view! { <Redirect path="/dashboard"/> })
                        }
                        AuthPhase::Checking | AuthPhase::Unauthenticated => None,
                    }
                }}
            </Suspense>
            <div class="login-box">
                <h1>"Welcome back"</h1>
                <p class="subtitle">"Sign in to your account"</p>
                {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <form class="login-form" on:submit=on_submit>
                    <div class="form-field">
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=email
                            on:input=move |ev| {
                                set_email.set(event_target_value(&ev));
                                set_email_error.set(None);
                            }
                        />
                        {move || email_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                    </div>
                    <div class="form-field">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            prop:value=password
                            on:input=move |ev| {
                                set_password.set(event_target_value(&ev));
                                set_password_error.set(None);
                            }
                        />
                        {move || password_error.get().map(|msg| view! { <p class="field-error">{msg}</p> })}
                    </div>
                    <label class="remember-me">
                        <input
                            type="checkbox"
                            prop:checked=remember
                            on:change=move |ev| set_remember.set(event_target_checked(&ev))
                        />
                        "Remember me"
                    </label>
                    <button type="submit" class="submit-button" disabled=move || submit.pending().get()>
                        {move || if submit.pending().get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <p class="form-footer">
                    "Don't have an account? "
                    <a href="/signup">"Sign up"</a>
                </p>
            </div>
        </div>
    }
}
