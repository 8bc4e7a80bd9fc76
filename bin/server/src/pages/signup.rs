//! Signup page component.

use crate::app::sign_up;
use gatehouse_identity::{PASSWORD_MISMATCH_MESSAGE, SIGNUP_FALLBACK_MESSAGE, SubmitGate};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use std::sync::Arc;

/// Signup page.
///
/// The only local check is password/confirmation equality; email shape
/// and password strength are the provider's calls, and its rejection
/// message is shown verbatim. A successful signup leaves via a full
/// page load to the root, so the fresh session cookie is in place for
/// the next document.
#[component]
pub fn SignupPage() -> impl IntoView {
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (form_error, set_form_error) = signal(Option::<String>::None);

    let gate = StoredValue::new(Arc::new(SubmitGate::new()));
    let submit = Action::new(|input: &(String, String, String)| {
        let (email, password, confirm_password) = input.clone();
        async move { sign_up(email, password, confirm_password).await }
    });

    Effect::new(move || {
        if let Some(result) = submit.value().get() {
            gate.with_value(|g| g.finish());
            match result {
                Ok(()) => {
                    let _ = window().location().set_href("/");
                }
                Err(error) => {
                    let message = match error {
                        ServerFnError::ServerError(message) => message,
                        _ => SIGNUP_FALLBACK_MESSAGE.to_string(),
                    };
                    set_form_error.set(Some(message));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_form_error.set(None);

        if password.get_untracked() != confirm_password.get_untracked() {
            set_form_error.set(Some(PASSWORD_MISMATCH_MESSAGE.to_string()));
            return;
        }

        if !gate.with_value(|g| g.begin()) {
            return;
        }
        submit.dispatch((
            email.get_untracked(),
            password.get_untracked(),
            confirm_password.get_untracked(),
        ));
    };

    view! {
        <div class="signup-page">
            <div class="signup-box">
                <h1>"Create an account"</h1>
                <p class="subtitle">"Get started in a minute"</p>
                {move || form_error.get().map(|msg| view! { <p class="form-error">{msg}</p> })}
                <form class="signup-form" on:submit=on_submit>
                    <div class="form-field">
                        <label for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            placeholder="you@example.com"
                            prop:value=email
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            prop:value=password
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-field">
                        <label for="confirm-password">"Confirm password"</label>
                        <input
                            id="confirm-password"
                            type="password"
                            prop:value=confirm_password
                            on:input=move |ev| set_confirm_password.set(event_target_value(&ev))
                        />
                    </div>
                    <button type="submit" class="submit-button" disabled=move || submit.pending().get()>
                        {move || if submit.pending().get() { "Creating account..." } else { "Sign up" }}
                    </button>
                </form>
                <p class="form-footer">
                    "Already have an account? "
                    <a href="/">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
