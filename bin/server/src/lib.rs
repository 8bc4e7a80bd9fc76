//! gatehouse web server and UI.
//!
//! This crate provides the Leptos-based web interface for gatehouse:
//! login, signup, and a session-gated dashboard, backed by an external
//! identity provider.

#![allow(non_snake_case)]

pub mod app;
pub mod pages;
pub mod types;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod error;
#[cfg(feature = "ssr")]
pub mod session;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::App;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
