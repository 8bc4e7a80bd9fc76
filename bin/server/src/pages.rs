//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route. The
//! account server functions they dispatch live in [`crate::app`].

pub mod dashboard;
pub mod login;
pub mod signup;

// Re-export all page components for convenient access
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use signup::SignupPage;
