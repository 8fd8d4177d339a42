//! African fiscal dashboard
//!
//! Server-rendered dashboard over a remote fiscal analytics API: the page
//! view models, their templates, the API client and a JSON proxy.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod api_client;
pub mod components;
pub mod filters;
pub mod handlers;
pub mod navigation;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod view_state;

// Re-export the main entry points
pub use api_client::ApiClient;
pub use server::build_app;
pub use state::AppState;
pub use view_state::PageState;
