//! Web server setup and configuration

use crate::{routes::build_routes, state::AppState};
use afrifiscal_core::{Config, Result};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete web application with all routes and state
///
/// # Errors
///
/// Returns an error if the analytics client cannot be built.
pub fn build_app(config: Config) -> Result<Router> {
    let state = Arc::new(AppState::new(config)?);

    Ok(build_routes()
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
