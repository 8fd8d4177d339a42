//! Route definitions for the dashboard

use crate::{
    handlers::{api, pages},
    state::AppState,
};
use axum::{Router, routing::get};
use std::sync::Arc;

/// Build the complete dashboard router
pub fn build_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Page routes
        .route("/", get(pages::dashboard))
        .route("/country", get(pages::country))
        .route("/compare", get(pages::compare))
        .route("/clusters", get(pages::clusters))
        .route("/warnings", get(pages::warnings))
        .route("/recommendations", get(pages::recommendations))
        .route("/fiscal-space", get(pages::fiscal_space))
        .route("/debt-sustainability", get(pages::debt_sustainability))
        // API proxy routes
        .route("/api/overview", get(api::overview))
        .route("/api/country/:name", get(api::country))
        .route("/api/compare", get(api::compare))
        .route("/api/cluster-analysis", get(api::cluster_analysis))
        .route("/api/early-warning", get(api::early_warning))
        .route(
            "/api/policy-recommendations/:name",
            get(api::policy_recommendations),
        )
        .route("/api/fiscal-space-analysis", get(api::fiscal_space_analysis))
        .route(
            "/api/debt-sustainability-dashboard",
            get(api::debt_sustainability_dashboard),
        )
        // Export passthrough
        .route("/export", get(api::export))
        // Health check
        .route("/health", get(api::health_check))
        .fallback(pages::not_found)
}
