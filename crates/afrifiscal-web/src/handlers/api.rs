//! JSON proxy handlers for the analytics API
//!
//! Responses are decoded into the typed schemas before they are passed on,
//! so a malformed upstream body surfaces as a `502` here rather than in the
//! browser.

use crate::{api_client::export_file_name, pages::split_list, state::AppState};
use afrifiscal_core::{
    ClusterAnalysis, Comparison, CountryAnalysis, DebtSustainabilityEntry, EarlyWarnings, Error,
    ExportQuery, FiscalSpaceEntry, Overview, PolicyRecommendations,
};
use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

/// Failed proxy call, rendered as `{ "error", "message" }`
#[derive(Debug)]
pub struct ProxyError {
    resource: &'static str,
    error: Error,
}

impl ProxyError {
    /// Wrap an error raised while fetching `resource`
    #[must_use]
    pub const fn new(resource: &'static str, error: Error) -> Self {
        Self { resource, error }
    }

    /// Status code: invalid local input is the caller's fault, anything
    /// else is an upstream failure
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self.error {
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::BAD_GATEWAY {
            error!("Failed to fetch {} from API: {}", self.resource, self.error);
        } else {
            warn!("Rejected {} request: {}", self.resource, self.error);
        }

        let body = Json(serde_json::json!({
            "error": format!("Failed to fetch {}", self.resource),
            "message": self.error.to_string(),
        }));
        (status, body).into_response()
    }
}

type ProxyResult<T> = Result<Json<T>, ProxyError>;

/// Comma separated query of `/api/compare`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareParams {
    /// Countries to compare, e.g. `Nigeria,Kenya`
    pub countries: Option<String>,
}

/// Comma separated query of `/export`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportParams {
    /// Countries to include
    pub countries: Option<String>,
    /// Years to include
    pub years: Option<String>,
    /// Metrics to include
    pub metrics: Option<String>,
}

impl From<ExportParams> for ExportQuery {
    fn from(params: ExportParams) -> Self {
        Self {
            countries: split_list(params.countries.as_deref()),
            years: split_list(params.years.as_deref()),
            metrics: split_list(params.metrics.as_deref()),
        }
    }
}

/// Continental overview
pub async fn overview(State(state): State<Arc<AppState>>) -> ProxyResult<Overview> {
    state
        .api_client
        .get_overview()
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("overview", e))
}

/// One country's analysis
pub async fn country(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ProxyResult<CountryAnalysis> {
    state
        .api_client
        .get_country_analysis(&name)
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("country analysis", e))
}

/// Side-by-side comparison of at least two countries
pub async fn compare(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CompareParams>,
) -> ProxyResult<Comparison> {
    let countries = split_list(params.countries.as_deref());
    if countries.len() < 2 {
        return Err(ProxyError::new(
            "comparison",
            Error::validation("countries", "at least two countries are required"),
        ));
    }

    state
        .api_client
        .compare_countries(&countries)
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("comparison", e))
}

/// Cluster analysis
pub async fn cluster_analysis(State(state): State<Arc<AppState>>) -> ProxyResult<ClusterAnalysis> {
    state
        .api_client
        .get_cluster_analysis()
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("cluster analysis", e))
}

/// Early warnings
pub async fn early_warning(State(state): State<Arc<AppState>>) -> ProxyResult<EarlyWarnings> {
    state
        .api_client
        .get_early_warnings()
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("early warnings", e))
}

/// Policy recommendations for one country
pub async fn policy_recommendations(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ProxyResult<PolicyRecommendations> {
    state
        .api_client
        .get_policy_recommendations(&name)
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("policy recommendations", e))
}

/// Fiscal space scores
pub async fn fiscal_space_analysis(
    State(state): State<Arc<AppState>>,
) -> ProxyResult<Vec<FiscalSpaceEntry>> {
    state
        .api_client
        .get_fiscal_space_analysis()
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("fiscal space analysis", e))
}

/// Debt sustainability classifications
pub async fn debt_sustainability_dashboard(
    State(state): State<Arc<AppState>>,
) -> ProxyResult<Vec<DebtSustainabilityEntry>> {
    state
        .api_client
        .get_debt_sustainability_dashboard()
        .await
        .map(Json)
        .map_err(|e| ProxyError::new("debt sustainability dashboard", e))
}

/// Export blob passthrough
pub async fn export(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> Result<Response, ProxyError> {
    let query = ExportQuery::from(params);
    let bytes = state
        .api_client
        .export_data(&query)
        .await
        .map_err(|e| ProxyError::new("export", e))?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(chrono::Utc::now().date_naive())
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/octet-stream".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_proxy_error_status() {
        let upstream = ProxyError::new(
            "overview",
            Error::Status {
                endpoint: "/overview".to_string(),
                status: 500,
            },
        );
        assert_eq!(upstream.status(), StatusCode::BAD_GATEWAY);

        let invalid = ProxyError::new("comparison", Error::validation("countries", "too few"));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_export_params_split() {
        let query = ExportQuery::from(ExportParams {
            countries: Some("Ghana, Kenya".to_string()),
            years: Some("2020,,2021".to_string()),
            metrics: None,
        });

        assert_eq!(query.countries, vec!["Ghana", "Kenya"]);
        assert_eq!(query.years, vec!["2020", "2021"]);
        assert!(query.metrics.is_empty());
    }
}
