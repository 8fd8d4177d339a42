//! Page handlers
//!
//! Each handler performs at most one upstream fetch for the requested
//! selection and renders the page from the resulting load state. Upstream
//! failures render the page's empty or error state with a 200.

use crate::{
    navigation::NavShell,
    pages::{
        clusters::{ClusterQuery, ClustersTemplate},
        compare::{CompareQuery, CompareTemplate, Selection},
        country::{CountryQuery, CountryTemplate},
        dashboard::DashboardTemplate,
        debt_sustainability::{DebtQuery, DebtTemplate},
        fiscal_space::{FiscalSpaceQuery, FiscalSpaceTemplate},
        not_found::NotFoundTemplate,
        recommendations::{RecommendationQuery, RecommendationsTemplate},
        render_page,
        warnings::{WarningQuery, WarningsTemplate},
    },
    state::AppState,
    view_state::PageState,
};
use askama::Template;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

fn nav(uri: &Uri) -> NavShell {
    NavShell::for_request(uri.path(), uri.query())
}

fn respond<T: Template>(status: StatusCode, page: &T) -> Response {
    match render_page(page) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response(),
    }
}

/// Overview dashboard
pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Response {
    let mut page = PageState::new(());
    page.load((), state.api_client.get_overview()).await;

    let template = DashboardTemplate::from_state(nav(&uri), &page);
    respond(StatusCode::OK, &template)
}

/// Country analysis
pub async fn country(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<CountryQuery>,
) -> Response {
    let selected = query.selected();
    let mut page = PageState::new(selected.clone());
    page.load(selected.clone(), state.api_client.get_country_analysis(&selected))
        .await;

    let template = CountryTemplate::from_state(
        nav(&uri),
        query.search(),
        &page,
    );
    respond(StatusCode::OK, &template)
}

/// Country comparison; fetches only when `run` is set
pub async fn compare(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<CompareQuery>,
) -> Response {
    let nav = nav(&uri);
    let selection = Selection::parse(query.countries.as_deref());

    if !query.should_run() {
        return respond(StatusCode::OK, &CompareTemplate::idle(nav, &selection));
    }
    if let Err(e) = selection.validate() {
        return respond(StatusCode::OK, &CompareTemplate::alert(nav, &selection, &e));
    }

    let key = selection.countries().to_vec();
    let mut page = PageState::new(key.clone());
    page.load(key, state.api_client.compare_countries(selection.countries()))
        .await;

    respond(StatusCode::OK, &CompareTemplate::from_state(nav, &page))
}

/// Cluster analysis
pub async fn clusters(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<ClusterQuery>,
) -> Response {
    let mut page = PageState::new(());
    page.load((), state.api_client.get_cluster_analysis()).await;

    let template = ClustersTemplate::from_state(
        nav(&uri),
        &page,
        query.selected(),
    );
    respond(StatusCode::OK, &template)
}

/// Early warning system
pub async fn warnings(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<WarningQuery>,
) -> Response {
    let mut page = PageState::new(());
    page.load((), state.api_client.get_early_warnings()).await;

    let template = WarningsTemplate::from_state(nav(&uri), &page, &query);
    respond(StatusCode::OK, &template)
}

/// Policy recommendations; fetches only when a country is selected
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<RecommendationQuery>,
) -> Response {
    let nav = nav(&uri);

    let page = match query.selected() {
        Some(country) => {
            let mut page = PageState::new(country.to_string());
            page.load(
                country.to_string(),
                state.api_client.get_policy_recommendations(country),
            )
            .await;
            Some(page)
        }
        None => None,
    };

    let template = RecommendationsTemplate::from_state(nav, query.search(), page.as_ref());
    respond(StatusCode::OK, &template)
}

/// Fiscal space ranking
pub async fn fiscal_space(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<FiscalSpaceQuery>,
) -> Response {
    let mut page = PageState::new(());
    page.load((), state.api_client.get_fiscal_space_analysis()).await;

    let template = FiscalSpaceTemplate::from_state(nav(&uri), &page, &query);
    respond(StatusCode::OK, &template)
}

/// Debt sustainability dashboard
pub async fn debt_sustainability(
    State(state): State<Arc<AppState>>,
    uri: Uri,
    Query(query): Query<DebtQuery>,
) -> Response {
    let mut page = PageState::new(());
    page.load((), state.api_client.get_debt_sustainability_dashboard())
        .await;

    let template = DebtTemplate::from_state(
        nav(&uri),
        &page,
        &query,
    );
    respond(StatusCode::OK, &template)
}

/// Fallback for unknown paths
pub async fn not_found(uri: Uri) -> Response {
    respond(StatusCode::NOT_FOUND, &NotFoundTemplate::new(uri.path()))
}
