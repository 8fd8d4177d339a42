//! Cluster analysis: countries grouped by similar characteristics

use super::{ScatterPoint, ScatterSeries, SeriesPoint, query_href};
use crate::{components::Loading, navigation::NavShell, view_state::PageState};
use afrifiscal_core::{
    ClusterAnalysis,
    types::Cluster,
    utils::{format_fixed, format_percent},
};
use askama::Template;
use serde::Deserialize;

/// Query parameters of `/clusters`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClusterQuery {
    /// Selected cluster id
    pub selected: Option<String>,
}

impl ClusterQuery {
    /// Selected cluster id, if any
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Display title of a cluster: numeric ids are shown 1-based
#[must_use]
pub fn cluster_title(id: &str) -> String {
    id.parse::<u64>()
        .map_or_else(|_| format!("Cluster {id}"), |n| format!("Cluster {}", n + 1))
}

/// Countries listed under the cluster cards
///
/// With a selection these are the selected cluster's members. Without one
/// they are the members of all clusters in order, each listed once.
#[must_use]
pub fn visible_countries(analysis: &ClusterAnalysis, selected: Option<&str>) -> Vec<String> {
    if let Some(cluster) = selected.and_then(|id| analysis.get(id)) {
        return cluster.countries.clone();
    }

    let mut countries: Vec<String> = Vec::new();
    for (_, cluster) in analysis.iter() {
        for country in &cluster.countries {
            if !countries.contains(country) {
                countries.push(country.clone());
            }
        }
    }
    countries
}

/// Summary card of one cluster
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterCard {
    /// Cluster id as sent by the server
    pub id: String,
    /// Display title, e.g. `Cluster 1`
    pub title: String,
    /// Member count, e.g. `5 countries`
    pub size_label: String,
    /// Descriptive label
    pub label: String,
    /// Averaged characteristics
    pub characteristics: Vec<SeriesPoint>,
    /// Whether this cluster is selected
    pub selected: bool,
    /// Link that selects the cluster, or clears the selection if it is
    /// already selected
    pub href: String,
}

impl ClusterCard {
    fn new(id: &str, cluster: &Cluster, selected: bool) -> Self {
        let c = &cluster.characteristics;
        let href = if selected {
            "/clusters".to_string()
        } else {
            query_href("/clusters", &[("selected", id)])
        };

        Self {
            id: id.to_string(),
            title: cluster_title(id),
            size_label: format!("{} countries", cluster.size),
            label: cluster.label.clone(),
            characteristics: vec![
                SeriesPoint::with_display("Avg GDP Growth", c.avg_gdp_growth, format_percent(c.avg_gdp_growth, 1)),
                SeriesPoint::with_display("Avg Debt", c.avg_debt, format_percent(c.avg_debt, 1)),
                SeriesPoint::with_display("Avg Inflation", c.avg_inflation, format_percent(c.avg_inflation, 1)),
                SeriesPoint::with_display("Avg HDI", c.avg_hdi, format_fixed(c.avg_hdi, 3)),
            ],
            selected,
            href,
        }
    }
}

/// Scatter series, one per cluster, where every member country sits at its
/// cluster's averages
fn scatter<F>(analysis: &ClusterAnalysis, point: F) -> Vec<ScatterSeries>
where
    F: Fn(&str, &Cluster) -> ScatterPoint,
{
    analysis
        .iter()
        .map(|(id, cluster)| ScatterSeries {
            name: cluster_title(id),
            points: cluster.countries.iter().map(|country| point(country, cluster)).collect(),
        })
        .collect()
}

/// Derived cluster page
#[derive(Debug, Clone, PartialEq)]
pub struct ClustersView {
    /// One card per cluster in server order
    pub cards: Vec<ClusterCard>,
    /// Heading of the country list
    pub countries_heading: String,
    /// Countries listed under the cards
    pub countries: Vec<String>,
    /// GDP growth (y) against debt (x)
    pub growth_vs_debt: Vec<ScatterSeries>,
    /// HDI (y) against inflation (x)
    pub hdi_vs_inflation: Vec<ScatterSeries>,
}

impl ClustersView {
    /// Derive the page for an optional selected cluster
    ///
    /// A selection that names no cluster is ignored.
    #[must_use]
    pub fn new(analysis: &ClusterAnalysis, selected: Option<&str>) -> Self {
        let selected = selected.filter(|id| analysis.get(id).is_some());

        let cards = analysis
            .iter()
            .map(|(id, cluster)| ClusterCard::new(id, cluster, selected == Some(id.as_str())))
            .collect();

        let countries_heading = selected.map_or_else(
            || "All Countries".to_string(),
            |id| format!("Countries in {}", cluster_title(id)),
        );

        let growth_vs_debt = scatter(analysis, |country, cluster| {
            let c = &cluster.characteristics;
            ScatterPoint {
                label: country.to_string(),
                x: c.avg_debt,
                y: c.avg_gdp_growth,
                x_display: format_percent(c.avg_debt, 1),
                y_display: format_percent(c.avg_gdp_growth, 1),
            }
        });
        let hdi_vs_inflation = scatter(analysis, |country, cluster| {
            let c = &cluster.characteristics;
            ScatterPoint {
                label: country.to_string(),
                x: c.avg_inflation,
                y: c.avg_hdi,
                x_display: format_percent(c.avg_inflation, 1),
                y_display: format_fixed(c.avg_hdi, 3),
            }
        });

        Self {
            cards,
            countries_heading,
            countries: visible_countries(analysis, selected),
            growth_vs_debt,
            hdi_vs_inflation,
        }
    }
}

/// Cluster analysis page
#[derive(Debug, Template)]
#[template(path = "clusters.html")]
pub struct ClustersTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Loading indicator
    pub loading: Loading,
    /// Failure message
    pub error: Option<String>,
    /// Derived view, when data is available
    pub view: Option<ClustersView>,
}

impl ClustersTemplate {
    /// Build the page from its load state and the selected cluster
    #[must_use]
    pub fn from_state(
        nav: NavShell,
        state: &PageState<(), ClusterAnalysis>,
        selected: Option<&str>,
    ) -> Self {
        Self {
            nav,
            loading: Loading::when(state.is_loading()),
            error: state.error().map(ToString::to_string),
            view: state.data().map(|analysis| ClustersView::new(analysis, selected)),
        }
    }
}
