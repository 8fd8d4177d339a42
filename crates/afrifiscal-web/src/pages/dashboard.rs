//! Overview dashboard: continental averages and breakdowns

use super::SeriesPoint;
use crate::{
    components::{Loading, MetricCard},
    navigation::NavShell,
    view_state::PageState,
};
use afrifiscal_core::{
    Overview,
    utils::{format_fixed, format_raw_percent},
};
use askama::Template;
use indexmap::IndexMap;

/// Short narrative derived from the averages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insight {
    /// Heading
    pub title: &'static str,
    /// Body text
    pub text: String,
}

/// Everything the dashboard shows for one overview response
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Period covered, e.g. `2000-2023`
    pub time_period: String,
    /// Headline cards
    pub cards: Vec<MetricCard>,
    /// Key metrics bar series (HDI scaled to 0-100)
    pub key_metrics: Vec<SeriesPoint>,
    /// Countries per region with their share
    pub regions: Vec<SeriesPoint>,
    /// Countries per income group
    pub income_groups: Vec<SeriesPoint>,
    /// Narrative insights
    pub insights: Vec<Insight>,
}

impl DashboardView {
    /// Derive the dashboard from an overview
    #[must_use]
    pub fn from_overview(overview: &Overview) -> Self {
        let metrics = &overview.key_metrics;
        let hdi = format_fixed(metrics.avg_hdi, 3);

        let cards = vec![
            MetricCard::new("Total Countries", overview.total_countries.to_string())
                .with_subtitle("African nations analyzed"),
            MetricCard::new("Average GDP Growth", format_raw_percent(metrics.avg_gdp_growth))
                .with_subtitle(format!("Year {}", overview.latest_year)),
            MetricCard::new("Average Debt/GDP", format_raw_percent(metrics.avg_debt_gdp))
                .with_subtitle("Government debt ratio"),
            MetricCard::new("Average HDI", hdi.clone()).with_subtitle("Human Development Index"),
        ];

        let key_metrics = vec![
            SeriesPoint::new("GDP Growth", metrics.avg_gdp_growth),
            SeriesPoint::new("Debt/GDP", metrics.avg_debt_gdp),
            SeriesPoint::new("Inflation", metrics.avg_inflation),
            SeriesPoint::new("HDI", metrics.avg_hdi * 100.0),
        ];

        let insights = vec![
            Insight {
                title: "Economic Growth",
                text: format!(
                    "Average GDP growth of {} indicates moderate economic expansion across the continent.",
                    format_raw_percent(metrics.avg_gdp_growth)
                ),
            },
            Insight {
                title: "Debt Levels",
                text: format!(
                    "Average debt-to-GDP ratio of {} requires careful fiscal management.",
                    format_raw_percent(metrics.avg_debt_gdp)
                ),
            },
            Insight {
                title: "Human Development",
                text: format!(
                    "HDI of {hdi} shows progress in education, health, and living standards."
                ),
            },
        ];

        Self {
            time_period: overview.time_period.clone(),
            cards,
            key_metrics,
            regions: distribution(&overview.regional_breakdown),
            income_groups: distribution(&overview.income_groups),
            insights,
        }
    }
}

/// Turn a count map into series points in server order, each shown with
/// its share of the total
fn distribution(counts: &IndexMap<String, u32>) -> Vec<SeriesPoint> {
    let total: u32 = counts.values().sum();
    counts
        .iter()
        .map(|(name, count)| {
            let value = f64::from(*count);
            let share = if total == 0 {
                0.0
            } else {
                value * 100.0 / f64::from(total)
            };
            SeriesPoint::with_display(name.clone(), value, format!("{count} ({share:.0}%)"))
        })
        .collect()
}

/// Dashboard page
#[derive(Debug, Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Loading indicator
    pub loading: Loading,
    /// Failure message, if the overview could not be loaded
    pub error: Option<String>,
    /// Derived view, when data is available
    pub view: Option<DashboardView>,
}

impl DashboardTemplate {
    /// Build the page from its load state
    #[must_use]
    pub fn from_state(nav: NavShell, state: &PageState<(), Overview>) -> Self {
        Self {
            nav,
            loading: Loading::when(state.is_loading()),
            error: state.error().map(ToString::to_string),
            view: state.data().map(DashboardView::from_overview),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn overview() -> Overview {
        serde_json::from_value(json!({
            "total_countries": 54,
            "time_period": "2000-2023",
            "latest_year": 2023,
            "key_metrics": {
                "avg_gdp_growth": 3.8,
                "avg_debt_gdp": 61.2,
                "avg_inflation": 9.4,
                "avg_hdi": 0.5571
            },
            "regional_breakdown": {"West Africa": 3, "East Africa": 1},
            "income_groups": {"Low income": 2, "Upper middle income": 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_cards_format_values() {
        let view = DashboardView::from_overview(&overview());

        let values: Vec<&str> = view.cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["54", "3.8%", "61.2%", "0.557"]);
        assert_eq!(view.cards[1].subtitle.as_deref(), Some("Year 2023"));
    }

    #[test]
    fn test_key_metrics_scale_hdi() {
        let view = DashboardView::from_overview(&overview());

        let hdi = view.key_metrics.iter().find(|p| p.label == "HDI").unwrap();
        assert!((hdi.value - 55.71).abs() < 1e-9);
    }

    #[test]
    fn test_breakdowns_keep_server_order() {
        let view = DashboardView::from_overview(&overview());

        let regions: Vec<&str> = view.regions.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(regions, vec!["West Africa", "East Africa"]);
        assert_eq!(view.regions[0].display, "3 (75%)");
        assert_eq!(view.income_groups[1].value, 2.0);
    }

    #[test]
    fn test_insights_mention_averages() {
        let view = DashboardView::from_overview(&overview());

        assert_eq!(view.insights.len(), 3);
        assert!(view.insights[0].text.contains("3.8%"));
        assert!(view.insights[2].text.contains("0.557"));
    }

    #[test]
    fn test_failed_state_has_no_view() {
        let mut state: PageState<(), Overview> = PageState::new(());
        state.select(());
        state.fail(
            &(),
            &afrifiscal_core::Error::Status {
                endpoint: "/overview".to_string(),
                status: 500,
            },
        );

        let page = DashboardTemplate::from_state(NavShell::for_path("/", false), &state);
        assert!(page.view.is_none());
        assert!(page.error.is_some());
        assert!(!page.loading.visible);
    }

    #[test]
    fn test_mid_load_state_renders_indicator() {
        let mut state: PageState<(), Overview> = PageState::new(());
        state.select(());

        let html = DashboardTemplate::from_state(NavShell::for_path("/", false), &state)
            .render()
            .unwrap();
        assert!(html.contains("role=\"status\">Loading...</div>"));
    }
}
