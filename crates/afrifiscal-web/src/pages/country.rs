//! Country analysis: one country's current, historical and predicted metrics

use super::{ChoiceLink, SeriesPoint, query_href, risk_tone};
use crate::{
    components::{Loading, MetricCard, Trend},
    navigation::NavShell,
    view_state::PageState,
};
use afrifiscal_core::{
    CountryAnalysis,
    types::{CurrentMetrics, HistoricalPoint},
    utils::{contains_ignore_case, format_fixed, format_percent, format_raw_percent, humanize_identifier},
};
use askama::Template;
use serde::Deserialize;

/// Countries offered for selection
pub const COUNTRIES: [&str; 25] = [
    "South Africa",
    "Nigeria",
    "Kenya",
    "Ghana",
    "Egypt",
    "Morocco",
    "Tunisia",
    "Ethiopia",
    "Tanzania",
    "Uganda",
    "Rwanda",
    "Senegal",
    "Ivory Coast",
    "Cameroon",
    "Zambia",
    "Zimbabwe",
    "Botswana",
    "Namibia",
    "Mauritius",
    "Algeria",
    "Angola",
    "Mozambique",
    "Madagascar",
    "Mali",
    "Burkina Faso",
];

/// Country selected when none is given
pub const DEFAULT_COUNTRY: &str = "Nigeria";

/// Query parameters of `/country`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryQuery {
    /// Selected country
    pub name: Option<String>,
    /// Search term for the country list
    pub q: Option<String>,
}

impl CountryQuery {
    /// Selected country, falling back to the default
    #[must_use]
    pub fn selected(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_COUNTRY)
            .to_string()
    }

    /// Search term, empty when absent
    #[must_use]
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Countries matching the search term, each linking to its analysis
#[must_use]
pub fn country_choices(search: &str, selected: &str) -> Vec<ChoiceLink> {
    COUNTRIES
        .iter()
        .filter(|country| contains_ignore_case(country, search))
        .map(|country| ChoiceLink {
            label: (*country).to_string(),
            href: query_href("/country", &[("name", *country), ("q", search)]),
            selected: *country == selected,
        })
        .collect()
}

/// Trend for a year-over-year delta
///
/// `higher_is_better` decides whether a rise counts as good news. A missing
/// or zero delta has no trend.
#[must_use]
pub fn metric_trend(delta: Option<f64>, higher_is_better: bool) -> Option<Trend> {
    let delta = delta.filter(|d| *d != 0.0 && !d.is_nan())?;
    Some(Trend {
        value: delta.abs(),
        is_positive: if higher_is_better { delta > 0.0 } else { delta < 0.0 },
    })
}

/// Radar axes for a country, each scaled to roughly 0-100
#[must_use]
pub fn radar_series(metrics: &CurrentMetrics) -> Vec<SeriesPoint> {
    vec![
        SeriesPoint::new("GDP Growth", (metrics.gdp_growth * 10.0).min(100.0)),
        SeriesPoint::new("Fiscal Space", metrics.fiscal_space.mul_add(5.0, 50.0).max(0.0)),
        SeriesPoint::new("Debt Sust.", metrics.debt_sustainability),
        SeriesPoint::new("HDI", metrics.hdi * 100.0),
        SeriesPoint::new("Resilience", metrics.economic_resilience.min(100.0)),
    ]
}

/// Header line of the analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryHeader {
    /// Country name
    pub country: String,
    /// Region
    pub region: String,
    /// Income group
    pub income_group: String,
    /// Latest year with data
    pub year: i32,
}

/// Risk label with its display tone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskBadge {
    /// What the risk is about
    pub label: &'static str,
    /// Server label, e.g. `High`
    pub value: String,
    /// Display tone
    pub tone: &'static str,
}

impl RiskBadge {
    fn new(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            tone: risk_tone(value),
        }
    }
}

/// One row of the historical table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    /// Year
    pub year: i32,
    /// GDP growth
    pub gdp_growth: String,
    /// Debt to GDP
    pub debt: String,
    /// Inflation
    pub inflation: String,
}

impl From<&HistoricalPoint> for HistoryRow {
    fn from(point: &HistoricalPoint) -> Self {
        Self {
            year: point.year,
            gdp_growth: format_raw_percent(point.gdp_growth),
            debt: format_raw_percent(point.government_debt_gdp),
            inflation: format_raw_percent(point.inflation),
        }
    }
}

/// Forecast for one metric
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRow {
    /// Metric name with underscores replaced by spaces
    pub metric: String,
    /// `(Year n, value)` pairs, 1-based
    pub values: Vec<(String, String)>,
}

/// Everything the page shows for one country analysis
#[derive(Debug, Clone, PartialEq)]
pub struct CountryView {
    /// Name, region, income group and year
    pub header: CountryHeader,
    /// Headline cards with trends
    pub cards: Vec<MetricCard>,
    /// Risk badges
    pub risks: Vec<RiskBadge>,
    /// Fiscal space, debt sustainability and resilience scores
    pub advanced: Vec<SeriesPoint>,
    /// Radar series
    pub radar: Vec<SeriesPoint>,
    /// Historical series, oldest first as sent by the server
    pub history: Vec<HistoryRow>,
    /// Forecast rows, empty when the server sent none
    pub predictions: Vec<PredictionRow>,
}

impl CountryView {
    /// Derive the view from an analysis
    #[must_use]
    pub fn from_analysis(analysis: &CountryAnalysis) -> Self {
        let info = &analysis.basic_info;
        let metrics = &analysis.current_metrics;
        let trend = |key: &str| analysis.trends.get(key).copied();

        let cards = vec![
            MetricCard::new("GDP Growth", format_raw_percent(metrics.gdp_growth))
                .with_trend(metric_trend(trend("GDP_Growth"), true)),
            MetricCard::new("Government Debt", format_raw_percent(metrics.government_debt))
                .with_subtitle("of GDP")
                .with_trend(metric_trend(trend("Government_Debt_GDP"), false)),
            MetricCard::new("Inflation Rate", format_raw_percent(metrics.inflation))
                .with_trend(metric_trend(trend("Inflation"), false)),
            MetricCard::new("HDI Score", format_fixed(metrics.hdi, 3)),
        ];

        let risk = &analysis.risk_assessment;
        let risks = vec![
            RiskBadge::new("Debt Risk", &risk.debt_risk),
            RiskBadge::new("Inflation Risk", &risk.inflation_risk),
            RiskBadge::new("Fiscal Risk", &risk.fiscal_risk),
        ];

        let advanced = vec![
            SeriesPoint::new("Fiscal Space", metrics.fiscal_space),
            SeriesPoint::with_display(
                "Debt Sustainability",
                metrics.debt_sustainability,
                format_fixed(metrics.debt_sustainability, 0),
            ),
            SeriesPoint::with_display(
                "Economic Resilience",
                metrics.economic_resilience,
                format_fixed(metrics.economic_resilience, 0),
            ),
        ];

        let predictions = analysis
            .predictions
            .iter()
            .map(|(metric, values)| PredictionRow {
                metric: humanize_identifier(metric),
                values: values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (format!("Year {}", i + 1), format_percent(*v, 2)))
                    .collect(),
            })
            .collect();

        Self {
            header: CountryHeader {
                country: info.country.clone(),
                region: info.region.clone(),
                income_group: info.income_group.clone(),
                year: info.latest_year,
            },
            cards,
            risks,
            advanced,
            radar: radar_series(metrics),
            history: analysis.historical_data.iter().map(HistoryRow::from).collect(),
            predictions,
        }
    }
}

/// Country analysis page
#[derive(Debug, Template)]
#[template(path = "country.html")]
pub struct CountryTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Current search term
    pub search: String,
    /// Selected country
    pub selected: String,
    /// Country list filtered by the search term
    pub choices: Vec<ChoiceLink>,
    /// Loading indicator
    pub loading: Loading,
    /// Failure message for the selected country
    pub error: Option<String>,
    /// Derived view, when data for the selection is available
    pub view: Option<CountryView>,
}

impl CountryTemplate {
    /// Build the page from its load state
    #[must_use]
    pub fn from_state(nav: NavShell, search: &str, state: &PageState<String, CountryAnalysis>) -> Self {
        let selected = state.selection().clone();
        Self {
            nav,
            search: search.to_string(),
            choices: country_choices(search, &selected),
            selected,
            loading: Loading::when(state.is_loading()),
            error: state.error().map(ToString::to_string),
            view: state.data().map(CountryView::from_analysis),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn analysis(country: &str) -> CountryAnalysis {
        serde_json::from_value(json!({
            "basic_info": {
                "country": country,
                "region": "West Africa",
                "income_group": "Lower middle income",
                "latest_year": 2023
            },
            "current_metrics": {
                "gdp_growth": 3.2,
                "government_debt": 38.0,
                "inflation": 24.7,
                "budget_balance": -4.1,
                "revenue_gdp": 7.5,
                "hdi": 0.548,
                "fiscal_space": -3.0,
                "debt_sustainability": 62.4,
                "economic_resilience": 140.0
            },
            "trends": {"GDP_Growth": 0.5, "Government_Debt_GDP": 2.0, "Inflation": -1.5},
            "risk_assessment": {"debt_risk": "Low", "inflation_risk": "High", "fiscal_risk": "Severe"},
            "predictions": {"GDP_Growth": [3.1, 3.4, 3.6]},
            "historical_data": [
                {"Year": 2022, "GDP_Growth": 3.3, "Government_Debt_GDP": 37.0, "Inflation": 18.8},
                {"Year": 2023, "GDP_Growth": 3.2, "Government_Debt_GDP": 38.0, "Inflation": 24.7}
            ]
        }))
        .unwrap()
    }

    #[rstest]
    #[case(Some(0.5), true, Some(true))]
    #[case(Some(-0.5), true, Some(false))]
    #[case(Some(2.0), false, Some(false))]
    #[case(Some(-1.5), false, Some(true))]
    #[case(Some(0.0), true, None)]
    #[case(None, false, None)]
    fn test_metric_trend(
        #[case] delta: Option<f64>,
        #[case] higher_is_better: bool,
        #[case] expected: Option<bool>,
    ) {
        assert_eq!(
            metric_trend(delta, higher_is_better).map(|t| t.is_positive),
            expected
        );
    }

    #[test]
    fn test_trend_value_is_absolute() {
        assert_eq!(metric_trend(Some(-1.5), false).unwrap().value, 1.5);
    }

    #[test]
    fn test_radar_scaling() {
        let view = CountryView::from_analysis(&analysis("Nigeria"));
        let values: Vec<f64> = view.radar.iter().map(|p| p.value).collect();

        assert!((values[0] - 32.0).abs() < 1e-9);
        assert!((values[1] - 35.0).abs() < 1e-9);
        assert_eq!(values[2], 62.4);
        assert!((values[3] - 54.8).abs() < 1e-9);
        assert_eq!(values[4], 100.0);
    }

    #[test]
    fn test_radar_clamps() {
        let mut metrics = analysis("Nigeria").current_metrics;
        metrics.gdp_growth = 15.0;
        metrics.fiscal_space = -20.0;

        let radar = radar_series(&metrics);
        assert_eq!(radar[0].value, 100.0);
        assert_eq!(radar[1].value, 0.0);
    }

    #[test]
    fn test_view_from_analysis() {
        let view = CountryView::from_analysis(&analysis("Nigeria"));

        assert_eq!(view.header.country, "Nigeria");
        assert_eq!(view.cards[0].value, "3.2%");
        assert_eq!(view.cards[3].value, "0.548");
        assert!(view.cards[0].trend.unwrap().is_positive);
        assert!(!view.cards[1].trend.unwrap().is_positive);
        assert!(view.cards[3].trend.is_none());

        let tones: Vec<&str> = view.risks.iter().map(|r| r.tone).collect();
        assert_eq!(tones, vec!["low", "high", "neutral"]);

        assert_eq!(view.advanced[0].display, "-3.0");
        assert_eq!(view.advanced[1].display, "62");
        assert_eq!(view.history.len(), 2);
        assert_eq!(view.history[0].year, 2022);
    }

    #[test]
    fn test_prediction_rows() {
        let view = CountryView::from_analysis(&analysis("Nigeria"));

        assert_eq!(view.predictions.len(), 1);
        assert_eq!(view.predictions[0].metric, "GDP Growth");
        assert_eq!(
            view.predictions[0].values,
            vec![
                ("Year 1".to_string(), "3.10%".to_string()),
                ("Year 2".to_string(), "3.40%".to_string()),
                ("Year 3".to_string(), "3.60%".to_string()),
            ]
        );
    }

    #[test]
    fn test_country_choices_filter_and_mark_selection() {
        let choices = country_choices("ia", "Nigeria");
        let names: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

        assert_eq!(
            names,
            vec!["Nigeria", "Tunisia", "Ethiopia", "Tanzania", "Zambia", "Namibia", "Algeria"]
        );
        assert!(names.iter().all(|n| n.to_lowercase().contains("ia")));
        assert!(choices.iter().any(|c| c.selected && c.label == "Nigeria"));
        assert_eq!(choices.iter().filter(|c| c.selected).count(), 1);
    }

    #[test]
    fn test_country_choices_link_keeps_search() {
        let choices = country_choices("south", "Nigeria");

        assert_eq!(choices.len(), 1);
        assert_eq!(choices[0].href, "/country?name=South%20Africa&q=south");
    }

    #[test]
    fn test_query_defaults_to_nigeria() {
        assert_eq!(CountryQuery::default().selected(), "Nigeria");
        let query = CountryQuery {
            name: Some("  ".to_string()),
            ..CountryQuery::default()
        };
        assert_eq!(query.selected(), "Nigeria");
    }

    #[test]
    fn test_page_shows_only_selected_country() {
        let mut state = PageState::new("Nigeria".to_string());
        state.select("Nigeria".to_string());
        state.select("Kenya".to_string());
        state.receive(&"Nigeria".to_string(), analysis("Nigeria"));
        state.receive(&"Kenya".to_string(), analysis("Kenya"));

        let page = CountryTemplate::from_state(NavShell::for_path("/country", false), "", &state);
        assert_eq!(page.view.unwrap().header.country, "Kenya");
        assert_eq!(page.selected, "Kenya");
    }
}
