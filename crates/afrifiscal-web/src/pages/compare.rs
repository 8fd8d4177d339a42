//! Side-by-side comparison of several countries

use super::{Series, SeriesPoint, split_list};
use crate::{components::Loading, navigation::NavShell, view_state::PageState};
use afrifiscal_core::{
    Comparison, Error, Result,
    types::CountryMetrics,
    utils::format_raw_percent,
};
use askama::Template;
use indexmap::IndexMap;
use serde::Deserialize;

/// Countries that can be added to a comparison
pub const COMPARE_COUNTRIES: [&str; 13] = [
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
];

/// Initial selection
pub const DEFAULT_SELECTION: [&str; 2] = ["Nigeria", "Kenya"];

/// Most countries compared at once
pub const MAX_SELECTED: usize = 5;

/// Fewest countries a comparison needs
pub const MIN_SELECTED: usize = 2;

/// Alert shown when a comparison is requested with too few countries
pub const ALERT_TOO_FEW: &str = "Please select at least two countries to compare.";

/// Alert shown when the server has nothing to compare
pub const ALERT_NO_DATA: &str = "No data available for the selected countries.";

/// Alert shown when the comparison request fails
pub const ALERT_FETCH_ERROR: &str =
    "An error occurred while fetching comparison data. Please try again.";

/// Query parameters of `/compare`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompareQuery {
    /// Comma separated selection; absent means the default selection
    pub countries: Option<String>,
    /// Set to run the comparison
    pub run: Option<String>,
}

impl CompareQuery {
    /// Whether the comparison was requested
    #[must_use]
    pub fn should_run(&self) -> bool {
        self.run
            .as_deref()
            .is_some_and(|run| !matches!(run, "" | "0" | "false"))
    }
}

/// Ordered set of selected countries, at most [`MAX_SELECTED`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection(Vec<String>);

impl Default for Selection {
    fn default() -> Self {
        Self(DEFAULT_SELECTION.iter().map(ToString::to_string).collect())
    }
}

impl Selection {
    /// Parse the `countries` query value
    ///
    /// A missing value gives the default selection. Duplicates are dropped
    /// and the list is cut to [`MAX_SELECTED`] entries.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        if value.is_none() {
            return Self::default();
        }
        let mut countries: Vec<String> = Vec::new();
        for country in split_list(value) {
            if countries.len() == MAX_SELECTED {
                break;
            }
            if !countries.contains(&country) {
                countries.push(country);
            }
        }
        Self(countries)
    }

    /// Selected countries in selection order
    #[must_use]
    pub fn countries(&self) -> &[String] {
        &self.0
    }

    /// Whether no more countries can be added
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.0.len() >= MAX_SELECTED
    }

    /// Whether `country` is selected
    #[must_use]
    pub fn contains(&self, country: &str) -> bool {
        self.0.iter().any(|c| c == country)
    }

    /// Selection with `country` appended, unchanged if it is already
    /// selected or the selection is full
    #[must_use]
    pub fn with(&self, country: &str) -> Self {
        let mut next = self.clone();
        if !self.contains(country) && !self.is_full() {
            next.0.push(country.to_string());
        }
        next
    }

    /// Selection without `country`
    #[must_use]
    pub fn without(&self, country: &str) -> Self {
        Self(self.0.iter().filter(|c| *c != country).cloned().collect())
    }

    /// Check the selection is large enough to compare
    ///
    /// # Errors
    ///
    /// Returns a validation error when fewer than [`MIN_SELECTED`] countries
    /// are selected.
    pub fn validate(&self) -> Result<()> {
        if self.0.len() < MIN_SELECTED {
            return Err(Error::validation("countries", ALERT_TOO_FEW));
        }
        Ok(())
    }

    /// Value for the `countries` query parameter
    #[must_use]
    pub fn query_value(&self) -> String {
        self.0.join(",")
    }

    fn href(&self, run: bool) -> String {
        let countries = self.query_value();
        let mut href = format!("/compare?countries={}", urlencoding::encode(&countries));
        if run {
            href.push_str("&run=1");
        }
        href
    }
}

/// Alert text for a failed comparison
#[must_use]
pub const fn alert_for(error: &Error) -> &'static str {
    match error {
        Error::Validation { .. } => ALERT_TOO_FEW,
        Error::EmptyResult { .. } => ALERT_NO_DATA,
        _ => ALERT_FETCH_ERROR,
    }
}

/// A selected country with the link that removes it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedChip {
    /// Country name
    pub country: String,
    /// Link to the selection without this country
    pub remove_href: String,
}

/// A country that can be added, with no link when the selection is full
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOption {
    /// Country name
    pub country: String,
    /// Link to the selection with this country
    pub add_href: Option<String>,
}

/// One table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableCell {
    /// Display text
    pub text: String,
    /// Display tone, empty for none
    pub tone: &'static str,
}

/// One metric row of the comparison table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Metric name
    pub metric: &'static str,
    /// One cell per country, in response order
    pub cells: Vec<TableCell>,
}

/// Derived comparison
#[derive(Debug, Clone, PartialEq)]
pub struct CompareView {
    /// Year the comparison refers to
    pub comparison_year: Option<i32>,
    /// Countries in response order
    pub countries: Vec<String>,
    /// Metric rows
    pub table: Vec<TableRow>,
    /// Radar series, one per metric with a point per country
    pub radar: Vec<Series>,
    /// Bar series, one per metric with a point per country
    pub bars: Vec<Series>,
}

impl CompareView {
    /// Derive the comparison view
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyResult`] when the response carries no
    /// `countries` map.
    pub fn from_comparison(comparison: &Comparison) -> Result<Self> {
        let countries = comparison
            .countries
            .as_ref()
            .ok_or_else(|| Error::empty("countries"))?;

        Ok(Self {
            comparison_year: comparison.comparison_year,
            countries: countries.keys().cloned().collect(),
            table: table_rows(countries),
            radar: radar_series(countries),
            bars: bar_series(countries),
        })
    }
}

fn row<F>(metric: &'static str, countries: &IndexMap<String, CountryMetrics>, cell: F) -> TableRow
where
    F: Fn(&CountryMetrics) -> TableCell,
{
    TableRow {
        metric,
        cells: countries.values().map(cell).collect(),
    }
}

fn plain(text: String) -> TableCell {
    TableCell { text, tone: "" }
}

fn table_rows(countries: &IndexMap<String, CountryMetrics>) -> Vec<TableRow> {
    vec![
        row("GDP Growth", countries, |m| plain(format_raw_percent(m.gdp_growth))),
        row("Government Debt", countries, |m| plain(format_raw_percent(m.government_debt))),
        row("Inflation", countries, |m| plain(format_raw_percent(m.inflation))),
        row("Budget Balance", countries, |m| TableCell {
            text: format_raw_percent(m.budget_balance),
            tone: if m.budget_balance >= 0.0 { "positive" } else { "negative" },
        }),
        row("HDI", countries, |m| plain(afrifiscal_core::utils::format_raw(m.hdi))),
        row("Debt Sustainability", countries, |m| {
            plain(afrifiscal_core::utils::format_raw(m.debt_sustainability))
        }),
        row("Region", countries, |m| plain(m.region.clone())),
        row("Income Group", countries, |m| plain(m.income_group.clone())),
    ]
}

fn series<F>(name: &str, countries: &IndexMap<String, CountryMetrics>, value: F) -> Series
where
    F: Fn(&CountryMetrics) -> f64,
{
    Series {
        name: name.to_string(),
        points: countries
            .iter()
            .map(|(country, metrics)| SeriesPoint::new(country.clone(), value(metrics)))
            .collect(),
    }
}

/// Radar series scaled to roughly 0-100
#[must_use]
pub fn radar_series(countries: &IndexMap<String, CountryMetrics>) -> Vec<Series> {
    vec![
        series("GDP Growth", countries, |m| (m.gdp_growth * 10.0).abs()),
        series("Revenue/GDP", countries, |m| m.revenue_gdp),
        series("HDI", countries, |m| m.hdi * 100.0),
        series("Debt Sustainability", countries, |m| m.debt_sustainability),
        series("Budget Balance", countries, |m| (m.budget_balance + 20.0).max(0.0) * 3.0),
    ]
}

/// Bar series of raw values
#[must_use]
pub fn bar_series(countries: &IndexMap<String, CountryMetrics>) -> Vec<Series> {
    vec![
        series("GDP Growth", countries, |m| m.gdp_growth),
        series("Debt/GDP", countries, |m| m.government_debt),
        series("Inflation", countries, |m| m.inflation),
        series("Budget Balance", countries, |m| m.budget_balance),
    ]
}

/// Compare countries page
#[derive(Debug, Template)]
#[template(path = "compare.html")]
pub struct CompareTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Selected countries with remove links
    pub selected: Vec<SelectedChip>,
    /// Countries that can still be added
    pub options: Vec<AddOption>,
    /// Link that runs the comparison, absent with too few countries
    pub compare_href: Option<String>,
    /// Loading indicator
    pub loading: Loading,
    /// Blocking alert
    pub alert: Option<&'static str>,
    /// Comparison result
    pub view: Option<CompareView>,
}

impl CompareTemplate {
    /// Page with the selection controls only, before any comparison ran
    #[must_use]
    pub fn idle(nav: NavShell, selection: &Selection) -> Self {
        let selected = selection
            .countries()
            .iter()
            .map(|country| SelectedChip {
                country: country.clone(),
                remove_href: selection.without(country).href(false),
            })
            .collect();

        let options = COMPARE_COUNTRIES
            .iter()
            .filter(|country| !selection.contains(country))
            .map(|country| AddOption {
                country: (*country).to_string(),
                add_href: (!selection.is_full()).then(|| selection.with(country).href(false)),
            })
            .collect();

        Self {
            nav,
            selected,
            options,
            compare_href: selection.validate().is_ok().then(|| selection.href(true)),
            loading: Loading::default(),
            alert: None,
            view: None,
        }
    }

    /// Page showing an alert instead of a result
    #[must_use]
    pub fn alert(nav: NavShell, selection: &Selection, error: &Error) -> Self {
        Self {
            alert: Some(alert_for(error)),
            ..Self::idle(nav, selection)
        }
    }

    /// Page built from the comparison load state
    #[must_use]
    pub fn from_state(nav: NavShell, state: &PageState<Vec<String>, Comparison>) -> Self {
        let selection = Selection(state.selection().clone());
        let mut page = Self::idle(nav, &selection);
        page.loading = Loading::when(state.is_loading());

        if state.error().is_some() {
            page.alert = Some(ALERT_FETCH_ERROR);
        } else if let Some(comparison) = state.data() {
            match CompareView::from_comparison(comparison) {
                Ok(view) => page.view = Some(view),
                Err(e) => page.alert = Some(alert_for(&e)),
            }
        }
        page
    }
}
