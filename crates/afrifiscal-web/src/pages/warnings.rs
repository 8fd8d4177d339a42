//! Early warning system: active risk alerts per country

use super::{ChoiceLink, query_href};
use crate::{
    components::Loading,
    filters::Filter,
    navigation::NavShell,
    view_state::PageState,
};
use afrifiscal_core::{
    EarlyWarnings,
    types::{CountryWarnings, WarningLevel},
    utils::{contains_ignore_case, pluralize},
};
use askama::Template;
use serde::Deserialize;

/// Level filters offered on the page
pub const LEVEL_OPTIONS: [&str; 3] = ["ALL", "HIGH", "MEDIUM"];

/// Query parameters of `/warnings`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WarningQuery {
    /// Country search term
    pub q: Option<String>,
    /// Level filter
    pub level: Option<String>,
}

impl WarningQuery {
    /// Search term, empty when absent
    #[must_use]
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    /// Level filter, `All` when absent or unknown
    #[must_use]
    pub fn level(&self) -> Filter<WarningLevel> {
        Filter::parse(self.level.as_deref())
    }
}

/// Display label for a warning type; unknown types are shown as sent
#[must_use]
pub fn type_label(kind: &str) -> &str {
    match kind {
        "DEBT_RISK" => "Debt Risk",
        "INFLATION_RISK" => "Inflation Risk",
        "FISCAL_RISK" => "Fiscal Risk",
        other => other,
    }
}

/// Display tone for a warning level
#[must_use]
pub const fn level_tone(level: WarningLevel) -> &'static str {
    match level {
        WarningLevel::High => "high",
        WarningLevel::Medium => "medium",
        WarningLevel::Low => "low",
    }
}

/// Headline counts over all warnings, ignoring the filters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WarningCounts {
    /// Countries with at least one HIGH warning
    pub high_risk_countries: usize,
    /// Countries with at least one MEDIUM warning
    pub medium_risk_countries: usize,
    /// Individual warnings across all countries
    pub total_warnings: usize,
}

impl WarningCounts {
    /// Count over a warning list
    #[must_use]
    pub fn from_warnings(warnings: &[CountryWarnings]) -> Self {
        let has_level = |entry: &CountryWarnings, level: WarningLevel| {
            entry.warnings.iter().any(|w| w.level == level)
        };

        Self {
            high_risk_countries: warnings.iter().filter(|e| has_level(e, WarningLevel::High)).count(),
            medium_risk_countries: warnings
                .iter()
                .filter(|e| has_level(e, WarningLevel::Medium))
                .count(),
            total_warnings: warnings.iter().map(|e| e.warnings.len()).sum(),
        }
    }
}

/// Countries matching the search term and the level filter
///
/// A country matches a level when any of its warnings has that level.
#[must_use]
pub fn filter_warnings<'a>(
    warnings: &'a [CountryWarnings],
    search: &str,
    level: &Filter<WarningLevel>,
) -> Vec<&'a CountryWarnings> {
    warnings
        .iter()
        .filter(|entry| contains_ignore_case(&entry.country, search))
        .filter(|entry| level.matches_any(entry.warnings.iter().map(|w| &w.level)))
        .collect()
}

/// One alert as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningItem {
    /// Level, e.g. `HIGH`
    pub level: &'static str,
    /// Display tone of the level
    pub tone: &'static str,
    /// Type label
    pub kind: String,
    /// Message
    pub message: String,
}

/// One country's alerts as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryWarningCard {
    /// Country name
    pub country: String,
    /// `1 Warning`, `3 Warnings`
    pub count_label: String,
    /// Alerts in server order
    pub items: Vec<WarningItem>,
}

impl From<&CountryWarnings> for CountryWarningCard {
    fn from(entry: &CountryWarnings) -> Self {
        Self {
            country: entry.country.clone(),
            count_label: pluralize(entry.warnings.len(), "Warning", "Warnings"),
            items: entry
                .warnings
                .iter()
                .map(|w| WarningItem {
                    level: w.level.as_str(),
                    tone: level_tone(w.level),
                    kind: type_label(&w.kind).to_string(),
                    message: w.message.clone(),
                })
                .collect(),
        }
    }
}

/// Derived warning page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningsView {
    /// Headline counts
    pub counts: WarningCounts,
    /// Filtered country cards; empty renders the empty state
    pub cards: Vec<CountryWarningCard>,
}

impl WarningsView {
    /// Derive the page for a search term and level filter
    #[must_use]
    pub fn new(warnings: &EarlyWarnings, search: &str, level: &Filter<WarningLevel>) -> Self {
        Self {
            counts: WarningCounts::from_warnings(&warnings.warnings),
            cards: filter_warnings(&warnings.warnings, search, level)
                .into_iter()
                .map(CountryWarningCard::from)
                .collect(),
        }
    }
}

/// Early warning page
#[derive(Debug, Template)]
#[template(path = "warnings.html")]
pub struct WarningsTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Current search term
    pub search: String,
    /// Current level filter value
    pub level: String,
    /// Level filter links
    pub level_links: Vec<ChoiceLink>,
    /// Loading indicator
    pub loading: Loading,
    /// Failure message
    pub error: Option<String>,
    /// Derived view; a failed fetch shows zero counts and the empty state
    pub view: WarningsView,
}

impl WarningsTemplate {
    /// Build the page from its load state and the filters
    #[must_use]
    pub fn from_state(nav: NavShell, state: &PageState<(), EarlyWarnings>, query: &WarningQuery) -> Self {
        let search = query.search();
        let level = query.level();
        let level_value = level.query_value();

        let level_links = LEVEL_OPTIONS
            .iter()
            .map(|option| ChoiceLink {
                label: (*option).to_string(),
                href: query_href("/warnings", &[("q", search), ("level", *option)]),
                selected: *option == level_value,
            })
            .collect();

        let empty = EarlyWarnings::default();
        let warnings = state.data().unwrap_or(&empty);

        Self {
            nav,
            search: search.to_string(),
            level: level_value,
            level_links,
            loading: Loading::when(state.is_loading()),
            error: state.error().map(ToString::to_string),
            view: WarningsView::new(warnings, search, &level),
        }
    }
}
