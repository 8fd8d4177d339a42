//! Debt sustainability: server classification of each country's debt

use super::{ChoiceLink, ScatterPoint, ScatterSeries, query_href};
use crate::{
    components::Loading,
    filters::{Filter, count_by, filter_records, group_by},
    navigation::NavShell,
    view_state::PageState,
};
use afrifiscal_core::{
    DebtSustainabilityEntry,
    types::SustainabilityCategory,
    utils::{format_fixed, format_percent},
};
use askama::Template;
use serde::Deserialize;

/// Category legend: the thresholds the server classifies by
///
/// Shown for reference only; the page never reclassifies a record.
pub const THRESHOLD_LEGEND: [(SustainabilityCategory, &str); 4] = [
    (SustainabilityCategory::Sustainable, "Debt < 40%, Service < 15%"),
    (SustainabilityCategory::ModeratelySustainable, "Debt < 60%, Service < 25%"),
    (SustainabilityCategory::AtRisk, "Debt < 80%"),
    (SustainabilityCategory::Unsustainable, "Debt ≥ 80%"),
];

/// Indicator glossary shown under the legend
pub const KEY_INDICATORS: [(&str, &str); 4] = [
    ("Debt Ratio", "Government debt as % of GDP"),
    ("Debt Service", "Interest payments as % of revenue"),
    ("Growth Rate", "Annual GDP growth percentage"),
    ("Primary Balance", "Budget balance excluding interest"),
];

/// Query parameters of `/debt-sustainability`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DebtQuery {
    /// Category filter
    pub status: Option<String>,
}

impl DebtQuery {
    /// Category filter, `All` when absent or unknown
    #[must_use]
    pub fn status(&self) -> Filter<SustainabilityCategory> {
        Filter::parse(self.status.as_deref())
    }
}

/// Card title of a category
#[must_use]
pub const fn category_title(category: SustainabilityCategory) -> &'static str {
    match category {
        SustainabilityCategory::Sustainable => "Sustainable",
        SustainabilityCategory::ModeratelySustainable => "Moderately Sustainable",
        SustainabilityCategory::AtRisk => "At Risk",
        SustainabilityCategory::Unsustainable => "Unsustainable",
    }
}

/// Display tone of a category
#[must_use]
pub const fn category_tone(category: SustainabilityCategory) -> &'static str {
    match category {
        SustainabilityCategory::Sustainable => "sustainable",
        SustainabilityCategory::ModeratelySustainable => "moderate",
        SustainabilityCategory::AtRisk => "at-risk",
        SustainabilityCategory::Unsustainable => "unsustainable",
    }
}

/// Display tone of a primary balance; a surplus or balanced budget is positive
#[must_use]
pub const fn balance_tone(primary_balance: f64) -> &'static str {
    if primary_balance >= 0.0 {
        "positive"
    } else {
        "negative"
    }
}

/// Count of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// Card title
    pub title: &'static str,
    /// Display tone
    pub tone: &'static str,
    /// Number of records in the category
    pub count: usize,
}

/// Per-category counts over all records, in category order
#[must_use]
pub fn category_counts(entries: &[DebtSustainabilityEntry]) -> Vec<CategoryCount> {
    count_by(entries, &SustainabilityCategory::ALL, |e| e.sustainability)
        .into_iter()
        .map(|(category, count)| CategoryCount {
            title: category_title(category),
            tone: category_tone(category),
            count,
        })
        .collect()
}

/// One table row as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtRow {
    /// Country name
    pub country: String,
    /// Region
    pub region: String,
    /// Category label
    pub sustainability: &'static str,
    /// Category tone
    pub tone: &'static str,
    /// Debt/GDP
    pub debt_ratio: String,
    /// Debt service/revenue
    pub debt_service_ratio: String,
    /// GDP growth
    pub growth_rate: String,
    /// Primary balance
    pub primary_balance: String,
    /// Primary balance tone
    pub balance_tone: &'static str,
    /// Fiscal space score
    pub fiscal_space: String,
}

impl From<&DebtSustainabilityEntry> for DebtRow {
    fn from(entry: &DebtSustainabilityEntry) -> Self {
        Self {
            country: entry.country.clone(),
            region: entry.region.clone(),
            sustainability: entry.sustainability.label(),
            tone: category_tone(entry.sustainability),
            debt_ratio: format_percent(entry.debt_ratio, 1),
            debt_service_ratio: format_percent(entry.debt_service_ratio, 1),
            growth_rate: format_percent(entry.growth_rate, 1),
            primary_balance: format_percent(entry.primary_balance, 1),
            balance_tone: balance_tone(entry.primary_balance),
            fiscal_space: format_fixed(entry.fiscal_space, 1),
        }
    }
}

/// One scatter series per category over all records
///
/// Empty categories are kept so every category has a legend entry.
fn scatter<F>(entries: &[DebtSustainabilityEntry], point: F) -> Vec<ScatterSeries>
where
    F: Fn(&DebtSustainabilityEntry) -> ScatterPoint,
{
    group_by(entries, &SustainabilityCategory::ALL, |e| e.sustainability)
        .into_iter()
        .map(|(category, members)| ScatterSeries {
            name: category.label().to_string(),
            points: members.into_iter().map(&point).collect(),
        })
        .collect()
}

/// Legend entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendItem {
    /// Category title
    pub title: &'static str,
    /// Category tone
    pub tone: &'static str,
    /// Threshold text
    pub rule: &'static str,
}

/// Derived debt sustainability page
#[derive(Debug, Clone, PartialEq)]
pub struct DebtView {
    /// Per-category counts, ignoring the filter
    pub counts: Vec<CategoryCount>,
    /// Filtered table
    pub rows: Vec<DebtRow>,
    /// Debt ratio (x) against growth (y)
    pub debt_vs_growth: Vec<ScatterSeries>,
    /// Debt service (x) against fiscal space (y)
    pub service_vs_space: Vec<ScatterSeries>,
}

impl DebtView {
    /// Derive the page for a category filter
    #[must_use]
    pub fn new(entries: &[DebtSustainabilityEntry], status: &Filter<SustainabilityCategory>) -> Self {
        let rows = filter_records(
            entries,
            "",
            status,
            |e| e.country.as_str(),
            |e| &e.sustainability,
        )
        .into_iter()
        .map(DebtRow::from)
        .collect();

        Self {
            counts: category_counts(entries),
            rows,
            debt_vs_growth: scatter(entries, |e| ScatterPoint {
                label: e.country.clone(),
                x: e.debt_ratio,
                y: e.growth_rate,
                x_display: format_percent(e.debt_ratio, 1),
                y_display: format_percent(e.growth_rate, 1),
            }),
            service_vs_space: scatter(entries, |e| ScatterPoint {
                label: e.country.clone(),
                x: e.debt_service_ratio,
                y: e.fiscal_space,
                x_display: format_percent(e.debt_service_ratio, 1),
                y_display: format_fixed(e.fiscal_space, 1),
            }),
        }
    }
}

/// Debt sustainability page
#[derive(Debug, Template)]
#[template(path = "debt_sustainability.html")]
pub struct DebtTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Category filter buttons
    pub status_links: Vec<ChoiceLink>,
    /// Threshold legend
    pub legend: Vec<LegendItem>,
    /// Indicator glossary
    pub indicators: &'static [(&'static str, &'static str)],
    /// Loading indicator
    pub loading: Loading,
    /// Failure message
    pub error: Option<String>,
    /// Derived view, when data is available
    pub view: Option<DebtView>,
}

impl DebtTemplate {
    /// Build the page from its load state and the category filter
    #[must_use]
    pub fn from_state(
        nav: NavShell,
        state: &PageState<(), Vec<DebtSustainabilityEntry>>,
        query: &DebtQuery,
    ) -> Self {
        let status = query.status();

        let all = ChoiceLink {
            label: crate::filters::ALL.to_string(),
            href: query_href("/debt-sustainability", &[("status", crate::filters::ALL)]),
            selected: status == Filter::All,
        };
        let status_links = std::iter::once(all)
            .chain(SustainabilityCategory::ALL.into_iter().map(|category| ChoiceLink {
                label: category.label().to_string(),
                href: query_href("/debt-sustainability", &[("status", category.as_str())]),
                selected: status == Filter::Only(category),
            }))
            .collect();

        let legend = THRESHOLD_LEGEND
            .into_iter()
            .map(|(category, rule)| LegendItem {
                title: category_title(category),
                tone: category_tone(category),
                rule,
            })
            .collect();

        Self {
            nav,
            status_links,
            legend,
            indicators: &KEY_INDICATORS,
            loading: Loading::when(state.is_loading()),
            error: state.error().map(ToString::to_string),
            view: state.data().map(|data| DebtView::new(data, &status)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn entry(country: &str, category: SustainabilityCategory, balance: f64) -> DebtSustainabilityEntry {
        DebtSustainabilityEntry {
            country: country.to_string(),
            region: "West Africa".to_string(),
            debt_ratio: 55.24,
            debt_service_ratio: 18.0,
            growth_rate: 3.4,
            primary_balance: balance,
            sustainability: category,
            fiscal_space: 2.26,
        }
    }

    fn entries() -> Vec<DebtSustainabilityEntry> {
        vec![
            entry("Ghana", SustainabilityCategory::Unsustainable, -2.5),
            entry("Senegal", SustainabilityCategory::ModeratelySustainable, 0.0),
            entry("Nigeria", SustainabilityCategory::Sustainable, 1.1),
            entry("Togo", SustainabilityCategory::ModeratelySustainable, -0.4),
        ]
    }

    #[test]
    fn test_counts_include_empty_categories() {
        let counts = category_counts(&entries());
        let values: Vec<(&str, usize)> = counts.iter().map(|c| (c.title, c.count)).collect();

        assert_eq!(
            values,
            vec![
                ("Sustainable", 1),
                ("Moderately Sustainable", 2),
                ("At Risk", 0),
                ("Unsustainable", 1),
            ]
        );
    }

    #[test]
    fn test_filter_by_category() {
        let view = DebtView::new(
            &entries(),
            &Filter::Only(SustainabilityCategory::ModeratelySustainable),
        );

        let names: Vec<&str> = view.rows.iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Senegal", "Togo"]);
        assert_eq!(view.counts.iter().map(|c| c.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_row_formatting() {
        let view = DebtView::new(&entries(), &Filter::All);
        let row = &view.rows[0];

        assert_eq!(row.sustainability, "UNSUSTAINABLE");
        assert_eq!(row.debt_ratio, "55.2%");
        assert_eq!(row.primary_balance, "-2.5%");
        assert_eq!(row.balance_tone, "negative");
        assert_eq!(row.fiscal_space, "2.3");
        assert_eq!(view.rows[1].balance_tone, "positive");
        assert_eq!(view.rows[1].sustainability, "MODERATELY SUSTAINABLE");
    }

    #[test]
    fn test_scatter_groups_ignore_filter() {
        let view = DebtView::new(&entries(), &Filter::Only(SustainabilityCategory::Sustainable));

        assert_eq!(view.debt_vs_growth.len(), 4);
        assert_eq!(view.debt_vs_growth[1].name, "MODERATELY SUSTAINABLE");
        assert_eq!(view.debt_vs_growth[1].points.len(), 2);
        assert!(view.service_vs_space[2].points.is_empty());
        assert_eq!(view.service_vs_space[3].points[0].y_display, "2.3");
    }

    #[test]
    fn test_status_links() {
        let state: PageState<(), Vec<DebtSustainabilityEntry>> = PageState::new(());
        let query = DebtQuery {
            status: Some("at_risk".to_string()),
        };

        let nav = NavShell::for_path("/debt-sustainability", false);
        let page = DebtTemplate::from_state(nav, &state, &query);
        assert_eq!(page.status_links.len(), 5);
        assert_eq!(page.status_links[3].label, "AT RISK");
        assert_eq!(page.status_links[3].href, "/debt-sustainability?status=AT_RISK");
        assert!(page.status_links[3].selected);
        assert!(!page.status_links[0].selected);
        assert_eq!(page.legend[3].rule, "Debt ≥ 80%");
        assert!(page.view.is_none());
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_total(picks in prop::collection::vec(0usize..4, 0..30)) {
            let data: Vec<DebtSustainabilityEntry> = picks
                .iter()
                .enumerate()
                .map(|(i, p)| entry(&i.to_string(), SustainabilityCategory::ALL[*p], 0.0))
                .collect();

            let total: usize = category_counts(&data).iter().map(|c| c.count).sum();
            prop_assert_eq!(total, data.len());
        }
    }
}
