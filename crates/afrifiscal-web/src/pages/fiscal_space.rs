//! Fiscal space: each government's room for policy action, ranked

use super::{ChoiceLink, SeriesPoint, query_href};
use crate::{
    components::{Loading, MetricCard},
    filters::{Direction, Filter, distinct, filter_records, sort_by_key},
    navigation::NavShell,
    view_state::PageState,
};
use afrifiscal_core::{
    Error, FiscalSpaceEntry,
    utils::{format_fixed, format_percent},
};
use askama::Template;
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Number of countries in the top performers chart
pub const TOP_PERFORMERS: usize = 10;

/// Column the ranking is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Fiscal space score, highest first
    #[default]
    Score,
    /// Revenue/GDP, highest first
    Revenue,
    /// Debt/GDP, lowest first
    Debt,
}

impl SortKey {
    /// All sort keys in display order
    pub const ALL: [Self; 3] = [Self::Score, Self::Revenue, Self::Debt];

    /// Query value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Score => "score",
            Self::Revenue => "revenue",
            Self::Debt => "debt",
        }
    }

    /// Button label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Score => "Fiscal Space",
            Self::Revenue => "Revenue",
            Self::Debt => "Debt",
        }
    }

    /// Sort direction; less debt ranks higher
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::Score | Self::Revenue => Direction::Descending,
            Self::Debt => Direction::Ascending,
        }
    }

    /// Value the ranking is sorted on
    #[must_use]
    pub const fn key(self, entry: &FiscalSpaceEntry) -> f64 {
        match self {
            Self::Score => entry.fiscal_space_score,
            Self::Revenue => entry.revenue_gdp,
            Self::Debt => entry.government_debt_gdp,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::validation("sort", format!("unknown sort key '{s}'")))
    }
}

/// Query parameters of `/fiscal-space`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FiscalSpaceQuery {
    /// Sort key
    pub sort: Option<String>,
    /// Region filter
    pub region: Option<String>,
}

impl FiscalSpaceQuery {
    /// Sort key, score when absent or unknown
    #[must_use]
    pub fn sort_key(&self) -> SortKey {
        self.sort
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Region filter, `All` when absent
    #[must_use]
    pub fn region(&self) -> Filter<String> {
        Filter::parse(self.region.as_deref())
    }
}

/// Display tone of a fiscal space score
#[must_use]
pub const fn score_tone(score: f64) -> &'static str {
    if score > 10.0 {
        "strong"
    } else if score > 0.0 {
        "moderate"
    } else {
        "constrained"
    }
}

/// Mean fiscal space score, absent for an empty list
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_score(entries: &[&FiscalSpaceEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: f64 = entries.iter().map(|e| e.fiscal_space_score).sum();
    Some(total / entries.len() as f64)
}

/// Region options: `ALL` followed by the regions in first-seen order
#[must_use]
pub fn region_options(entries: &[FiscalSpaceEntry]) -> Vec<String> {
    std::iter::once(crate::filters::ALL)
        .chain(distinct(entries, |e| e.region.as_str()))
        .map(ToString::to_string)
        .collect()
}

/// Filter by region, then rank by the sort key
#[must_use]
pub fn rank<'a>(
    entries: &'a [FiscalSpaceEntry],
    region: &Filter<String>,
    sort: SortKey,
) -> Vec<&'a FiscalSpaceEntry> {
    let mut ranked = filter_records(entries, "", region, |e| e.country.as_str(), |e| &e.region);
    sort_by_key(&mut ranked, sort.direction(), |e| sort.key(e));
    ranked
}

/// One ranking row as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankingRow {
    /// `#1`, `#2`, ...
    pub rank: String,
    /// Country name
    pub country: String,
    /// Region
    pub region: String,
    /// Score to two decimals
    pub score: String,
    /// Score tone
    pub score_tone: &'static str,
    /// Revenue/GDP
    pub revenue: String,
    /// Expenditure/GDP
    pub expenditure: String,
    /// Debt/GDP
    pub debt: String,
}

impl RankingRow {
    fn new(position: usize, entry: &FiscalSpaceEntry) -> Self {
        Self {
            rank: format!("#{position}"),
            country: entry.country.clone(),
            region: entry.region.clone(),
            score: format_fixed(entry.fiscal_space_score, 2),
            score_tone: score_tone(entry.fiscal_space_score),
            revenue: format_percent(entry.revenue_gdp, 1),
            expenditure: format_percent(entry.total_expenditure_gdp, 1),
            debt: format_percent(entry.government_debt_gdp, 1),
        }
    }
}

/// Bar of the top performers chart
#[derive(Debug, Clone, PartialEq)]
pub struct PerformerBar {
    /// Country and score
    pub point: SeriesPoint,
    /// Score tone
    pub tone: &'static str,
}

/// Derived fiscal space page
#[derive(Debug, Clone, PartialEq)]
pub struct FiscalSpaceView {
    /// Average score and positive/constrained counts over the filtered rows
    pub cards: Vec<MetricCard>,
    /// Full ranking
    pub rows: Vec<RankingRow>,
    /// First rows of the ranking
    pub top_performers: Vec<PerformerBar>,
}

impl FiscalSpaceView {
    /// Derive the page for a region filter and sort key
    #[must_use]
    pub fn new(entries: &[FiscalSpaceEntry], region: &Filter<String>, sort: SortKey) -> Self {
        let ranked = rank(entries, region, sort);

        let average =
            average_score(&ranked).map_or_else(|| "N/A".to_string(), |avg| format_fixed(avg, 1));
        let positive = ranked.iter().filter(|e| e.fiscal_space_score > 0.0).count();
        let cards = vec![
            MetricCard::new("Average Fiscal Space", average),
            MetricCard::new("Positive Space Countries", positive.to_string()),
            MetricCard::new("Constrained Countries", (ranked.len() - positive).to_string()),
        ];

        let top_performers = ranked
            .iter()
            .take(TOP_PERFORMERS)
            .map(|e| PerformerBar {
                point: SeriesPoint::with_display(
                    e.country.clone(),
                    e.fiscal_space_score,
                    format_fixed(e.fiscal_space_score, 2),
                ),
                tone: score_tone(e.fiscal_space_score),
            })
            .collect();

        Self {
            cards,
            rows: ranked
                .iter()
                .enumerate()
                .map(|(i, e)| RankingRow::new(i + 1, e))
                .collect(),
            top_performers,
        }
    }
}

/// Fiscal space page
#[derive(Debug, Template)]
#[template(path = "fiscal_space.html")]
pub struct FiscalSpaceTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Sort buttons
    pub sort_links: Vec<ChoiceLink>,
    /// Region options
    pub region_links: Vec<ChoiceLink>,
    /// Loading indicator
    pub loading: Loading,
    /// Failure message
    pub error: Option<String>,
    /// Derived view, when data is available
    pub view: Option<FiscalSpaceView>,
}

impl FiscalSpaceTemplate {
    /// Build the page from its load state and the query
    #[must_use]
    pub fn from_state(
        nav: NavShell,
        state: &PageState<(), Vec<FiscalSpaceEntry>>,
        query: &FiscalSpaceQuery,
    ) -> Self {
        let sort = query.sort_key();
        let region = query.region();
        let region_value = region.query_value();
        let entries = state.data().map_or(&[][..], Vec::as_slice);

        let sort_links = SortKey::ALL
            .into_iter()
            .map(|key| ChoiceLink {
                label: key.label().to_string(),
                href: query_href(
                    "/fiscal-space",
                    &[("sort", key.as_str()), ("region", region_value.as_str())],
                ),
                selected: key == sort,
            })
            .collect();

        let region_links = region_options(entries)
            .into_iter()
            .map(|option| ChoiceLink {
                href: query_href("/fiscal-space", &[("sort", sort.as_str()), ("region", option.as_str())]),
                selected: option == region_value,
                label: option,
            })
            .collect();

        Self {
            nav,
            sort_links,
            region_links,
            loading: Loading::when(state.is_loading()),
            error: state.error().map(ToString::to_string),
            view: state.data().map(|data| FiscalSpaceView::new(data, &region, sort)),
        }
    }
}
