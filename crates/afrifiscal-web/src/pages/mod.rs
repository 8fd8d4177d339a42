//! Page view models and their templates
//!
//! Each page derives its presentation structures from a [`PageState`]
//! holding the fetched data. Derivations never mutate the fetched object,
//! and every display string is formatted here so templates only lay out
//! values.
//!
//! [`PageState`]: crate::view_state::PageState

pub mod clusters;
pub mod compare;
pub mod country;
pub mod dashboard;
pub mod debt_sustainability;
pub mod fiscal_space;
pub mod not_found;
pub mod recommendations;
pub mod warnings;

use afrifiscal_core::{Error, Result};
use askama::Template;
use tracing::error;

/// One labelled value of a bar, pie or radar series
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    /// Category or axis label
    pub label: String,
    /// Plotted value
    pub value: f64,
    /// Pre-formatted value for display
    pub display: String,
}

impl SeriesPoint {
    /// Point shown with one decimal
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self::with_display(label, value, afrifiscal_core::utils::format_fixed(value, 1))
    }

    /// Point with an explicit display string
    pub fn with_display(label: impl Into<String>, value: f64, display: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value,
            display: display.into(),
        }
    }
}

/// Named series, e.g. one country on a radar chart
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Series name
    pub name: String,
    /// Points in axis order
    pub points: Vec<SeriesPoint>,
}

/// One point of a scatter series
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    /// Point label (a country)
    pub label: String,
    /// Horizontal value
    pub x: f64,
    /// Vertical value
    pub y: f64,
    /// Pre-formatted horizontal value
    pub x_display: String,
    /// Pre-formatted vertical value
    pub y_display: String,
}

/// Scatter series for one group of points
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    /// Group name shown in the legend
    pub name: String,
    /// Points in the group
    pub points: Vec<ScatterPoint>,
}

/// Selectable option rendered as a link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceLink {
    /// Option text
    pub label: String,
    /// Link that selects the option
    pub href: String,
    /// Whether this option is the current one
    pub selected: bool,
}

/// Build `path?key=value&...`, percent-encoding values and skipping empty ones
#[must_use]
pub fn query_href(path: &str, params: &[(&str, &str)]) -> String {
    let query: Vec<String> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect();

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query.join("&"))
    }
}

/// Split a comma separated query value into trimmed, non-empty items
#[must_use]
pub fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Display tone for a server risk label
#[must_use]
pub fn risk_tone(label: &str) -> &'static str {
    match label {
        "High" => "high",
        "Moderate" => "moderate",
        "Low" => "low",
        _ => "neutral",
    }
}

/// Render a page template
///
/// # Errors
///
/// Returns [`Error::Render`] if the template fails to render.
pub fn render_page<T: Template>(template: &T) -> Result<String> {
    template.render().map_err(|e| {
        error!(error = %e, "Failed to render page template");
        Error::Render {
            message: e.to_string(),
        }
    })
}
