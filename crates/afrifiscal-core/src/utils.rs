//! Formatting helpers shared by the page view models

/// Format a number with a fixed number of decimals
#[must_use]
pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Format a percentage with a fixed number of decimals, e.g. `"3.5%"`
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

/// Format a raw server value as a percentage without rounding it
///
/// Trailing zeros are dropped the way a JSON number prints: `4.0` becomes
/// `"4%"`, `3.25` stays `"3.25%"`.
#[must_use]
pub fn format_raw_percent(value: f64) -> String {
    format!("{}%", format_raw(value))
}

/// Format a raw server value without rounding it
#[must_use]
pub fn format_raw(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Turn a server identifier such as `DEBT_MANAGEMENT` or `GDP_Growth`
/// into display text by replacing underscores with spaces
#[must_use]
pub fn humanize_identifier(identifier: &str) -> String {
    identifier.replace('_', " ")
}

/// Case-insensitive substring match; an empty needle matches everything
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Pluralize a noun for a count, e.g. `1 Warning`, `2 Warnings`
#[must_use]
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}
