//! Metric card: a headline value with an optional subtitle and trend

use afrifiscal_core::utils::format_raw_percent;

/// Direction and size of a change shown on a card
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trend {
    /// Signed change
    pub value: f64,
    /// Whether the change is good news for this metric
    pub is_positive: bool,
}

impl Trend {
    /// Arrow glyph for the trend
    #[must_use]
    pub const fn arrow(&self) -> &'static str {
        if self.is_positive { "↑" } else { "↓" }
    }

    /// Absolute change as a percentage, e.g. `"1.2%"`
    #[must_use]
    pub fn magnitude(&self) -> String {
        format_raw_percent(self.value.abs())
    }

    /// CSS tone class
    #[must_use]
    pub const fn tone(&self) -> &'static str {
        if self.is_positive { "positive" } else { "negative" }
    }
}

/// Headline metric
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    /// Card title
    pub title: String,
    /// Pre-formatted value
    pub value: String,
    /// Optional line under the value
    pub subtitle: Option<String>,
    /// Optional trend
    pub trend: Option<Trend>,
}

impl MetricCard {
    /// Card with a title and a value
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: value.into(),
            subtitle: None,
            trend: None,
        }
    }

    /// Add a subtitle
    #[must_use]
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Add a trend, if there is one
    #[must_use]
    pub fn with_trend(mut self, trend: Option<Trend>) -> Self {
        self.trend = trend;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trend_shows_absolute_value() {
        let trend = Trend {
            value: -1.5,
            is_positive: true,
        };

        assert_eq!(trend.arrow(), "↑");
        assert_eq!(trend.magnitude(), "1.5%");
        assert_eq!(trend.tone(), "positive");
    }

    #[test]
    fn test_builder() {
        let card = MetricCard::new("Total Countries", "54").with_subtitle("2000-2023");

        assert_eq!(card.subtitle.as_deref(), Some("2000-2023"));
        assert!(card.trend.is_none());
    }
}
