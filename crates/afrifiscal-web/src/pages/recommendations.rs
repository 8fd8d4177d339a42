//! Policy recommendations for a selected country

use super::{ChoiceLink, query_href};
use crate::{components::Loading, navigation::NavShell, view_state::PageState};
use afrifiscal_core::{
    PolicyRecommendations,
    types::{PolicyRecommendation, Priority},
    utils::{contains_ignore_case, humanize_identifier},
};
use askama::Template;
use serde::Deserialize;

/// Countries offered for recommendations
pub const RECOMMENDATION_COUNTRIES: [&str; 19] = [
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
];

/// Query parameters of `/recommendations`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationQuery {
    /// Selected country; nothing is fetched without one
    pub country: Option<String>,
    /// Search term for the country list
    pub q: Option<String>,
}

impl RecommendationQuery {
    /// Selected country, if any
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.country.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    /// Search term, empty when absent
    #[must_use]
    pub fn search(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Display tone for a priority
#[must_use]
pub const fn priority_tone(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "high",
        Priority::Medium => "medium",
        Priority::Low => "low",
    }
}

/// Display tone for a recommendation category
#[must_use]
pub fn category_tone(category: &str) -> &'static str {
    match category {
        "DEBT_MANAGEMENT" => "debt",
        "ECONOMIC_GROWTH" => "growth",
        "MONETARY_POLICY" => "monetary",
        "HUMAN_DEVELOPMENT" => "human",
        _ => "neutral",
    }
}

/// `N policy recommendation(s) identified`
#[must_use]
pub fn summary_line(count: usize) -> String {
    let noun = if count == 1 {
        "recommendation"
    } else {
        "recommendations"
    };
    format!("{count} policy {noun} identified")
}

/// One recommendation as displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationCard {
    /// `HIGH PRIORITY`, ...
    pub priority_label: String,
    /// Priority tone
    pub priority_tone: &'static str,
    /// Category with underscores replaced by spaces
    pub category: String,
    /// Category tone
    pub category_tone: &'static str,
    /// Recommendation text
    pub recommendation: String,
    /// Numbered actions, 1-based
    pub actions: Vec<(usize, String)>,
}

impl From<&PolicyRecommendation> for RecommendationCard {
    fn from(rec: &PolicyRecommendation) -> Self {
        Self {
            priority_label: format!("{} PRIORITY", rec.priority),
            priority_tone: priority_tone(rec.priority),
            category: humanize_identifier(&rec.category),
            category_tone: category_tone(&rec.category),
            recommendation: rec.recommendation.clone(),
            actions: rec
                .actions
                .iter()
                .enumerate()
                .map(|(i, action)| (i + 1, action.clone()))
                .collect(),
        }
    }
}

/// Recommendations for the selected country
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationList {
    /// Country name
    pub country: String,
    /// Summary line
    pub summary: String,
    /// Cards in server order
    pub cards: Vec<RecommendationCard>,
}

/// What the body of the page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecommendationsBody {
    /// No country selected yet
    Prompt,
    /// Selected country, but no recommendations were received
    Unavailable,
    /// Selected country has no recommendations; holds the message
    AllClear(String),
    /// Recommendations for the selected country
    List(RecommendationList),
}

impl RecommendationsBody {
    /// Derive the body for a selection and its recommendations
    ///
    /// The all-clear message needs a received, empty list; a selection
    /// without data shows nothing.
    #[must_use]
    pub fn new(selected: Option<&str>, recommendations: Option<&PolicyRecommendations>) -> Self {
        let Some(country) = selected else {
            return Self::Prompt;
        };
        let Some(recommendations) = recommendations else {
            return Self::Unavailable;
        };

        let recs: &[PolicyRecommendation] = &recommendations.recommendations;
        if recs.is_empty() {
            return Self::AllClear(format!(
                "No critical policy recommendations for {country} at this time. \
                 The country is performing well across key fiscal metrics."
            ));
        }

        Self::List(RecommendationList {
            country: country.to_string(),
            summary: summary_line(recs.len()),
            cards: recs.iter().map(RecommendationCard::from).collect(),
        })
    }

    /// Whether no country is selected
    #[must_use]
    pub const fn is_prompt(&self) -> bool {
        matches!(self, Self::Prompt)
    }

    /// Message of the empty state
    #[must_use]
    pub fn all_clear(&self) -> Option<&str> {
        match self {
            Self::AllClear(message) => Some(message),
            _ => None,
        }
    }

    /// Recommendations to list
    #[must_use]
    pub const fn list(&self) -> Option<&RecommendationList> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Policy recommendations page
#[derive(Debug, Template)]
#[template(path = "recommendations.html")]
pub struct RecommendationsTemplate {
    /// Layout shell
    pub nav: NavShell,
    /// Current search term
    pub search: String,
    /// Country list filtered by the search term
    pub choices: Vec<ChoiceLink>,
    /// Loading indicator
    pub loading: Loading,
    /// Failure message
    pub error: Option<String>,
    /// Page body
    pub body: RecommendationsBody,
}

/// Countries matching the search term, each linking to its recommendations
#[must_use]
pub fn country_choices(search: &str, selected: Option<&str>) -> Vec<ChoiceLink> {
    RECOMMENDATION_COUNTRIES
        .iter()
        .filter(|country| contains_ignore_case(country, search))
        .map(|country| ChoiceLink {
            label: (*country).to_string(),
            href: query_href("/recommendations", &[("country", *country), ("q", search)]),
            selected: selected == Some(*country),
        })
        .collect()
}

impl RecommendationsTemplate {
    /// Build the page; `state` is absent when no country is selected
    #[must_use]
    pub fn from_state(
        nav: NavShell,
        search: &str,
        state: Option<&PageState<String, PolicyRecommendations>>,
    ) -> Self {
        let selected = state.map(|s| s.selection().as_str());
        let received = state
            .filter(|s| s.error().is_none())
            .and_then(PageState::data);
        Self {
            nav,
            search: search.to_string(),
            choices: country_choices(search, selected),
            loading: Loading::when(state.is_some_and(PageState::is_loading)),
            error: state.and_then(PageState::error).map(ToString::to_string),
            body: RecommendationsBody::new(selected, received),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use afrifiscal_core::Error;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn recommendations() -> PolicyRecommendations {
        serde_json::from_value(json!({
            "country": "Ghana",
            "recommendations": [
                {
                    "category": "DEBT_MANAGEMENT",
                    "priority": "HIGH",
                    "recommendation": "Implement debt restructuring",
                    "actions": ["Negotiate with creditors", "Extend maturities"]
                },
                {
                    "category": "SOCIAL_PROTECTION",
                    "priority": "LOW",
                    "recommendation": "Expand cash transfers",
                    "actions": []
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(summary_line(1), "1 policy recommendation identified");
        assert_eq!(summary_line(3), "3 policy recommendations identified");
    }

    #[test]
    fn test_prompt_without_selection() {
        assert!(RecommendationsBody::new(None, None).is_prompt());
    }

    #[test]
    fn test_failed_fetch_is_not_all_clear() {
        let mut state: PageState<String, PolicyRecommendations> = PageState::new(String::new());
        state.select("Ghana".to_string());
        state.fail(
            &"Ghana".to_string(),
            &Error::Status {
                endpoint: "/policy-recommendations/Ghana".to_string(),
                status: 500,
            },
        );

        let page = RecommendationsTemplate::from_state(
            NavShell::for_path("/recommendations", false),
            "",
            Some(&state),
        );

        assert!(page.error.is_some());
        assert_eq!(page.body, RecommendationsBody::Unavailable);
        assert!(page.body.all_clear().is_none());
        assert!(!page.render().unwrap().contains("All Clear!"));
    }

    #[test]
    fn test_all_clear_for_empty_list() {
        let empty = PolicyRecommendations {
            country: "Botswana".to_string(),
            recommendations: Vec::new(),
        };

        assert_eq!(
            RecommendationsBody::new(Some("Botswana"), Some(&empty)),
            RecommendationsBody::AllClear(
                "No critical policy recommendations for Botswana at this time. \
                 The country is performing well across key fiscal metrics."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_list_cards() {
        let data = recommendations();
        let body = RecommendationsBody::new(Some("Ghana"), Some(&data));

        let list = body.list().unwrap();
        let (summary, cards) = (&list.summary, &list.cards);
        assert_eq!(summary, "2 policy recommendations identified");
        assert_eq!(cards[0].priority_label, "HIGH PRIORITY");
        assert_eq!(cards[0].category, "DEBT MANAGEMENT");
        assert_eq!(cards[0].category_tone, "debt");
        assert_eq!(
            cards[0].actions,
            vec![
                (1, "Negotiate with creditors".to_string()),
                (2, "Extend maturities".to_string())
            ]
        );
        assert_eq!(cards[1].category_tone, "neutral");
    }

    #[test]
    fn test_country_choices() {
        let choices = country_choices("an", Some("Ghana"));
        let names: Vec<&str> = choices.iter().map(|c| c.label.as_str()).collect();

        assert_eq!(names, vec!["Ghana", "Tanzania", "Uganda", "Rwanda", "Namibia"]);
        assert!(choices.iter().any(|c| c.selected && c.label == "Ghana"));
        assert_eq!(country_choices("", None).len(), 19);
    }
}
