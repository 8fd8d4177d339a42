//! Response schemas for the analytics API
//!
//! Every endpoint response is parsed into one of these types at the client
//! boundary. Objects keyed by name (regions, countries, clusters) keep the
//! order the server sent them in.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Country name as used by the analytics API
pub type CountryName = String;

/// Cluster identifier (the JSON object key, usually `"0"`, `"1"`, ...)
pub type ClusterId = String;

/// Continent-wide summary snapshot (`GET /overview`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Overview {
    /// Number of countries covered by the dataset
    pub total_countries: u32,
    /// Human readable period, e.g. `"2000-2023"`
    pub time_period: String,
    /// Most recent year with data
    pub latest_year: i32,
    /// Continental averages
    pub key_metrics: KeyMetrics,
    /// Country count per region
    pub regional_breakdown: IndexMap<String, u32>,
    /// Country count per income group
    pub income_groups: IndexMap<String, u32>,
}

/// Continental averages reported in the overview
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct KeyMetrics {
    /// Average GDP growth (%)
    pub avg_gdp_growth: f64,
    /// Average government debt (% of GDP)
    pub avg_debt_gdp: f64,
    /// Average inflation (%)
    pub avg_inflation: f64,
    /// Average Human Development Index, in [0, 1]
    pub avg_hdi: f64,
}

/// One country's current, historical and predicted metrics (`GET /country/{name}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryAnalysis {
    /// Identification of the country
    pub basic_info: BasicInfo,
    /// Latest values
    pub current_metrics: CurrentMetrics,
    /// Year-over-year deltas keyed by metric name (`GDP_Growth`, ...)
    #[serde(default)]
    pub trends: IndexMap<String, f64>,
    /// Server-side risk labels
    pub risk_assessment: RiskAssessment,
    /// Multi-year forecasts keyed by metric name
    #[serde(default)]
    pub predictions: IndexMap<String, Vec<f64>>,
    /// Historical series, one point per year
    #[serde(default)]
    pub historical_data: Vec<HistoricalPoint>,
}

/// Identification block of a country analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BasicInfo {
    /// Country name
    pub country: CountryName,
    /// Region, e.g. `"West Africa"`
    pub region: String,
    /// World Bank income group
    pub income_group: String,
    /// Most recent year with data
    pub latest_year: i32,
}

/// Latest metric values for a country
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CurrentMetrics {
    /// GDP growth (%)
    pub gdp_growth: f64,
    /// Government debt (% of GDP)
    pub government_debt: f64,
    /// Inflation (%)
    pub inflation: f64,
    /// Budget balance (% of GDP)
    pub budget_balance: f64,
    /// Revenue (% of GDP)
    pub revenue_gdp: f64,
    /// Human Development Index
    pub hdi: f64,
    /// Fiscal space score
    pub fiscal_space: f64,
    /// Debt sustainability score (0-100)
    pub debt_sustainability: f64,
    /// Economic resilience score
    pub economic_resilience: f64,
}

/// Server-side risk labels (`"High"`, `"Moderate"`, `"Low"`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Debt risk label
    pub debt_risk: String,
    /// Inflation risk label
    pub inflation_risk: String,
    /// Fiscal risk label
    pub fiscal_risk: String,
}

/// One year of historical data
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HistoricalPoint {
    /// Calendar year
    #[serde(rename = "Year")]
    pub year: i32,
    /// GDP growth (%)
    #[serde(rename = "GDP_Growth")]
    pub gdp_growth: f64,
    /// Government debt (% of GDP)
    #[serde(rename = "Government_Debt_GDP")]
    pub government_debt_gdp: f64,
    /// Inflation (%)
    #[serde(rename = "Inflation")]
    pub inflation: f64,
}

/// Multi-country comparison (`GET /compare`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comparison {
    /// Year the comparison refers to
    #[serde(default)]
    pub comparison_year: Option<i32>,
    /// Metrics per country, absent when the server had nothing to compare
    #[serde(default)]
    pub countries: Option<IndexMap<CountryName, CountryMetrics>>,
}

/// Metrics for one country in a comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountryMetrics {
    /// GDP growth (%)
    pub gdp_growth: f64,
    /// Government debt (% of GDP)
    pub government_debt: f64,
    /// Inflation (%)
    pub inflation: f64,
    /// Budget balance (% of GDP)
    pub budget_balance: f64,
    /// Human Development Index
    pub hdi: f64,
    /// Debt sustainability score (0-100)
    pub debt_sustainability: f64,
    /// Revenue (% of GDP)
    #[serde(default)]
    pub revenue_gdp: f64,
    /// Region
    #[serde(default)]
    pub region: String,
    /// Income group
    #[serde(default)]
    pub income_group: String,
}

/// Cluster assignments keyed by cluster id (`GET /cluster-analysis`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct ClusterAnalysis(pub IndexMap<ClusterId, Cluster>);

impl ClusterAnalysis {
    /// Iterate over clusters in server order
    pub fn iter(&self) -> impl Iterator<Item = (&ClusterId, &Cluster)> {
        self.0.iter()
    }

    /// Look up a cluster by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Cluster> {
        self.0.get(id)
    }

    /// Number of clusters
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the analysis has no clusters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One cluster of countries with similar characteristics
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cluster {
    /// Number of member countries
    pub size: u32,
    /// Member countries
    pub countries: Vec<CountryName>,
    /// Averages over the members
    pub characteristics: ClusterCharacteristics,
    /// Descriptive label assigned by the server
    #[serde(default)]
    pub label: String,
}

/// Averages over the members of a cluster
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClusterCharacteristics {
    /// Average GDP growth (%)
    pub avg_gdp_growth: f64,
    /// Average government debt (% of GDP)
    pub avg_debt: f64,
    /// Average inflation (%)
    pub avg_inflation: f64,
    /// Average Human Development Index
    pub avg_hdi: f64,
}

/// All active warnings (`GET /early-warning`)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EarlyWarnings {
    /// One entry per country with at least one warning
    pub warnings: Vec<CountryWarnings>,
}

/// Active warnings for one country
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryWarnings {
    /// Country name
    pub country: CountryName,
    /// Individual alerts
    pub warnings: Vec<Warning>,
}

/// A single risk alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Warning {
    /// Alert type, e.g. `DEBT_RISK`
    #[serde(rename = "type")]
    pub kind: String,
    /// Severity
    pub level: WarningLevel,
    /// Human readable explanation
    pub message: String,
}

/// Severity of a warning
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningLevel {
    /// High severity
    High,
    /// Medium severity
    Medium,
    /// Low severity
    Low,
}

impl WarningLevel {
    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WarningLevel {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            other => Err(crate::Error::validation(
                "level",
                format!("unknown warning level '{other}'"),
            )),
        }
    }
}

/// Policy recommendations for one country (`GET /policy-recommendations/{name}`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyRecommendations {
    /// Country the recommendations apply to
    pub country: CountryName,
    /// Suggested actions, most important first
    #[serde(default)]
    pub recommendations: Vec<PolicyRecommendation>,
}

/// One suggested policy action
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyRecommendation {
    /// Category, e.g. `DEBT_MANAGEMENT`
    pub category: String,
    /// Priority
    pub priority: Priority,
    /// Recommendation text
    pub recommendation: String,
    /// Concrete actions
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Priority of a policy recommendation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    /// High priority
    High,
    /// Medium priority
    Medium,
    /// Low priority
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        })
    }
}

/// One country's fiscal-flexibility score (`GET /fiscal-space-analysis`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FiscalSpaceEntry {
    /// Country name
    #[serde(rename = "Country")]
    pub country: CountryName,
    /// Region
    #[serde(rename = "Region")]
    pub region: String,
    /// Composite fiscal space score
    #[serde(rename = "Fiscal_Space_Score")]
    pub fiscal_space_score: f64,
    /// Revenue (% of GDP)
    #[serde(rename = "Revenue_GDP")]
    pub revenue_gdp: f64,
    /// Total expenditure (% of GDP)
    #[serde(rename = "Total_Expenditure_GDP")]
    pub total_expenditure_gdp: f64,
    /// Government debt (% of GDP)
    #[serde(rename = "Government_Debt_GDP")]
    pub government_debt_gdp: f64,
}

/// One country's debt-sustainability classification (`GET /debt-sustainability-dashboard`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DebtSustainabilityEntry {
    /// Country name
    pub country: CountryName,
    /// Region
    pub region: String,
    /// Government debt (% of GDP)
    pub debt_ratio: f64,
    /// Interest payments (% of revenue)
    pub debt_service_ratio: f64,
    /// GDP growth (%)
    pub growth_rate: f64,
    /// Primary balance (% of GDP)
    pub primary_balance: f64,
    /// Category assigned by the server
    pub sustainability: SustainabilityCategory,
    /// Fiscal space score
    pub fiscal_space: f64,
}

/// Discrete debt-sustainability classification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SustainabilityCategory {
    /// Debt < 40% of GDP and service < 15% of revenue
    Sustainable,
    /// Debt < 60% of GDP and service < 25% of revenue
    ModeratelySustainable,
    /// Debt < 80% of GDP
    AtRisk,
    /// Debt >= 80% of GDP
    Unsustainable,
}

impl SustainabilityCategory {
    /// All categories, healthiest first
    pub const ALL: [Self; 4] = [
        Self::Sustainable,
        Self::ModeratelySustainable,
        Self::AtRisk,
        Self::Unsustainable,
    ];

    /// Wire representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sustainable => "SUSTAINABLE",
            Self::ModeratelySustainable => "MODERATELY_SUSTAINABLE",
            Self::AtRisk => "AT_RISK",
            Self::Unsustainable => "UNSUSTAINABLE",
        }
    }

    /// Display label with spaces instead of underscores
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sustainable => "SUSTAINABLE",
            Self::ModeratelySustainable => "MODERATELY SUSTAINABLE",
            Self::AtRisk => "AT RISK",
            Self::Unsustainable => "UNSUSTAINABLE",
        }
    }
}

impl fmt::Display for SustainabilityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SustainabilityCategory {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                crate::Error::validation(
                    "status",
                    format!("unknown sustainability category '{s}'"),
                )
            })
    }
}

/// Parameters for `GET /export-data`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportQuery {
    /// Countries to include (all when empty)
    #[serde(default)]
    pub countries: Vec<CountryName>,
    /// Years to include (all when empty)
    #[serde(default)]
    pub years: Vec<String>,
    /// Metrics to include (all when empty)
    #[serde(default)]
    pub metrics: Vec<String>,
}

impl ExportQuery {
    /// Flatten into repeated `key=value` query pairs
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, &str)> {
        let countries = self.countries.iter().map(|c| ("countries", c.as_str()));
        let years = self.years.iter().map(|y| ("years", y.as_str()));
        let metrics = self.metrics.iter().map(|m| ("metrics", m.as_str()));
        countries.chain(years).chain(metrics).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_overview_keeps_server_order() {
        let overview: Overview = serde_json::from_value(json!({
            "total_countries": 54,
            "time_period": "2000-2023",
            "latest_year": 2023,
            "key_metrics": {
                "avg_gdp_growth": 3.8,
                "avg_debt_gdp": 61.2,
                "avg_inflation": 9.4,
                "avg_hdi": 0.557
            },
            "regional_breakdown": {"West Africa": 16, "East Africa": 14, "Central Africa": 9},
            "income_groups": {"Low income": 22, "Lower middle income": 23}
        }))
        .unwrap();

        let regions: Vec<&str> = overview.regional_breakdown.keys().map(String::as_str).collect();
        assert_eq!(regions, vec!["West Africa", "East Africa", "Central Africa"]);
        assert_eq!(overview.key_metrics.avg_hdi, 0.557);
    }

    #[test]
    fn test_country_analysis_historical_field_names() {
        let point: HistoricalPoint = serde_json::from_value(json!({
            "Year": 2021,
            "GDP_Growth": 3.6,
            "Government_Debt_GDP": 37.4,
            "Inflation": 17.0
        }))
        .unwrap();

        assert_eq!(point.year, 2021);
        assert_eq!(point.government_debt_gdp, 37.4);
    }

    #[test]
    fn test_comparison_without_countries() {
        let comparison: Comparison = serde_json::from_value(json!({"comparison_year": 2023})).unwrap();
        assert!(comparison.countries.is_none());
    }

    #[test]
    fn test_cluster_analysis_is_transparent_map() {
        let clusters: ClusterAnalysis = serde_json::from_value(json!({
            "0": {
                "size": 2,
                "countries": ["Kenya", "Ghana"],
                "characteristics": {"avg_gdp_growth": 5.1, "avg_debt": 60.0, "avg_inflation": 8.0, "avg_hdi": 0.6},
                "label": "Growing economies"
            }
        }))
        .unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters.get("0").unwrap().countries, vec!["Kenya", "Ghana"]);
    }

    #[test]
    fn test_warning_type_is_renamed() {
        let warning: Warning = serde_json::from_value(json!({
            "type": "DEBT_RISK",
            "level": "HIGH",
            "message": "Debt above 70% of GDP"
        }))
        .unwrap();

        assert_eq!(warning.kind, "DEBT_RISK");
        assert_eq!(warning.level, WarningLevel::High);
    }

    #[test]
    fn test_unknown_sustainability_category_is_rejected() {
        let result = serde_json::from_value::<SustainabilityCategory>(json!("SOMEWHAT_OK"));
        assert!(result.is_err());
    }

    #[test]
    fn test_fiscal_space_uses_server_field_names() {
        let entry: FiscalSpaceEntry = serde_json::from_value(json!({
            "Country": "Botswana",
            "Region": "Southern Africa",
            "Fiscal_Space_Score": 12.5,
            "Revenue_GDP": 30.1,
            "Total_Expenditure_GDP": 31.0,
            "Government_Debt_GDP": 18.2
        }))
        .unwrap();

        assert_eq!(entry.country, "Botswana");
        assert_eq!(entry.fiscal_space_score, 12.5);
    }

    #[test]
    fn test_category_and_level_parsing() {
        assert_eq!(
            "at_risk".parse::<SustainabilityCategory>().unwrap(),
            SustainabilityCategory::AtRisk
        );
        assert!("ALL".parse::<SustainabilityCategory>().is_err());
        assert_eq!("medium".parse::<WarningLevel>().unwrap(), WarningLevel::Medium);
        assert!("severe".parse::<WarningLevel>().is_err());
    }

    #[test]
    fn test_export_query_pairs_repeat_keys() {
        let query = ExportQuery {
            countries: vec!["Kenya".to_string(), "Ghana".to_string()],
            years: vec!["2022".to_string()],
            metrics: Vec::new(),
        };

        assert_eq!(
            query.to_pairs(),
            vec![("countries", "Kenya"), ("countries", "Ghana"), ("years", "2022")]
        );
    }
}
