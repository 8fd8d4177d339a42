//! Analytics API response bodies

use serde_json::{Value, json};

/// `GET /overview`
pub fn overview() -> Value {
    json!({
        "total_countries": 54,
        "time_period": "2000-2023",
        "latest_year": 2023,
        "key_metrics": {
            "avg_gdp_growth": 3.8,
            "avg_debt_gdp": 61.2,
            "avg_inflation": 9.4,
            "avg_hdi": 0.557
        },
        "regional_breakdown": {"West Africa": 16, "East Africa": 14},
        "income_groups": {"Low income": 22, "Lower middle income": 23}
    })
}

/// `GET /country/{name}`
pub fn country_analysis(country: &str) -> Value {
    json!({
        "basic_info": {
            "country": country,
            "region": "East Africa",
            "income_group": "Lower middle income",
            "latest_year": 2023
        },
        "current_metrics": {
            "gdp_growth": 5.6,
            "government_debt": 70.2,
            "inflation": 7.7,
            "budget_balance": -5.3,
            "revenue_gdp": 16.1,
            "hdi": 0.601,
            "fiscal_space": 2.4,
            "debt_sustainability": 48.0,
            "economic_resilience": 61.0
        },
        "trends": {"gdp_growth": 0.8, "government_debt": 1.5},
        "risk_assessment": {"debt_risk": "High", "inflation_risk": "Moderate", "fiscal_risk": "Low"},
        "predictions": {"GDP_Growth": [5.1, 5.3, 5.5]},
        "historical_data": [
            {"Year": 2022, "GDP_Growth": 4.8, "Government_Debt_GDP": 68.7, "Inflation": 7.6},
            {"Year": 2023, "GDP_Growth": 5.6, "Government_Debt_GDP": 70.2, "Inflation": 7.7}
        ]
    })
}

/// `GET /compare`
pub fn comparison() -> Value {
    json!({
        "comparison_year": 2023,
        "countries": {
            "Nigeria": {
                "gdp_growth": 2.9, "government_debt": 38.8, "inflation": 24.7,
                "budget_balance": -4.2, "hdi": 0.548, "debt_sustainability": 62.0,
                "revenue_gdp": 7.5, "region": "West Africa", "income_group": "Lower middle income"
            },
            "Kenya": {
                "gdp_growth": 5.6, "government_debt": 70.2, "inflation": 7.7,
                "budget_balance": -5.3, "hdi": 0.601, "debt_sustainability": 48.0,
                "revenue_gdp": 16.1, "region": "East Africa", "income_group": "Lower middle income"
            }
        }
    })
}

/// `GET /cluster-analysis`
pub fn cluster_analysis() -> Value {
    json!({
        "0": {
            "size": 2,
            "countries": ["Kenya", "Rwanda"],
            "characteristics": {"avg_gdp_growth": 6.1, "avg_debt": 62.0, "avg_inflation": 6.5, "avg_hdi": 0.56},
            "label": "Fast growing"
        },
        "1": {
            "size": 1,
            "countries": ["Zambia"],
            "characteristics": {"avg_gdp_growth": 2.7, "avg_debt": 99.0, "avg_inflation": 11.0, "avg_hdi": 0.57},
            "label": "Debt distressed"
        }
    })
}

/// `GET /early-warning`
pub fn early_warnings() -> Value {
    json!({
        "warnings": [
            {"country": "Ghana", "warnings": [
                {"type": "DEBT_RISK", "level": "HIGH", "message": "Debt above 70% of GDP"}
            ]},
            {"country": "Kenya", "warnings": [
                {"type": "INFLATION_RISK", "level": "MEDIUM", "message": "Inflation above 7%"}
            ]}
        ]
    })
}

/// `GET /policy-recommendations/{name}`
pub fn policy_recommendations(country: &str) -> Value {
    json!({
        "country": country,
        "recommendations": [
            {
                "category": "DEBT_MANAGEMENT",
                "priority": "HIGH",
                "recommendation": "Implement debt restructuring",
                "actions": ["Negotiate with creditors"]
            }
        ]
    })
}

/// `GET /fiscal-space-analysis`
pub fn fiscal_space() -> Value {
    json!([
        {"Country": "Botswana", "Region": "Southern Africa", "Fiscal_Space_Score": 14.2,
         "Revenue_GDP": 28.0, "Total_Expenditure_GDP": 30.1, "Government_Debt_GDP": 19.0},
        {"Country": "Ghana", "Region": "West Africa", "Fiscal_Space_Score": -6.0,
         "Revenue_GDP": 15.0, "Total_Expenditure_GDP": 22.5, "Government_Debt_GDP": 88.0}
    ])
}

/// `GET /debt-sustainability-dashboard`
pub fn debt_sustainability() -> Value {
    json!([
        {"country": "Botswana", "region": "Southern Africa", "debt_ratio": 19.0,
         "debt_service_ratio": 4.0, "growth_rate": 3.1, "primary_balance": 0.5,
         "sustainability": "SUSTAINABLE", "fiscal_space": 14.2},
        {"country": "Ghana", "region": "West Africa", "debt_ratio": 88.0,
         "debt_service_ratio": 41.0, "growth_rate": 2.9, "primary_balance": -2.4,
         "sustainability": "UNSUSTAINABLE", "fiscal_space": -6.0}
    ])
}
