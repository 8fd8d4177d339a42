//! HTTP client for the remote fiscal analytics API

use afrifiscal_core::{
    ClusterAnalysis, Comparison, CountryAnalysis, DebtSustainabilityEntry, EarlyWarnings, Error,
    ExportQuery, FiscalSpaceEntry, Overview, PolicyRecommendations, Result, config::ApiConfig,
};
use bytes::Bytes;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// API client for the analytics endpoints
///
/// Every call is a single independent GET. There is no retry, caching or
/// batching; failures are reported as typed [`Error`]s.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    /// Create a new API client with the given base URL and request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        })
    }

    /// Create a client from the `[api]` configuration section
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Base URL all endpoint paths are appended to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Continental summary
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_overview(&self) -> Result<Overview> {
        self.get_json("/overview", &[]).await
    }

    /// Full analysis for one country
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_country_analysis(&self, country: &str) -> Result<CountryAnalysis> {
        let path = format!("/country/{}", urlencoding::encode(country));
        self.get_json(&path, &[]).await
    }

    /// Side-by-side metrics for several countries
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn compare_countries(&self, countries: &[String]) -> Result<Comparison> {
        let query: Vec<(&str, &str)> = countries
            .iter()
            .map(|country| ("countries", country.as_str()))
            .collect();
        self.get_json("/compare", &query).await
    }

    /// Cluster assignments
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_cluster_analysis(&self) -> Result<ClusterAnalysis> {
        self.get_json("/cluster-analysis", &[]).await
    }

    /// All active early warnings
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_early_warnings(&self) -> Result<EarlyWarnings> {
        self.get_json("/early-warning", &[]).await
    }

    /// Policy recommendations for one country
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_policy_recommendations(&self, country: &str) -> Result<PolicyRecommendations> {
        let path = format!("/policy-recommendations/{}", urlencoding::encode(country));
        self.get_json(&path, &[]).await
    }

    /// Fiscal space scores for all countries
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_fiscal_space_analysis(&self) -> Result<Vec<FiscalSpaceEntry>> {
        self.get_json("/fiscal-space-analysis", &[]).await
    }

    /// Debt sustainability classification for all countries
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be parsed.
    pub async fn get_debt_sustainability_dashboard(&self) -> Result<Vec<DebtSustainabilityEntry>> {
        self.get_json("/debt-sustainability-dashboard", &[]).await
    }

    /// Raw data export as an opaque blob
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the body cannot be read.
    pub async fn export_data(&self, query: &ExportQuery) -> Result<Bytes> {
        let endpoint = "/export-data";
        let response = self.send(endpoint, &query.to_pairs()).await?;
        response.bytes().await.map_err(|e| self.transport_error(endpoint, &e))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<T> {
        let response = self.send(endpoint, query).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(endpoint, &e))?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(endpoint, error = %e, "Response did not match the expected schema");
            Error::Decode {
                endpoint: endpoint.to_string(),
                message: e.to_string(),
            }
        })
    }

    async fn send(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(%url, params = query.len(), "Calling analytics API");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(endpoint, &e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, %status, "Analytics API returned an error status");
            return Err(Error::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    fn transport_error(&self, endpoint: &str, error: &reqwest::Error) -> Error {
        warn!(endpoint, error = %error, "Analytics API request failed");
        if error.is_timeout() {
            Error::Timeout {
                duration_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else {
            Error::Network {
                endpoint: endpoint.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Default file name of a data export downloaded on `date`
#[must_use]
pub fn export_file_name(date: NaiveDate) -> String {
    format!("afrifiscal-export-{}.csv", date.format("%Y-%m-%d"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:8000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_from_config_uses_configured_values() {
        let config = ApiConfig {
            base_url: "https://fiscal.example.org/api".to_string(),
            timeout_seconds: 12,
        };

        let client = ApiClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "https://fiscal.example.org/api");
        assert_eq!(client.timeout, Duration::from_secs(12));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        // Port 9 (discard) on localhost is closed in test environments
        let client = ApiClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();

        let err = client.get_overview().await.unwrap_err();
        assert!(err.is_upstream());
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(export_file_name(date), "afrifiscal-export-2024-03-09.csv");
    }
}
