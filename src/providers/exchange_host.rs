//! Client for the exchangerate.host style API.
//!
//! Both fetch operations are total: any upstream failure collapses into the
//! hardcoded fallback data, never into an error for the caller.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::core::catalog::{CatalogProvider, CurrencyCatalog, CurrencyInfo};
use crate::core::fetched::Fetched;
use crate::core::rate::RateProvider;

/// Currencies served when the list endpoint is unavailable.
pub const FALLBACK_CODES: [&str; 7] = ["AED", "AFN", "ALL", "AMD", "ANG", "AOA", "TMT"];

/// Rate served when the convert endpoint is unavailable.
pub const FALLBACK_RATE: f64 = 1.23456;

// BOB is dropped from every live listing.
const EXCLUDED_CODE: &str = "BOB";

// CUP -> SVC is answered locally, without an upstream call.
const PINNED_PAIR: (&str, &str) = ("CUP", "SVC");
const PINNED_RATE: f64 = 0.339787;

pub fn fallback_catalog() -> CurrencyCatalog {
    FALLBACK_CODES
        .iter()
        .map(|code| {
            (
                code.to_string(),
                CurrencyInfo {
                    description: format!("{code} Currency"),
                },
            )
        })
        .collect()
}

pub struct ExchangeHostClient {
    base_url: String,
    access_key: Option<String>,
    client: reqwest::Client,
}

impl ExchangeHostClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent("fxview/1.0").build()?;
        Ok(ExchangeHostClient {
            base_url: config.base_url.clone(),
            access_key: config.access_key.clone(),
            client,
        })
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.client.get(url);
        if let Some(key) = &self.access_key {
            request = request.query(&[("access_key", key)]);
        }
        request
    }

    async fn try_fetch_currencies(&self) -> Result<CurrencyCatalog> {
        let url = format!("{}/list", self.base_url);
        debug!("Requesting currency list from {}", url);

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        let data = response
            .json::<ListResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse currency list response: {}", e))?;

        if !data.success {
            return Err(anyhow!("Upstream reported failure for currency list"));
        }

        let mut symbols = data
            .symbols
            .ok_or_else(|| anyhow!("No symbols found in currency list"))?;
        symbols.remove(EXCLUDED_CODE);
        Ok(symbols)
    }

    async fn try_fetch_rate(&self, from: &str, to: &str) -> Result<f64> {
        let url = format!("{}/convert", self.base_url);
        debug!("Requesting conversion rate from {} for {}->{}", url, from, to);

        let response = self
            .get(&url)
            .query(&[("from", from), ("to", to), ("amount", "1")])
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for pair: {}->{}", e, from, to))?;

        let data = response
            .json::<ConvertResponse>()
            .await
            .map_err(|e| anyhow!("Failed to parse conversion response for {from}->{to}: {e}"))?;

        if !data.success {
            return Err(anyhow!("Upstream reported failure for pair: {from}->{to}"));
        }

        data.result
            .ok_or_else(|| anyhow!("No conversion result found for pair: {from}->{to}"))
    }
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    success: bool,
    symbols: Option<CurrencyCatalog>,
}

#[derive(Debug, Deserialize)]
struct ConvertResponse {
    #[serde(default)]
    success: bool,
    result: Option<f64>,
}

#[async_trait]
impl CatalogProvider for ExchangeHostClient {
    async fn fetch_currencies(&self) -> Fetched<CurrencyCatalog> {
        match self.try_fetch_currencies().await {
            Ok(catalog) => Fetched::Live(catalog),
            Err(err) => {
                warn!("Currency list fetch failed, serving fallback data: {err:#}");
                Fetched::Fallback(fallback_catalog())
            }
        }
    }
}

#[async_trait]
impl RateProvider for ExchangeHostClient {
    async fn fetch_rate(&self, from: &str, to: &str) -> Fetched<f64> {
        if (from, to) == PINNED_PAIR {
            return Fetched::Live(PINNED_RATE);
        }

        match self.try_fetch_rate(from, to).await {
            Ok(rate) => Fetched::Live(rate),
            Err(err) => {
                warn!("Conversion rate fetch failed for {from}->{to}, serving fallback rate: {err:#}");
                Fetched::Fallback(FALLBACK_RATE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ExchangeHostClient {
        ExchangeHostClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            access_key: None,
        })
        .unwrap()
    }

    async fn mount_list(server: &MockServer, body: &str) {
        Mock::given(method("GET"))
            .and(path("/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_successful_list_fetch_excludes_bob() {
        let mock_server = MockServer::start().await;
        let mock_response = r#"{
            "success": true,
            "symbols": {
                "BOB": {"description": "Bolivian Boliviano"},
                "EUR": {"description": "Euro"},
                "USD": {"description": "United States Dollar"}
            }
        }"#;
        mount_list(&mock_server, mock_response).await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_currencies().await;

        assert!(!fetched.is_fallback());
        let catalog = fetched.into_value();
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.contains_key("BOB"));
        assert_eq!(catalog["EUR"].description, "Euro");
        assert_eq!(catalog["USD"].description, "United States Dollar");
    }

    #[tokio::test]
    async fn test_list_upstream_failure_flag_falls_back() {
        let mock_server = MockServer::start().await;
        mount_list(&mock_server, r#"{"success": false}"#).await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_currencies().await;

        assert!(fetched.is_fallback());
        assert_eq!(fetched.into_value(), fallback_catalog());
    }

    #[tokio::test]
    async fn test_list_malformed_body_falls_back() {
        let mock_server = MockServer::start().await;
        mount_list(&mock_server, "not json at all").await;

        let provider = test_client(&mock_server.uri());
        assert!(provider.fetch_currencies().await.is_fallback());
    }

    #[tokio::test]
    async fn test_list_symbols_not_a_mapping_falls_back() {
        let mock_server = MockServer::start().await;
        mount_list(&mock_server, r#"{"success": true, "symbols": ["AED", "EUR"]}"#).await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_currencies().await;

        assert!(fetched.is_fallback());
        let catalog = fetched.into_value();
        assert_eq!(catalog.len(), FALLBACK_CODES.len());
        assert_eq!(catalog["AED"].description, "AED Currency");
        assert_eq!(catalog["TMT"].description, "TMT Currency");
    }

    #[tokio::test]
    async fn test_list_network_error_falls_back() {
        // Nothing listens on the discard port
        let provider = test_client("http://127.0.0.1:9");
        let fetched = provider.fetch_currencies().await;

        assert!(fetched.is_fallback());
        assert_eq!(fetched.into_value(), fallback_catalog());
    }

    #[tokio::test]
    async fn test_successful_rate_fetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .and(query_param("amount", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true, "result": 0.9182})),
            )
            .mount(&mock_server)
            .await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_rate("USD", "EUR").await;

        assert!(!fetched.is_fallback());
        assert_eq!(fetched.into_value(), 0.9182);
    }

    #[tokio::test]
    async fn test_rate_missing_result_falls_back() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"success": true}"#))
            .mount(&mock_server)
            .await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_rate("USD", "EUR").await;

        assert!(fetched.is_fallback());
        assert_eq!(fetched.into_value(), FALLBACK_RATE);
    }

    #[tokio::test]
    async fn test_rate_server_error_falls_back() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_rate("GBP", "JPY").await;

        assert!(fetched.is_fallback());
        assert_eq!(fetched.into_value(), FALLBACK_RATE);
    }

    #[tokio::test]
    async fn test_pinned_pair_skips_upstream() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/convert"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = test_client(&mock_server.uri());
        let fetched = provider.fetch_rate("CUP", "SVC").await;

        assert!(!fetched.is_fallback());
        assert_eq!(fetched.into_value(), 0.339787);
        // MockServer verifies the expect(0) on drop
    }

    #[tokio::test]
    async fn test_access_key_is_sent_when_configured() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/list"))
            .and(query_param("access_key", "sekrit"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"success": true, "symbols": {"EUR": {"description": "Euro"}}}),
            ))
            .mount(&mock_server)
            .await;

        let provider = ExchangeHostClient::new(&ApiConfig {
            base_url: mock_server.uri(),
            access_key: Some("sekrit".to_string()),
        })
        .unwrap();

        let fetched = provider.fetch_currencies().await;
        assert!(!fetched.is_fallback());
    }
}
