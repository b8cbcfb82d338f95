//! Quote service over HTTP.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use super::{ExchangeRateProvider, RateTable};
use crate::config::ExchangeConfig;
use crate::error::{EngineError, EngineResult};

/// Fetches quotes from a `GET {base_url}?apikey=..&symbols=..` endpoint
/// returning `{"rates": {...}}` against USD.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    symbols: String,
}

impl HttpRateProvider {
    /// Builds a provider from `exchange.yaml` settings.
    ///
    /// The API key is read once from the environment variable named by
    /// `api_key_env`. A missing variable is not an error; the request is
    /// sent without a key and the service decides.
    pub fn from_config(config: &ExchangeConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::InvalidConfig {
                message: format!("failed to build HTTP client: {}", e),
            })?;

        let api_key = std::env::var(&config.api_key_env).ok();
        if api_key.is_none() {
            warn!(
                env_var = %config.api_key_env,
                "Exchange-rate API key not set; requesting quotes without one"
            );
        }

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
            symbols: config.symbols.join(","),
        })
    }

    fn unavailable(message: String) -> EngineError {
        EngineError::RateUnavailable {
            currency: "*".to_string(),
            message,
        }
    }
}

#[async_trait]
impl ExchangeRateProvider for HttpRateProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_rates(&self) -> EngineResult<RateTable> {
        let start = Instant::now();
        let mut request = self.client.get(&self.base_url);
        if let Some(key) = &self.api_key {
            request = request.query(&[("apikey", key.as_str())]);
        }
        request = request.query(&[("symbols", self.symbols.as_str())]);

        let response = request
            .send()
            .await
            .map_err(|e| Self::unavailable(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::unavailable(format!(
                "quote service returned HTTP {}",
                response.status()
            )));
        }

        let table: RateTable = response
            .json()
            .await
            .map_err(|e| Self::unavailable(format!("malformed quote response: {}", e)))?;

        debug!(
            provider = self.name(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched exchange-rate quotes"
        );

        Ok(table)
    }
}
