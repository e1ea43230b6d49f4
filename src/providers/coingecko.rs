use crate::core::config::CoinGeckoProviderConfig;
use crate::core::price::PriceSource;
use crate::providers::util::with_retry;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Live spot quotes from the CoinGecko simple price endpoint.
pub struct CoinGeckoProvider {
    id: String,
    base_url: String,
    coin: String,
    currency: String,
    retries: usize,
    client: reqwest::Client,
}

// {"bitcoin": {"aud": 158000.12}}
type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

impl CoinGeckoProvider {
    pub fn new(config: &CoinGeckoProviderConfig, coin: &str, currency: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("btc-housing/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let coin = coin.to_lowercase();
        let currency = currency.to_lowercase();

        Ok(CoinGeckoProvider {
            id: format!("coingecko:{coin}:{currency}"),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            coin,
            currency,
            retries: config.retries,
            client,
        })
    }
}

#[async_trait]
impl PriceSource for CoinGeckoProvider {
    fn id(&self) -> &str {
        &self.id
    }

    #[instrument(
        name = "CoinGeckoPriceFetch",
        skip(self),
        fields(coin = %self.coin, currency = %self.currency)
    )]
    async fn fetch_current(&self) -> Result<f64> {
        let url = format!(
            "{}/api/v3/simple/price?ids={}&vs_currencies={}",
            self.base_url, self.coin, self.currency
        );
        debug!("Requesting spot price from {}", url);

        let response = with_retry(
            || async { self.client.get(&url).send().await?.error_for_status() },
            self.retries,
            500,
        )
        .await
        .with_context(|| format!("Request failed for {} in {}", self.coin, self.currency))?;

        let text = response.text().await?;
        let data: SimplePriceResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", self.coin, e))?;

        let price = data
            .get(&self.coin)
            .and_then(|quotes| quotes.get(&self.currency))
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "No {} price found for {}",
                    self.currency.to_uppercase(),
                    self.coin
                )
            })?;

        debug!(price, "Received spot price");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> CoinGeckoProviderConfig {
        CoinGeckoProviderConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            cache_ttl_secs: 3600,
            retries: 0,
        }
    }

    async fn create_mock_server(status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "bitcoin"))
            .and(query_param("vs_currencies", "aud"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;
        mock_server
    }

    #[tokio::test]
    async fn test_successful_price_fetch() {
        let mock_server = create_mock_server(200, r#"{"bitcoin": {"aud": 158000.12}}"#).await;
        let provider = CoinGeckoProvider::new(&config(&mock_server.uri()), "bitcoin", "AUD").unwrap();

        assert_eq!(provider.id(), "coingecko:bitcoin:aud");
        assert_eq!(provider.fetch_current().await.unwrap(), 158000.12);
    }

    #[tokio::test]
    async fn test_missing_currency_in_response() {
        let mock_server = create_mock_server(200, r#"{"bitcoin": {"usd": 100000.0}}"#).await;
        let provider = CoinGeckoProvider::new(&config(&mock_server.uri()), "bitcoin", "AUD").unwrap();

        let result = provider.fetch_current().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No AUD price found for bitcoin"
        );
    }

    #[tokio::test]
    async fn test_malformed_response() {
        let mock_server = create_mock_server(200, r#"{"bitcoin": "soon"}"#).await;
        let provider = CoinGeckoProvider::new(&config(&mock_server.uri()), "bitcoin", "AUD").unwrap();

        let result = provider.fetch_current().await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response for bitcoin")
        );
    }

    #[tokio::test]
    async fn test_server_error() {
        let mock_server = create_mock_server(429, "").await;
        let provider = CoinGeckoProvider::new(&config(&mock_server.uri()), "bitcoin", "AUD").unwrap();

        let result = provider.fetch_current().await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Request failed for bitcoin in aud"
        );
    }
}
