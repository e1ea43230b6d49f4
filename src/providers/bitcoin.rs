use crate::core::cache::Cache;
use crate::core::error::SeriesError;
use crate::core::price::{PriceSource, TimeSeries};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Bitcoin prices: a static history plus a memoised live quote that falls
/// back to the last historical price whenever the quote cannot be obtained.
pub struct BitcoinPrices {
    live: Arc<dyn PriceSource>,
    history: TimeSeries,
    last_known: f64,
    cache: Cache<String, f64>,
    timeout: Duration,
}

impl BitcoinPrices {
    pub fn new(
        live: Arc<dyn PriceSource>,
        history: TimeSeries,
        cache: Cache<String, f64>,
        timeout: Duration,
    ) -> Result<Self, SeriesError> {
        let last_known = history
            .last()
            .map(|p| p.price)
            .ok_or_else(|| SeriesError::empty("bitcoin"))?;

        Ok(Self {
            live,
            history,
            last_known,
            cache,
            timeout,
        })
    }

    pub fn history(&self) -> &TimeSeries {
        &self.history
    }

    /// Current price in the configured currency. Never fails: any problem with
    /// the live quote yields the last historical price instead.
    pub async fn current_price(&self) -> f64 {
        let key = self.live.id().to_string();
        if let Some(price) = self.cache.get(&key).await {
            return price;
        }

        match tokio::time::timeout(self.timeout, self.live.fetch_current()).await {
            Ok(Ok(price)) if price.is_finite() && price > 0.0 => {
                debug!(source = %key, price, "Using live price");
                self.cache.put(key, price).await;
                price
            }
            Ok(Ok(price)) => {
                warn!(source = %key, price, "Live price rejected, using last known price");
                self.last_known
            }
            Ok(Err(e)) => {
                warn!(source = %key, error = %e, "Live price fetch failed, using last known price");
                self.last_known
            }
            Err(_) => {
                warn!(
                    source = %key,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Live price fetch timed out, using last known price"
                );
                self.last_known
            }
        }
    }
}
