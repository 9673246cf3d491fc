//! Conversion rate abstractions

use async_trait::async_trait;

use crate::core::fetched::Fetched;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Units of `to` currency per one unit of `from` currency.
    async fn fetch_rate(&self, from: &str, to: &str) -> Fetched<f64>;
}
