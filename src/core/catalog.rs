//! Currency catalog abstractions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::fetched::Fetched;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CurrencyInfo {
    pub description: String,
}

/// Currency code mapped to its description. Built fresh for every request.
pub type CurrencyCatalog = BTreeMap<String, CurrencyInfo>;

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_currencies(&self) -> Fetched<CurrencyCatalog>;
}
