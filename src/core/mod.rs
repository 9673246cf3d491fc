//! Core business logic abstractions

pub mod catalog;
pub mod fetched;
pub mod log;
pub mod rate;

// Re-export main types for cleaner imports
pub use catalog::{CatalogProvider, CurrencyCatalog, CurrencyInfo};
pub use fetched::Fetched;
pub use rate::RateProvider;
