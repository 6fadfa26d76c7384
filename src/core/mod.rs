//! Core business logic abstractions

pub mod config;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use rates::{DEFAULT_YEAR, HealthStatus, RatesSource, fetch_rates_for_years};
