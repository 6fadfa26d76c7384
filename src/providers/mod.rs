pub mod rates_api;

pub use rates_api::{RatesClient, fetch_rates};
