//! Rates abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Year requested when the caller does not name one.
pub const DEFAULT_YEAR: i64 = 2022;

/// Response of the `/health` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub ok: bool,
}

#[async_trait]
pub trait RatesSource: Send + Sync {
    /// Fetches the rates payload for `year`, or for [`DEFAULT_YEAR`] when `None`.
    ///
    /// The payload is returned as decoded JSON without interpretation.
    async fn fetch_rates(&self, year: Option<i64>) -> Result<Value>;

    /// Same as [`RatesSource::fetch_rates`], keeping only countries whose name contains `q`.
    async fn search_rates(&self, year: Option<i64>, q: &str) -> Result<Value>;
}

/// Fetches several years concurrently, optionally filtered by country name.
/// Results keep the order of `years`, and a failure for one year leaves the
/// others untouched.
pub async fn fetch_rates_for_years(
    source: &(dyn RatesSource + Send + Sync),
    years: &[i64],
    search: Option<&str>,
) -> Vec<(i64, Result<Value>)> {
    let futures = years.iter().map(|&year| async move {
        let result = match search {
            Some(q) => source.search_rates(Some(year), q).await,
            None => source.fetch_rates(Some(year)).await,
        };
        (year, result)
    });
    join_all(futures).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    struct MockSource {
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl RatesSource for MockSource {
        async fn fetch_rates(&self, year: Option<i64>) -> Result<Value> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            let year = year.unwrap_or(DEFAULT_YEAR);
            // Earlier years finish later so completion order differs from input order
            tokio::time::sleep(Duration::from_millis((2030 - year).max(0) as u64)).await;
            if year == 1999 {
                bail!("Failed to load rates");
            }
            Ok(json!({ "year": year }))
        }

        async fn search_rates(&self, year: Option<i64>, q: &str) -> Result<Value> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            Ok(json!({ "year": year.unwrap_or(DEFAULT_YEAR), "q": q }))
        }
    }

    #[tokio::test]
    async fn test_fetch_rates_for_years_keeps_input_order() {
        let source = MockSource {
            call_count: AtomicUsize::new(0),
        };

        let results = fetch_rates_for_years(&source, &[2020, 2021, 2022], None).await;

        assert_eq!(source.call_count.load(Ordering::SeqCst), 3);
        let years: Vec<i64> = results.iter().map(|(y, _)| *y).collect();
        assert_eq!(years, vec![2020, 2021, 2022]);
        for (year, result) in results {
            assert_eq!(result.unwrap(), json!({ "year": year }));
        }
    }

    #[tokio::test]
    async fn test_fetch_rates_for_years_isolates_failures() {
        let source = MockSource {
            call_count: AtomicUsize::new(0),
        };

        let results = fetch_rates_for_years(&source, &[1999, 2022], None).await;

        assert_eq!(results.len(), 2);
        assert_eq!(
            results[0].1.as_ref().unwrap_err().to_string(),
            "Failed to load rates"
        );
        assert_eq!(results[1].1.as_ref().unwrap(), &json!({ "year": 2022 }));
    }

    #[tokio::test]
    async fn test_fetch_rates_for_no_years() {
        let source = MockSource {
            call_count: AtomicUsize::new(0),
        };

        let results = fetch_rates_for_years(&source, &[], None).await;

        assert!(results.is_empty());
        assert_eq!(source.call_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_fetch_rates_for_years_with_search() {
        let source = MockSource {
            call_count: AtomicUsize::new(0),
        };

        let results = fetch_rates_for_years(&source, &[2020, 2021], Some("ice")).await;

        assert_eq!(source.call_count.load(Ordering::SeqCst), 2);
        for (year, result) in results {
            assert_eq!(result.unwrap(), json!({ "year": year, "q": "ice" }));
        }
    }

    #[test]
    fn test_health_status_deserialization() {
        let status: HealthStatus = serde_json::from_str(r#"{"ok": true}"#).unwrap();
        assert!(status.ok);
    }
}
