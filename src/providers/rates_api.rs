use crate::core::{DEFAULT_YEAR, HealthStatus, RatesSource};
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Client for the rates API served at a fixed origin.
///
/// Every call issues exactly one GET request. Nothing is cached or retried,
/// and concurrent calls share only the immutable origin and the connection pool.
#[derive(Debug, Clone)]
pub struct RatesClient {
    origin: String,
    client: reqwest::Client,
}

impl RatesClient {
    pub fn new(origin: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self::with_client(origin, client))
    }

    pub fn with_client(origin: &str, client: reqwest::Client) -> Self {
        RatesClient {
            origin: origin.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn rates_url(&self, year: Option<i64>) -> String {
        format!("{}/rates?year={}", self.origin, year.unwrap_or(DEFAULT_YEAR))
    }

    /// Builds the rates URL with a country-name filter. `q` is percent-encoded.
    pub fn search_url(&self, year: Option<i64>, q: &str) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.rates_url(year))
            .with_context(|| format!("Invalid origin: {}", self.origin))?;
        url.query_pairs_mut().append_pair("q", q);
        Ok(url)
    }

    pub fn top_url(&self, year: Option<i64>, n: Option<u32>) -> String {
        let params: Vec<String> = [
            year.map(|y| format!("year={y}")),
            n.map(|n| format!("n={n}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if params.is_empty() {
            format!("{}/top", self.origin)
        } else {
            format!("{}/top?{}", self.origin, params.join("&"))
        }
    }

    /// Fetches the rates payload for `year`, or for [`DEFAULT_YEAR`] when `None`.
    ///
    /// The payload is returned as decoded JSON without interpretation. Any
    /// non-2xx status fails with `Failed to load rates`.
    pub async fn fetch_rates(&self, year: Option<i64>) -> Result<Value> {
        let url = self.rates_url(year);
        self.get_json(&url, "Failed to load rates").await
    }

    /// Like [`RatesClient::fetch_rates`], restricted to countries whose name
    /// contains `q`. The server matches case-insensitively.
    pub async fn search_rates(&self, year: Option<i64>, q: &str) -> Result<Value> {
        let url = self.search_url(year, q)?;
        self.get_json(url.as_str(), "Failed to load rates").await
    }

    /// Checks that the server is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = format!("{}/health", self.origin);
        self.get_json(&url, "Health check failed").await
    }

    /// Fetches the time series of a single country by its ISO3 code.
    ///
    /// The code is trimmed and upper-cased before it goes on the wire.
    pub async fn fetch_country(&self, iso3: &str) -> Result<Value> {
        let code = iso3.trim().to_uppercase();
        if code.is_empty() {
            bail!("Country code must not be empty");
        }
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            bail!("Invalid country code: {}", iso3.trim());
        }

        let url = format!("{}/country/{}", self.origin, code);
        self.get_json(&url, &format!("Failed to load country {code}"))
            .await
    }

    /// Fetches the top countries by rate. Unset parameters are left to the server.
    pub async fn fetch_top(&self, year: Option<i64>, n: Option<u32>) -> Result<Value> {
        let url = self.top_url(year, n);
        self.get_json(&url, "Failed to load top countries").await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, failure: &str) -> Result<T> {
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        let status = response.status();
        debug!(%status, "Received response from {}", url);
        if !status.is_success() {
            bail!("{failure}");
        }

        let response_text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text from {url}"))?;

        serde_json::from_str(&response_text)
            .with_context(|| format!("Failed to parse JSON response from {url}"))
    }
}

#[async_trait]
impl RatesSource for RatesClient {
    async fn fetch_rates(&self, year: Option<i64>) -> Result<Value> {
        RatesClient::fetch_rates(self, year).await
    }

    async fn search_rates(&self, year: Option<i64>, q: &str) -> Result<Value> {
        RatesClient::search_rates(self, year, q).await
    }
}

/// One-shot form of [`RatesClient::fetch_rates`] against `origin`.
pub async fn fetch_rates(origin: &str, year: Option<i64>) -> Result<Value> {
    RatesClient::new(origin)?.fetch_rates(year).await
}
