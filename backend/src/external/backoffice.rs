//! REST client for the back-office backend
//!
//! Covers the three endpoints the stock report depends on: the
//! server-computed report, the inventory snapshot and the stock-movement
//! history.

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;
use shared::{DateRange, Product, StockMovement, StockReport};

use crate::error::{AppError, AppResult};
use crate::middleware::UpstreamAuth;

/// Back-office REST API client
#[derive(Clone)]
pub struct BackofficeClient {
    client: Client,
    base_url: String,
}

/// The backend answers either with the bare payload or wrapped in `data`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Payload::Wrapped { data } => data,
            Payload::Bare(data) => data,
        }
    }
}

impl BackofficeClient {
    /// Create a new BackofficeClient
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Create a BackofficeClient around an existing reqwest client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the server-computed stock report for a date range
    pub async fn fetch_stock_report(
        &self,
        auth: &UpstreamAuth,
        range: &DateRange,
    ) -> AppResult<StockReport> {
        self.get_json(auth, "/reports/stock", &range_query(range))
            .await
    }

    /// Fetch the current inventory snapshot
    ///
    /// Rows that do not decode as a product are skipped.
    pub async fn fetch_products(&self, auth: &UpstreamAuth) -> AppResult<Vec<Product>> {
        let rows = self.get_json(auth, "/inventory/products", &[]).await?;
        Ok(decode_rows(rows, "product"))
    }

    /// Fetch the stock movements recorded in a date range
    ///
    /// Rows that do not decode as a movement are skipped.
    pub async fn fetch_movements(
        &self,
        auth: &UpstreamAuth,
        range: &DateRange,
    ) -> AppResult<Vec<StockMovement>> {
        let rows = self
            .get_json(auth, "/inventory/stock-history", &range_query(range))
            .await?;
        Ok(decode_rows(rows, "stock movement"))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        auth: &UpstreamAuth,
        path: &str,
        query: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = auth.bearer_token() {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GET {} failed: {}", path, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStatus {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Payload<T> = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse {} response: {}", path, e)))?;

        Ok(payload.into_inner())
    }
}

fn range_query(range: &DateRange) -> [(&'static str, String); 2] {
    [("from", range.from.to_string()), ("to", range.to.to_string())]
}

/// Decode each row on its own, dropping the ones that do not fit `T`
fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, kind: &str) -> Vec<T> {
    rows.into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed {}", kind);
                None
            }
        })
        .collect()
}
