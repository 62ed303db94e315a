//! Stock report service
//!
//! Serves the reporting backend's own stock report when it is available and
//! otherwise rebuilds it from the inventory snapshot and movement history.
//! Upstream failures never reach the caller: if either fallback fetch fails
//! both inputs are replaced by empty collections and the report comes back
//! empty. Figures too large to total also give an empty report.

use std::future::Future;

use serde::Serialize;
use shared::{build_stock_report, movements_in_range, validate_movement, validate_product};

use crate::error::AppResult;
use crate::external::BackofficeClient;
use crate::middleware::UpstreamAuth;
use crate::models::{DateRange, Product, StockMovement, StockReport};

/// Where a stock report's figures came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    /// Computed by the reporting service
    Server,
    /// Rebuilt locally from inventory and movement history
    Reconciled,
}

/// Stock report with its provenance
#[derive(Debug, Clone, Serialize)]
pub struct StockReportResponse {
    pub source: ReportSource,
    #[serde(flatten)]
    pub report: StockReport,
}

/// The upstream data a stock report is built from
pub trait StockDataSource: Send + Sync {
    fn stock_report(
        &self,
        auth: &UpstreamAuth,
        range: &DateRange,
    ) -> impl Future<Output = AppResult<StockReport>> + Send;

    fn products(&self, auth: &UpstreamAuth) -> impl Future<Output = AppResult<Vec<Product>>> + Send;

    fn movements(
        &self,
        auth: &UpstreamAuth,
        range: &DateRange,
    ) -> impl Future<Output = AppResult<Vec<StockMovement>>> + Send;
}

impl StockDataSource for BackofficeClient {
    async fn stock_report(&self, auth: &UpstreamAuth, range: &DateRange) -> AppResult<StockReport> {
        self.fetch_stock_report(auth, range).await
    }

    async fn products(&self, auth: &UpstreamAuth) -> AppResult<Vec<Product>> {
        self.fetch_products(auth).await
    }

    async fn movements(
        &self,
        auth: &UpstreamAuth,
        range: &DateRange,
    ) -> AppResult<Vec<StockMovement>> {
        self.fetch_movements(auth, range).await
    }
}

/// Stock report service
#[derive(Clone)]
pub struct StockReportService<S> {
    source: S,
}

impl<S: StockDataSource> StockReportService<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Get the stock report for a date range
    pub async fn get_stock_report(
        &self,
        auth: &UpstreamAuth,
        range: DateRange,
    ) -> StockReportResponse {
        match self.source.stock_report(auth, &range).await {
            Ok(report) => {
                tracing::debug!(lines = report.report.len(), "Using server stock report");
                return StockReportResponse {
                    source: ReportSource::Server,
                    report,
                };
            }
            Err(e) => {
                tracing::warn!(
                    from = %range.from,
                    to = %range.to,
                    error = %e,
                    "Stock report endpoint failed, reconciling locally"
                );
            }
        }

        let report = self.reconcile_locally(auth, &range).await;
        StockReportResponse {
            source: ReportSource::Reconciled,
            report,
        }
    }

    async fn reconcile_locally(&self, auth: &UpstreamAuth, range: &DateRange) -> StockReport {
        let (products, movements) =
            tokio::join!(self.source.products(auth), self.source.movements(auth, range));

        // Either failure empties both inputs
        let (products, movements) = match (products, movements) {
            (Ok(products), Ok(movements)) => (products, movements),
            (products, movements) => {
                if let Err(e) = &products {
                    tracing::warn!(error = %e, "Inventory fetch failed");
                }
                if let Err(e) = &movements {
                    tracing::warn!(error = %e, "Stock history fetch failed");
                }
                (Vec::new(), Vec::new())
            }
        };

        let products = accept_products(products);
        let movements = movements_in_range(accept_movements(movements), range);

        tracing::info!(
            products = products.len(),
            movements = movements.len(),
            "Reconciling stock report"
        );

        build_stock_report(&products, &movements).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stock reconciliation failed");
            StockReport::default()
        })
    }
}

/// Drop products that fail validation
fn accept_products(products: Vec<Product>) -> Vec<Product> {
    products
        .into_iter()
        .filter(|p| match validate_product(p) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(product_id = %p.id, reason, "Skipping invalid product");
                false
            }
        })
        .collect()
}

/// Drop movements that fail validation
fn accept_movements(movements: Vec<StockMovement>) -> Vec<StockMovement> {
    movements
        .into_iter()
        .filter(|m| match validate_movement(m) {
            Ok(()) => true,
            Err(reason) => {
                tracing::warn!(movement_id = ?m.id, reason, "Skipping invalid stock movement");
                false
            }
        })
        .collect()
}
