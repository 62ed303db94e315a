//! Stock report orchestration tests
//!
//! Tests for the fetch-then-reconcile sequence including:
//! - Server report preferred when available
//! - Local reconciliation when the reporting endpoint fails
//! - Empty report when fallback inputs cannot be fetched or cannot be totalled

use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use pos_backoffice::error::{AppError, AppResult};
use pos_backoffice::middleware::UpstreamAuth;
use pos_backoffice::models::{
    DateRange, MovementType, Product, QtyAmount, StockMovement, StockReport,
};
use pos_backoffice::services::{ReportSource, StockDataSource, StockReportService};
use rust_decimal::Decimal;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn june() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
    )
}

fn product(id: &str, current: &str, cost: &str, selling: &str) -> Product {
    Product {
        id: id.to_string(),
        barcode: None,
        name: format!("Item {}", id),
        category: Some("OTC".to_string()),
        cost_price: dec(cost),
        selling_price: dec(selling),
        current_quantity: dec(current),
    }
}

fn movement(product_id: &str, movement_type: MovementType, qty: &str, day: u32) -> StockMovement {
    StockMovement {
        id: Some(format!("m-{}-{}", product_id, day)),
        product_id: product_id.to_string(),
        movement_type,
        quantity: dec(qty),
        timestamp: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
        batch_number: None,
        reason: None,
        performed_by: None,
    }
}

fn unavailable() -> AppError {
    AppError::UpstreamStatus {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

/// Canned upstream; `None` makes the corresponding endpoint fail
#[derive(Default)]
struct FakeSource {
    report: Option<StockReport>,
    products: Option<Vec<Product>>,
    movements: Option<Vec<StockMovement>>,
    fallback_calls: Arc<AtomicUsize>,
}

impl StockDataSource for FakeSource {
    async fn stock_report(&self, _auth: &UpstreamAuth, _range: &DateRange) -> AppResult<StockReport> {
        self.report.clone().ok_or_else(unavailable)
    }

    async fn products(&self, _auth: &UpstreamAuth) -> AppResult<Vec<Product>> {
        self.fallback_calls.fetch_add(1, Ordering::SeqCst);
        self.products.clone().ok_or_else(unavailable)
    }

    async fn movements(
        &self,
        _auth: &UpstreamAuth,
        _range: &DateRange,
    ) -> AppResult<Vec<StockMovement>> {
        self.fallback_calls.fetch_add(1, Ordering::SeqCst);
        self.movements.clone().ok_or_else(unavailable)
    }
}

fn qa(qty: &str, amount: &str) -> QtyAmount {
    QtyAmount {
        qty: dec(qty),
        amount: dec(amount),
    }
}

#[tokio::test]
async fn test_server_report_is_used_when_available() {
    let server_report =
        shared::build_stock_report(&[product("S1", "4", "2", "3")], &[]).unwrap();
    let calls = Arc::new(AtomicUsize::new(0));
    let service = StockReportService::new(FakeSource {
        report: Some(server_report.clone()),
        products: Some(vec![product("OTHER", "100", "1", "1")]),
        movements: Some(Vec::new()),
        fallback_calls: calls.clone(),
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    assert_eq!(response.source, ReportSource::Server);
    assert_eq!(response.report, server_report);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fallback_reconciles_when_server_report_fails() {
    let source = FakeSource {
        report: None,
        products: Some(vec![
            product("P1", "50", "10", "15"),
            product("P2", "12", "5", "8"),
        ]),
        movements: Some(vec![
            movement("P1", MovementType::In, "30", 3),
            movement("P1", MovementType::Out, "20", 9),
        ]),
        ..Default::default()
    };
    let service = StockReportService::new(source);

    let response = service
        .get_stock_report(&UpstreamAuth::bearer("token"), june())
        .await;

    assert_eq!(response.source, ReportSource::Reconciled);
    let lines = &response.report.report;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_id, "P1");
    assert_eq!(lines[0].opening_stock, qa("40", "400"));
    assert_eq!(lines[0].balance, qa("70", "700"));
    assert_eq!(lines[0].consumption, qa("20", "300"));
    assert_eq!(lines[1].opening_stock, qa("12", "60"));
    assert_eq!(response.report.summary.closing_stock, qa("62", "560"));
}

#[tokio::test]
async fn test_fallback_fetches_both_inputs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let service = StockReportService::new(FakeSource {
        products: Some(Vec::new()),
        movements: Some(Vec::new()),
        fallback_calls: calls.clone(),
        ..Default::default()
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(response.report.is_empty());

    // A second pass replaces the first wholesale
    service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;
    assert_eq!(calls.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn test_empty_report_when_inventory_fetch_fails() {
    let service = StockReportService::new(FakeSource {
        products: None,
        movements: Some(vec![movement("P1", MovementType::In, "5", 2)]),
        ..Default::default()
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    assert_eq!(response.source, ReportSource::Reconciled);
    assert!(response.report.is_empty());
    assert_eq!(response.report.summary, Default::default());
}

#[tokio::test]
async fn test_empty_report_when_history_fetch_fails() {
    let service = StockReportService::new(FakeSource {
        products: Some(vec![product("P1", "50", "10", "15")]),
        movements: None,
        ..Default::default()
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    assert!(response.report.is_empty());
}

#[tokio::test]
async fn test_fallback_drops_invalid_records_and_out_of_range_movements() {
    let mut bad_price = product("BAD", "1", "1", "1");
    bad_price.cost_price = dec("-1");
    let mut orphan = movement("P1", MovementType::Out, "3", 4);
    orphan.product_id = String::new();
    let mut july = movement("P1", MovementType::Out, "7", 4);
    july.timestamp = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();

    let service = StockReportService::new(FakeSource {
        products: Some(vec![product("P1", "10", "2", "4"), bad_price]),
        movements: Some(vec![
            movement("P1", MovementType::In, "6", 30),
            orphan,
            july,
        ]),
        ..Default::default()
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    let lines = &response.report.report;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].purchases, qa("6", "12"));
    assert_eq!(lines[0].consumption, QtyAmount::ZERO);
    assert_eq!(lines[0].opening_stock, qa("4", "8"));
}

#[tokio::test]
async fn test_fallback_drops_oversized_products() {
    let service = StockReportService::new(FakeSource {
        products: Some(vec![
            product("BULK", "10000000000000000", "10000000000000", "1"),
            product("P1", "10", "2", "4"),
        ]),
        movements: Some(Vec::new()),
        ..Default::default()
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    let lines = &response.report.report;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].product_id, "P1");
}

#[tokio::test]
async fn test_empty_report_when_totals_overflow() {
    // Each record is within bounds; together they exceed the Decimal range
    let sale = movement("P1", MovementType::Out, "1000000000000", 12);
    let service = StockReportService::new(FakeSource {
        products: Some(vec![product(
            "P1",
            "1000000000000",
            "1000000000000",
            "1000000000000",
        )]),
        movements: Some(vec![sale; 80_000]),
        ..Default::default()
    });

    let response = service
        .get_stock_report(&UpstreamAuth::anonymous(), june())
        .await;

    assert_eq!(response.source, ReportSource::Reconciled);
    assert!(response.report.is_empty());
    assert_eq!(response.report.summary, Default::default());
}
