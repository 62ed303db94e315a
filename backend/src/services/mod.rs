//! Business logic services for the POS Back Office

pub mod stock_report;

pub use stock_report::{ReportSource, StockDataSource, StockReportResponse, StockReportService};
