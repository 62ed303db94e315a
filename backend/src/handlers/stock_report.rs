//! Stock report handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{validate_date_range, DateRange};

use crate::error::{AppError, AppResult};
use crate::middleware::UpstreamAuth;
use crate::services::StockReportResponse;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct StockReportQuery {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl StockReportQuery {
    /// Parse and check the requested window
    pub fn date_range(&self) -> AppResult<DateRange> {
        let from = parse_date("from", self.from.as_deref())?;
        let to = parse_date("to", self.to.as_deref())?;

        let range = DateRange::new(from, to);
        validate_date_range(&range).map_err(|msg| AppError::validation("from", msg))?;
        Ok(range)
    }
}

fn parse_date(field: &str, value: Option<&str>) -> AppResult<NaiveDate> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::validation(field, format!("{} date is required", field)))?;

    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::validation(field, format!("{} must be a date formatted YYYY-MM-DD", field))
    })
}

/// Get the stock report for a date range
pub async fn get_stock_report(
    State(state): State<AppState>,
    auth: UpstreamAuth,
    Query(query): Query<StockReportQuery>,
) -> AppResult<Json<StockReportResponse>> {
    let range = query.date_range()?;
    let response = state.stock_reports.get_stock_report(&auth, range).await;
    Ok(Json(response))
}
