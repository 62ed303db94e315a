//! Common types used across the back office

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reporting window, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Whether the UTC calendar date of `at` falls inside the range
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        let day = at.date_naive();
        day >= self.from && day <= self.to
    }
}
