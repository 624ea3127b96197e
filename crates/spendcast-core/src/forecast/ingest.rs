//! Ingestion: raw expense records to a daily amount series

use crate::error::{Error, Result};
use crate::models::ExpenseRecord;

use super::series::DailySeries;

/// Sum expenses per calendar date
///
/// Returns `Ok(None)` when there are no records. Negative or non-finite
/// amounts are rejected so that every running total stays non-decreasing,
/// as are histories whose daily or running totals overflow.
pub fn daily_totals(records: &[ExpenseRecord]) -> Result<Option<DailySeries>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut daily = DailySeries::new();
    for record in records {
        if !record.amount.is_finite() || record.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Expense on {} has invalid amount {}",
                record.date, record.amount
            )));
        }
        daily.add(record.date, record.amount);
    }

    if let Some(date) = daily.first_non_finite() {
        return Err(Error::InvalidData(format!(
            "Expenses on {} sum to a non-finite total",
            date
        )));
    }
    if let Some(date) = daily.cumulative_sum().first_non_finite() {
        return Err(Error::InvalidData(format!(
            "Accumulated expense overflows on {}",
            date
        )));
    }

    Ok(Some(daily))
}
