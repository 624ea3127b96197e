//! Accumulated expense projection
//!
//! Turns a user's expense history into accumulated-spend views for the
//! current week, month and year:
//! - `ingest` - sum amounts per day
//! - `outliers` - split days by IQR fences and accumulate each part
//! - `trend` - fit the inlier running total and extrapolate to Dec 31
//! - `calendar` - assemble the full-year table and cut windows from it
//!
//! Everything here is synchronous and recomputed per call.

mod calendar;
mod ingest;
mod outliers;
mod series;
mod trend;
mod types;

pub use calendar::YearTable;
pub use ingest::daily_totals;
pub use outliers::{quantile, segregate, IqrBounds, SegregatedSeries, DEFAULT_IQR_MULTIPLIER};
pub use series::{days, DailySeries};
pub use trend::{project, TrendFit};
pub use types::{DailyExpense, ExpenseForecast, MonthlyExpense};

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::ExpenseRecord;

/// Everything computed for one projection request
#[derive(Debug, Clone)]
pub struct YearProjection {
    pub bounds: IqrBounds,
    pub fit: TrendFit,
    /// Number of days classified as inliers / outliers
    pub inlier_days: usize,
    pub outlier_days: usize,
    pub predictions: DailySeries,
    pub table: YearTable,
}

/// Projects accumulated expenses for the calendar year containing `today`
pub struct ExpenseProjector {
    /// Tukey fence multiplier (default 1.5)
    iqr_multiplier: f64,
}

impl ExpenseProjector {
    pub fn new() -> Self {
        Self {
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
        }
    }

    pub fn with_iqr_multiplier(multiplier: f64) -> Self {
        Self {
            iqr_multiplier: multiplier,
        }
    }

    pub fn iqr_multiplier(&self) -> f64 {
        self.iqr_multiplier
    }

    /// Run the full pipeline. Returns `Ok(None)` when there are no records.
    pub fn project(
        &self,
        records: &[ExpenseRecord],
        today: NaiveDate,
    ) -> Result<Option<YearProjection>> {
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(Error::InvalidData(format!(
                "IQR multiplier must be a non-negative number (got {})",
                self.iqr_multiplier
            )));
        }

        let Some(daily) = daily_totals(records)? else {
            debug!("No expense records, nothing to project");
            return Ok(None);
        };

        let Some(segregated) = segregate(&daily, self.iqr_multiplier) else {
            return Ok(None);
        };
        debug!(
            days = daily.len(),
            inliers = segregated.inliers.len(),
            outliers = segregated.outliers.len(),
            q1 = segregated.bounds.q1,
            q3 = segregated.bounds.q3,
            "Segregated daily expenses"
        );

        let (fit, predictions) = project(&segregated.inliers, today);
        debug!(
            slope = fit.slope,
            intercept = fit.intercept,
            fallback = fit.fallback,
            horizon = predictions.len(),
            "Fitted expense trend"
        );

        let table = YearTable::assemble(&segregated, &predictions, today.year())?;
        if !fit.slope.is_finite()
            || !fit.intercept.is_finite()
            || table.iter().any(|(_, value)| !value.is_finite())
        {
            return Err(Error::InvalidData(
                "Expense history is too large to project".to_string(),
            ));
        }

        Ok(Some(YearProjection {
            bounds: segregated.bounds,
            fit,
            inlier_days: segregated.inliers.len(),
            outlier_days: segregated.outliers.len(),
            predictions,
            table,
        }))
    }

    /// Week, month and year views for `today`; empty lists when there is no history
    pub fn forecast(&self, records: &[ExpenseRecord], today: NaiveDate) -> Result<ExpenseForecast> {
        let Some(projection) = self.project(records, today)? else {
            return Ok(ExpenseForecast::empty());
        };

        let table = &projection.table;
        Ok(ExpenseForecast {
            this_week_expense: table.week_window(today),
            this_month_expense: table.month_window(today),
            this_year_expense: table.year_by_month(),
        })
    }
}

impl Default for ExpenseProjector {
    fn default() -> Self {
        Self::new()
    }
}
