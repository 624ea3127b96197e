//! Full-year cumulative table and its week/month/year views

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{Error, Result};

use super::outliers::SegregatedSeries;
use super::series::{days, DailySeries};
use super::types::{DailyExpense, MonthlyExpense};

/// Lifetime accumulated expense for every day of one calendar year
#[derive(Debug, Clone, PartialEq)]
pub struct YearTable {
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
    values: Vec<f64>,
}

impl YearTable {
    /// Assemble the table from inlier and outlier running totals plus predictions
    ///
    /// Predictions replace inlier values on shared dates. Gaps carry the last
    /// known value forward, seeded from earlier years, and days before any
    /// value are 0. The outlier total is added afterwards.
    pub fn assemble(
        segregated: &SegregatedSeries,
        predictions: &DailySeries,
        year: i32,
    ) -> Result<Self> {
        let (start, end) = year_bounds(year)?;

        let mut trend = segregated.inliers.clone();
        trend.overlay(predictions);

        let trend = trend
            .fill_forward(start, end)
            .fill_zero_before_first(start, end);
        let outliers = segregated
            .outliers
            .fill_forward(start, end)
            .fill_zero_before_first(start, end);

        let values = trend
            .values()
            .zip(outliers.values())
            .map(|(t, o)| t + o)
            .collect();

        Ok(Self {
            year,
            start,
            end,
            values,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value for a date of this year
    pub fn value(&self, date: NaiveDate) -> Option<f64> {
        if date < self.start || date > self.end {
            return None;
        }
        let idx = (date - self.start).num_days() as usize;
        self.values.get(idx).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        days(self.start, self.end).zip(self.values.iter().copied())
    }

    /// True when no day is lower than the day before
    pub fn is_monotonic(&self) -> bool {
        self.values.windows(2).all(|w| w[1] >= w[0])
    }

    /// Monday-to-Sunday week containing `today`, clipped to this year
    pub fn week_window(&self, today: NaiveDate) -> Vec<DailyExpense> {
        let monday = today - Days::new(u64::from(today.weekday().num_days_from_monday()));
        let sunday = monday + Days::new(6);
        self.window(monday, sunday)
    }

    /// Calendar month containing `today`
    pub fn month_window(&self, today: NaiveDate) -> Vec<DailyExpense> {
        let Some(first) = NaiveDate::from_ymd_opt(today.year(), today.month(), 1) else {
            return Vec::new();
        };
        let last = first
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.end);
        self.window(first, last)
    }

    /// Per month, the highest value reached in that month
    pub fn year_by_month(&self) -> Vec<MonthlyExpense> {
        let mut months: Vec<MonthlyExpense> = Vec::with_capacity(12);
        for (date, value) in self.iter() {
            match months.last_mut() {
                Some(current) if current.month == date.month() => {
                    current.accumulated_expense = current.accumulated_expense.max(value);
                }
                _ => months.push(MonthlyExpense {
                    month: date.month(),
                    accumulated_expense: value,
                }),
            }
        }
        months
    }

    /// Days of `[start, end]` inside this year, relative to the day before `start`
    fn window(&self, start: NaiveDate, end: NaiveDate) -> Vec<DailyExpense> {
        let baseline = start
            .pred_opt()
            .and_then(|prior| self.value(prior))
            .unwrap_or(0.0);

        days(start.max(self.start), end.min(self.end))
            .filter_map(|date| {
                self.value(date).map(|value| DailyExpense {
                    date,
                    accumulated_expense: value - baseline,
                })
            })
            .collect()
    }
}

fn year_bounds(year: i32) -> Result<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1);
    let end = NaiveDate::from_ymd_opt(year, 12, 31);
    match (start, end) {
        (Some(start), Some(end)) => Ok((start, end)),
        _ => Err(Error::InvalidData(format!("Year {} out of range", year))),
    }
}
