//! Linear trend on cumulative spend and its extrapolation to year end

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::series::{days, DailySeries};

/// Ordinary least squares fit of cumulative value against series position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendFit {
    pub slope: f64,
    pub intercept: f64,
    /// Number of points the fit was computed from
    pub points: usize,
    /// True when there were too few points and a flat line was used
    pub fallback: bool,
}

impl TrendFit {
    /// Fit `value = intercept + slope * position` over positions `0..n`
    ///
    /// With fewer than two points the fit is flat at the last value (0 when empty).
    pub fn fit(values: &[f64]) -> Self {
        let n = values.len();
        if n < 2 {
            return Self {
                slope: 0.0,
                intercept: values.last().copied().unwrap_or(0.0),
                points: n,
                fallback: true,
            };
        }

        let count = n as f64;
        let mean_x = (count - 1.0) / 2.0;
        let mean_y = values.iter().sum::<f64>() / count;

        let (sxy, sxx) = values
            .iter()
            .enumerate()
            .fold((0.0, 0.0), |(sxy, sxx), (x, &y)| {
                let dx = x as f64 - mean_x;
                (sxy + dx * (y - mean_y), sxx + dx * dx)
            });

        let slope = sxy / sxx;
        Self {
            slope,
            intercept: mean_y - slope * mean_x,
            points: n,
            fallback: false,
        }
    }

    pub fn predict(&self, position: f64) -> f64 {
        self.intercept + self.slope * position
    }
}

/// Fit the inlier running total and extrapolate it from tomorrow through Dec 31
///
/// Raw predictions continue the regression at positions `n..`, then are
/// shifted so that tomorrow's value equals the last actual total plus one
/// slope step. No predictions are produced when `today` is the last day of
/// its year.
pub fn project(inliers: &DailySeries, today: NaiveDate) -> (TrendFit, DailySeries) {
    let values: Vec<f64> = inliers.values().collect();
    let fit = TrendFit::fit(&values);
    let last_actual = values.last().copied().unwrap_or(0.0);

    let mut predictions = DailySeries::new();
    let (Some(tomorrow), Some(year_end)) = (
        today.checked_add_days(Days::new(1)),
        NaiveDate::from_ymd_opt(today.year(), 12, 31),
    ) else {
        return (fit, predictions);
    };

    let start = values.len() as f64;
    let adjustment = fit.predict(start) - fit.slope - last_actual;

    for (offset, date) in days(tomorrow, year_end).enumerate() {
        let raw = fit.predict(start + offset as f64);
        predictions.insert(date, raw - adjustment);
    }

    (fit, predictions)
}
