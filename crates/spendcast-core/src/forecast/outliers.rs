//! IQR-based split of daily amounts into inliers and outliers

use serde::{Deserialize, Serialize};

use super::series::DailySeries;

/// Default Tukey fence multiplier
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Quantile of an ascending slice by linear interpolation between closest ranks
///
/// Uses position `p * (n - 1)`. Returns `None` for an empty slice.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

/// Interquartile fences for a set of daily amounts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let q1 = quantile(&sorted, 0.25)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;

        Some(Self {
            q1,
            q3,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Inclusive on both fences
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Result of splitting a daily series
///
/// Both series are running totals computed over their own members only.
#[derive(Debug, Clone, PartialEq)]
pub struct SegregatedSeries {
    pub inliers: DailySeries,
    pub outliers: DailySeries,
    pub bounds: IqrBounds,
}

/// Split daily amounts by the IQR fences, then accumulate each part separately
pub fn segregate(daily: &DailySeries, multiplier: f64) -> Option<SegregatedSeries> {
    let amounts: Vec<f64> = daily.values().collect();
    let bounds = IqrBounds::from_values(&amounts, multiplier)?;

    let mut inliers = DailySeries::new();
    let mut outliers = DailySeries::new();
    for (date, amount) in daily.iter() {
        if bounds.contains(amount) {
            inliers.insert(date, amount);
        } else {
            outliers.insert(date, amount);
        }
    }

    Some(SegregatedSeries {
        inliers: inliers.cumulative_sum(),
        outliers: outliers.cumulative_sum(),
        bounds,
    })
}
