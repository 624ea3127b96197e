//! Date-keyed series primitives

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

/// Ordered `date -> value` series with unique, chronological keys
///
/// Keys need not be contiguous. Depending on the stage the values are
/// per-day amounts or running totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailySeries {
    values: BTreeMap<NaiveDate, f64>,
}

impl DailySeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a date, replacing any existing one
    pub fn insert(&mut self, date: NaiveDate, value: f64) {
        self.values.insert(date, value);
    }

    /// Add to the value for a date, starting from 0
    pub fn add(&mut self, date: NaiveDate, value: f64) {
        *self.values.entry(date).or_insert(0.0) += value;
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.values.get(&date).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.values.first_key_value().map(|(d, v)| (*d, *v))
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.values.last_key_value().map(|(d, v)| (*d, *v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.values.iter().map(|(d, v)| (*d, *v))
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().copied()
    }

    /// First date whose value is NaN or infinite
    pub fn first_non_finite(&self) -> Option<NaiveDate> {
        self.iter().find(|(_, v)| !v.is_finite()).map(|(d, _)| d)
    }

    /// Running total over the series, in date order
    pub fn cumulative_sum(&self) -> DailySeries {
        let mut total = 0.0;
        self.iter()
            .map(|(date, value)| {
                total += value;
                (date, total)
            })
            .collect()
    }

    /// Copy every entry of `other` into this series; `other` wins on shared dates
    pub fn overlay(&mut self, other: &DailySeries) {
        for (date, value) in other.iter() {
            self.values.insert(date, value);
        }
    }

    /// Dense series over `[from, to]` carrying the last known value forward
    ///
    /// Values before `from` seed the fill. Days earlier than the first known
    /// value stay unset.
    pub fn fill_forward(&self, from: NaiveDate, to: NaiveDate) -> DailySeries {
        let mut filled = DailySeries::new();
        let mut current = self
            .values
            .range(..from)
            .next_back()
            .map(|(_, v)| *v);
        let mut known = self.values.range(from..=to).peekable();

        for date in days(from, to) {
            if let Some((_, v)) = known.next_if(|(d, _)| **d == date) {
                current = Some(*v);
            }
            if let Some(v) = current {
                filled.insert(date, v);
            }
        }

        filled
    }

    /// Set every unset day in `[from, to]` that precedes the first known value to 0
    pub fn fill_zero_before_first(&self, from: NaiveDate, to: NaiveDate) -> DailySeries {
        let mut filled = self.clone();
        let first = self.first().map(|(d, _)| d);

        for date in days(from, to) {
            if first.map_or(true, |f| date < f) {
                filled.insert(date, 0.0);
            }
        }

        filled
    }
}

impl FromIterator<(NaiveDate, f64)> for DailySeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Every date in `[from, to]`, empty when `from > to`
pub fn days(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    let mut next = (from <= to).then_some(from);
    std::iter::from_fn(move || {
        let current = next?;
        next = current
            .checked_add_days(Days::new(1))
            .filter(|d| *d <= to);
        Some(current)
    })
}
