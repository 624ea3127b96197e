//! Output tables of the expense projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Accumulated expense since the start of a window, for one day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyExpense {
    pub date: NaiveDate,
    pub accumulated_expense: f64,
}

/// Highest accumulated expense reached within a month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExpense {
    /// 1 = January
    pub month: u32,
    pub accumulated_expense: f64,
}

/// The three views served to clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseForecast {
    pub this_week_expense: Vec<DailyExpense>,
    pub this_month_expense: Vec<DailyExpense>,
    pub this_year_expense: Vec<MonthlyExpense>,
}

impl ExpenseForecast {
    /// Forecast for a user with no expense history
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.this_week_expense.is_empty()
            && self.this_month_expense.is_empty()
            && self.this_year_expense.is_empty()
    }
}
