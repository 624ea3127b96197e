//! Domain models for Spendcast

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Maximum length of a savings goal name
pub const MAX_GOAL_NAME_LEN: usize = 30;

/// Maximum length of a transaction category
pub const MAX_CATEGORY_LEN: usize = 50;

/// A user known to the store
///
/// Identity only: credentials and sessions are handled upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A stored transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Always non-negative; the direction is carried by `transaction_type`
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// A transaction to be inserted or used as a full update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl NewTransaction {
    /// Reject amounts and categories that the store would otherwise accept silently
    pub fn validate(&self) -> Result<()> {
        validate_amount("amount", self.amount)?;

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::InvalidData("Category is required".into()));
        }
        if category.chars().count() > MAX_CATEGORY_LEN {
            return Err(Error::InvalidData(format!(
                "Category must be at most {} characters",
                MAX_CATEGORY_LEN
            )));
        }

        Ok(())
    }
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub target_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SavingsGoal {
    /// Amount still missing to reach the target (never negative)
    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.current_amount).max(0.0)
    }

    /// Progress towards the target in percent, capped at 100
    pub fn progress_percent(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 100.0;
        }
        (self.current_amount / self.target_amount * 100.0).min(100.0)
    }
}

/// A savings goal to be inserted or used as a full update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSavingsGoal {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    pub target_date: NaiveDate,
}

impl NewSavingsGoal {
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Goal name is required".into()));
        }
        if name.chars().count() > MAX_GOAL_NAME_LEN {
            return Err(Error::InvalidData(format!(
                "Goal name must be at most {} characters",
                MAX_GOAL_NAME_LEN
            )));
        }
        validate_amount("target_amount", self.target_amount)?;
        validate_amount("current_amount", self.current_amount)?;
        Ok(())
    }
}

/// One expense as seen by the projection pipeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: NaiveDate,
    pub amount: f64,
}

impl ExpenseRecord {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }
}

/// Total spent in one category over a period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// A savings goal whose deadline is close
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpcomingGoal {
    pub name: String,
    pub current_amount: f64,
    pub target_amount: f64,
    pub target_date: NaiveDate,
    pub remaining: f64,
    pub days_left: i64,
}

/// Summarized spending statistics handed to the suggestion generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Date the statistics were computed for
    pub as_of: NaiveDate,
    /// Average of monthly expense totals for months before the current one
    pub avg_monthly_expense: f64,
    /// Expenses so far in the current month
    pub this_month_expense: f64,
    pub highest_category_last_month: Option<CategoryTotal>,
    pub highest_category_this_month: Option<CategoryTotal>,
    /// Goals due within one month of `as_of`
    pub upcoming_goals: Vec<UpcomingGoal>,
}

fn validate_amount(field: &str, amount: f64) -> Result<()> {
    if !amount.is_finite() {
        return Err(Error::InvalidData(format!("{} must be a number", field)));
    }
    if amount < 0.0 {
        return Err(Error::InvalidData(format!(
            "{} must not be negative (got {})",
            field, amount
        )));
    }
    Ok(())
}
