//! Mock backend for tests and offline development

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::models::FinancialSnapshot;

use super::AIBackend;

/// Deterministic backend that derives suggestions from the snapshot itself
#[derive(Clone, Default)]
pub struct MockBackend {
    /// Whether health_check should return true
    pub healthy: bool,
    /// Whether suggestion requests should fail
    pub failing: bool,
}

impl MockBackend {
    /// Healthy mock
    pub fn new() -> Self {
        Self {
            healthy: true,
            failing: false,
        }
    }

    pub fn unhealthy() -> Self {
        Self {
            healthy: false,
            failing: false,
        }
    }

    /// Mock whose suggestion calls return an error
    pub fn failing() -> Self {
        Self {
            healthy: true,
            failing: true,
        }
    }
}

#[async_trait]
impl AIBackend for MockBackend {
    async fn suggest_budget_actions(&self, snapshot: &FinancialSnapshot) -> Result<Vec<String>> {
        if self.failing {
            return Err(Error::InvalidData("Mock backend configured to fail".into()));
        }

        let spending = if snapshot.this_month_expense > snapshot.avg_monthly_expense {
            format!(
                "You have spent ${:.2} this month, above your ${:.2} monthly average; slow down on discretionary purchases.",
                snapshot.this_month_expense, snapshot.avg_monthly_expense
            )
        } else {
            format!(
                "You are at ${:.2} this month against a ${:.2} average; keep it up.",
                snapshot.this_month_expense, snapshot.avg_monthly_expense
            )
        };

        let category = match &snapshot.highest_category_this_month {
            Some(top) => format!(
                "Set a weekly cap for {}, your biggest category this month (${:.2}).",
                top.category, top.total
            ),
            None => "Track every purchase this month to see where your money goes.".to_string(),
        };

        let goal = match snapshot.upcoming_goals.first() {
            Some(goal) => format!(
                "Put aside ${:.2} for {} in the next {} days.",
                goal.remaining, goal.name, goal.days_left
            ),
            None => "Create a savings goal with a target date to stay motivated.".to_string(),
        };

        Ok(vec![spending, category, goal])
    }

    async fn health_check(&self) -> bool {
        self.healthy
    }

    fn model(&self) -> &str {
        "mock"
    }

    fn host(&self) -> &str {
        "mock://localhost"
    }
}
