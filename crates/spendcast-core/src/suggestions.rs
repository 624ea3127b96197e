//! Budget suggestions from summarized spending statistics

use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::ai::{AIBackend, AIClient};
use crate::db::Database;
use crate::error::Result;
use crate::models::FinancialSnapshot;

/// Template variables for the `budget_suggestions` prompt
///
/// Optional facts are left out so the template can drop their lines.
pub fn prompt_vars(snapshot: &FinancialSnapshot) -> HashMap<&'static str, String> {
    let mut vars = HashMap::new();
    vars.insert("today", snapshot.as_of.to_string());
    vars.insert(
        "avg_monthly_expense",
        format!("{:.2}", snapshot.avg_monthly_expense),
    );
    vars.insert(
        "this_month_expense",
        format!("{:.2}", snapshot.this_month_expense),
    );

    if let Some(top) = &snapshot.highest_category_last_month {
        vars.insert("last_month_category", top.category.clone());
        vars.insert("last_month_total", format!("{:.2}", top.total));
    }
    if let Some(top) = &snapshot.highest_category_this_month {
        vars.insert("this_month_category", top.category.clone());
        vars.insert("this_month_total", format!("{:.2}", top.total));
    }

    let goals = goal_lines(snapshot);
    if !goals.is_empty() {
        vars.insert("goals", goals);
    }

    vars
}

/// One bullet per upcoming goal: name, days left and amount still missing
pub fn goal_lines(snapshot: &FinancialSnapshot) -> String {
    snapshot
        .upcoming_goals
        .iter()
        .map(|g| {
            format!(
                "- {}: {} days left to save ${:.2}",
                g.name, g.days_left, g.remaining
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Suggestions for a user as of `today`
///
/// Storage errors are returned. A missing or failing AI backend yields an
/// empty list.
pub async fn generate_suggestions(
    db: &Database,
    ai: Option<&AIClient>,
    user_id: i64,
    today: NaiveDate,
) -> Result<Vec<String>> {
    let Some(ai) = ai else {
        debug!("No AI backend configured, skipping suggestions");
        return Ok(Vec::new());
    };

    let snapshot = db.get_financial_snapshot(user_id, today)?;

    match ai.suggest_budget_actions(&snapshot).await {
        Ok(suggestions) => Ok(suggestions),
        Err(e) => {
            warn!(
                model = ai.model(),
                host = ai.host(),
                "Budget suggestion request failed: {}",
                e
            );
            Ok(Vec::new())
        }
    }
}
