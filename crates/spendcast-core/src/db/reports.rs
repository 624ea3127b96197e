//! Spending statistics used by budget suggestions

use chrono::{Datelike, Months, NaiveDate};
use rusqlite::{params, OptionalExtension};

use super::{Database, DbConn};
use crate::error::{Error, Result};
use crate::models::{CategoryTotal, FinancialSnapshot, UpcomingGoal};

impl Database {
    /// Summarize a user's spending as of `today`
    ///
    /// - average monthly expense over months before the current one that have expenses
    /// - this month's expense total, future-dated entries included
    /// - top category of last month and of this month so far
    /// - goals due between `today` and one month later
    pub fn get_financial_snapshot(&self, user_id: i64, today: NaiveDate) -> Result<FinancialSnapshot> {
        let month_start = first_of_month(today)?;
        let last_month_start = month_start
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| Error::InvalidData(format!("No month before {}", month_start)))?;
        let last_month_end = month_start
            .pred_opt()
            .ok_or_else(|| Error::InvalidData(format!("No day before {}", month_start)))?;
        let month_end = month_start
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(|| Error::InvalidData(format!("No month end after {}", month_start)))?;
        let goal_horizon = today
            .checked_add_months(Months::new(1))
            .ok_or_else(|| Error::InvalidData(format!("No month after {}", today)))?;

        let conn = self.conn()?;

        let avg_monthly_expense: f64 = conn.query_row(
            r#"
            SELECT COALESCE(AVG(total), 0) FROM (
                SELECT SUM(amount) AS total
                FROM transactions
                WHERE user_id = ? AND type = 'expense' AND date < ?
                GROUP BY substr(date, 1, 7)
            )
            "#,
            params![user_id, month_start.to_string()],
            |row| row.get(0),
        )?;

        let this_month_expense: f64 = conn.query_row(
            r#"
            SELECT COALESCE(SUM(amount), 0)
            FROM transactions
            WHERE user_id = ? AND type = 'expense' AND date BETWEEN ? AND ?
            "#,
            params![user_id, month_start.to_string(), month_end.to_string()],
            |row| row.get(0),
        )?;

        let highest_category_last_month =
            top_category(&conn, user_id, last_month_start, last_month_end)?;
        let highest_category_this_month = top_category(&conn, user_id, month_start, today)?;
        drop(conn);

        let upcoming_goals = self
            .list_goals_due_between(user_id, today, goal_horizon)?
            .into_iter()
            .map(|goal| UpcomingGoal {
                remaining: goal.remaining(),
                days_left: (goal.target_date - today).num_days(),
                name: goal.name,
                current_amount: goal.current_amount,
                target_amount: goal.target_amount,
                target_date: goal.target_date,
            })
            .collect();

        Ok(FinancialSnapshot {
            as_of: today,
            avg_monthly_expense,
            this_month_expense,
            highest_category_last_month,
            highest_category_this_month,
            upcoming_goals,
        })
    }
}

fn first_of_month(date: NaiveDate) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .ok_or_else(|| Error::InvalidData(format!("Invalid month for {}", date)))
}

/// Category with the highest expense total in `[from, to]`; ties go to the alphabetically first
fn top_category(
    conn: &DbConn,
    user_id: i64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Option<CategoryTotal>> {
    let top = conn
        .query_row(
            r#"
            SELECT category, SUM(amount) AS total
            FROM transactions
            WHERE user_id = ? AND type = 'expense' AND date BETWEEN ? AND ?
            GROUP BY category
            ORDER BY total DESC, category ASC
            LIMIT 1
            "#,
            params![user_id, from.to_string(), to.to_string()],
            |row| {
                Ok(CategoryTotal {
                    category: row.get(0)?,
                    total: row.get(1)?,
                })
            },
        )
        .optional()?;
    Ok(top)
}
