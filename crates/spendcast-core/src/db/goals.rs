//! Savings goal operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{parse_date_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewSavingsGoal, SavingsGoal};

const GOAL_COLUMNS: &str =
    "id, user_id, name, target_amount, current_amount, target_date, created_at";

impl Database {
    pub fn insert_savings_goal(&self, user_id: i64, goal: &NewSavingsGoal) -> Result<i64> {
        goal.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO savings_goals (user_id, name, target_amount, current_amount, target_date)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                goal.name.trim(),
                goal.target_amount,
                goal.current_amount,
                goal.target_date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn get_savings_goal(&self, user_id: i64, id: i64) -> Result<Option<SavingsGoal>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM savings_goals WHERE id = ? AND user_id = ?",
            GOAL_COLUMNS
        );
        let goal = conn
            .query_row(&sql, params![id, user_id], Self::row_to_goal)
            .optional()?;
        Ok(goal)
    }

    /// List a user's savings goals, most recently created first
    pub fn list_savings_goals(&self, user_id: i64) -> Result<Vec<SavingsGoal>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM savings_goals WHERE user_id = ? ORDER BY created_at DESC, id DESC",
            GOAL_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let goals = stmt
            .query_map(params![user_id], Self::row_to_goal)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    pub fn update_savings_goal(&self, user_id: i64, id: i64, goal: &NewSavingsGoal) -> Result<bool> {
        goal.validate()?;
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE savings_goals
            SET name = ?, target_amount = ?, current_amount = ?, target_date = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                goal.name.trim(),
                goal.target_amount,
                goal.current_amount,
                goal.target_date.to_string(),
                id,
                user_id,
            ],
        )?;

        Ok(updated > 0)
    }

    pub fn delete_savings_goal(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM savings_goals WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// Goals whose target date falls within `[from, to]`, soonest first
    pub fn list_goals_due_between(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SavingsGoal>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {} FROM savings_goals
            WHERE user_id = ? AND target_date >= ? AND target_date <= ?
            ORDER BY target_date, id
            "#,
            GOAL_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let goals = stmt
            .query_map(
                params![user_id, from.to_string(), to.to_string()],
                Self::row_to_goal,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    fn row_to_goal(row: &rusqlite::Row) -> rusqlite::Result<SavingsGoal> {
        let target_date: String = row.get(5)?;
        let created_at: String = row.get(6)?;
        Ok(SavingsGoal {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            target_amount: row.get(3)?,
            current_amount: row.get(4)?,
            target_date: parse_date_column(5, &target_date)?,
            created_at: parse_datetime(&created_at),
        })
    }
}
