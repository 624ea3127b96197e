//! Savings goal command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendcast_core::db::Database;
use spendcast_core::models::NewSavingsGoal;

use super::resolve_user;

pub fn cmd_goals_list(db: &Database, user: &str) -> Result<()> {
    let user = resolve_user(db, user)?;
    let goals = db.list_savings_goals(user.id)?;

    if goals.is_empty() {
        println!("No savings goals yet. Create one with:");
        println!("  spendcast goals add --name \"New bike\" --target 500 --due 2026-12-01");
        return Ok(());
    }

    println!();
    println!("🎯 Savings Goals");
    println!("   ─────────────────────────────────────────────────────────────");

    for goal in goals {
        println!(
            "   [{}] {:<30} │ ${:>9.2} / ${:>9.2} ({:>3.0}%) │ due {}",
            goal.id,
            goal.name,
            goal.current_amount,
            goal.target_amount,
            goal.progress_percent(),
            goal.target_date
        );
    }

    Ok(())
}

pub fn cmd_goals_add(
    db: &Database,
    user: &str,
    name: &str,
    target: f64,
    current: f64,
    due: NaiveDate,
) -> Result<()> {
    let user = resolve_user(db, user)?;

    let goal = NewSavingsGoal {
        name: name.to_string(),
        target_amount: target,
        current_amount: current,
        target_date: due,
    };

    let id = db
        .insert_savings_goal(user.id, &goal)
        .context("Failed to create savings goal")?;
    db.log_audit(&user.email, "create", Some("savings_goal"), Some(id), Some("cli"))?;

    println!(
        "✅ Created goal #{} '{}': ${:.2} by {}",
        id, goal.name, goal.target_amount, goal.target_date
    );

    Ok(())
}

pub fn cmd_goals_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    let user = resolve_user(db, user)?;

    if !db.delete_savings_goal(user.id, id)? {
        anyhow::bail!("Savings goal {} not found", id);
    }
    db.log_audit(&user.email, "delete", Some("savings_goal"), Some(id), Some("cli"))?;

    println!("🗑️  Deleted savings goal {}", id);

    Ok(())
}
