//! Expense projection command

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use spendcast_core::db::Database;
use spendcast_core::forecast::{ExpenseForecast, ExpenseProjector};

use super::{resolve_user, today_or};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn cmd_predict(
    db: &Database,
    user: &str,
    today: Option<NaiveDate>,
    iqr_multiplier: f64,
    json: bool,
) -> Result<ExpenseForecast> {
    let user = resolve_user(db, user)?;
    let today = today_or(today);

    let records = db.list_expense_records(user.id)?;
    let forecast = ExpenseProjector::with_iqr_multiplier(iqr_multiplier)
        .forecast(&records, today)
        .context("Failed to project expenses")?;

    db.log_audit(
        &user.email,
        "predict",
        Some("expense"),
        None,
        Some(&format!("today={}, records={}, cli", today, records.len())),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&forecast)?);
        return Ok(forecast);
    }

    if forecast.is_empty() {
        println!("No expenses recorded yet, nothing to project.");
        return Ok(forecast);
    }

    println!();
    println!("📈 Expense Projection as of {}", today);
    println!("   (values after today are projected; * marks today)");

    println!();
    println!("   This week");
    println!("   ─────────────────────────────");
    for day in &forecast.this_week_expense {
        println!(
            "   {}{} {} │ ${:>10.2}",
            marker(day.date, today),
            day.date.format("%a"),
            day.date,
            day.accumulated_expense
        );
    }

    println!();
    println!("   This month");
    println!("   ─────────────────────────────");
    for day in &forecast.this_month_expense {
        println!(
            "   {}{} │ ${:>10.2}",
            marker(day.date, today),
            day.date,
            day.accumulated_expense
        );
    }

    println!();
    println!("   This year (accumulated at month end)");
    println!("   ─────────────────────────────");
    for month in &forecast.this_year_expense {
        let name = (month.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i))
            .copied()
            .unwrap_or("?");
        let current = if month.month == today.month() { "*" } else { " " };
        println!(
            "   {}{} │ ${:>10.2}",
            current, name, month.accumulated_expense
        );
    }

    Ok(forecast)
}

fn marker(date: NaiveDate, today: NaiveDate) -> &'static str {
    if date == today {
        "*"
    } else {
        " "
    }
}
