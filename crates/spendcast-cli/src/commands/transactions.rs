//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::NaiveDate;
use spendcast_core::db::Database;
use spendcast_core::models::{NewTransaction, TransactionType};

use super::{resolve_user, today_or, truncate};

fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>().map_err(|e| anyhow::anyhow!(e))
}

pub fn cmd_transactions_list(
    db: &Database,
    user: &str,
    limit: i64,
    transaction_type: Option<&str>,
) -> Result<()> {
    let user = resolve_user(db, user)?;
    let filter = transaction_type.map(parse_type).transpose()?;
    let transactions = db.list_transactions(user.id, filter, limit, 0)?;

    if transactions.is_empty() {
        println!("No transactions found. Add some with:");
        println!("  spendcast transactions add --amount 12.50 --category Groceries");
        println!("  spendcast import --file expenses.csv");
        return Ok(());
    }

    let total = db.count_transactions(user.id, filter)?;

    println!();
    println!("📝 Recent Transactions ({} of {})", transactions.len(), total);
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.transaction_type {
            TransactionType::Expense => format!("\x1b[31m-${:.2}\x1b[0m", tx.amount), // Red
            TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount), // Green
        };

        println!(
            "   [{}] {} │ {:>12} │ {:<15} │ {}",
            tx.id,
            tx.date,
            amount_str,
            truncate(&tx.category, 15),
            truncate(tx.name.as_deref().unwrap_or(""), 30)
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    user: &str,
    amount: f64,
    category: &str,
    transaction_type: &str,
    date: Option<NaiveDate>,
    name: Option<String>,
) -> Result<()> {
    let user = resolve_user(db, user)?;

    let tx = NewTransaction {
        name,
        transaction_type: parse_type(transaction_type)?,
        amount,
        category: category.to_string(),
        date: today_or(date),
    };

    let id = db
        .insert_transaction(user.id, &tx)
        .context("Failed to record transaction")?;
    db.log_audit(&user.email, "create", Some("transaction"), Some(id), Some("cli"))?;

    println!(
        "✅ Recorded {} #{}: ${:.2} in {} on {}",
        tx.transaction_type, id, tx.amount, tx.category, tx.date
    );

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, user: &str, id: i64) -> Result<()> {
    let user = resolve_user(db, user)?;

    let tx = db
        .get_transaction(user.id, id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(user.id, id)?;
    db.log_audit(&user.email, "delete", Some("transaction"), Some(id), Some("cli"))?;

    println!("🗑️  Deleted transaction {}:", id);
    println!(
        "   {} │ ${:.2} │ {}",
        tx.date, tx.amount, tx.category
    );

    Ok(())
}
