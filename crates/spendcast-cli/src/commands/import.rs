//! CSV import command

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use spendcast_core::db::Database;
use spendcast_core::import::parse_csv;
use tracing::info;

use super::resolve_user;

/// Import every row of `file`; a bad row aborts before anything is stored
pub fn cmd_import(db: &Database, user: &str, file: &Path) -> Result<usize> {
    println!("📥 Importing transactions from {}...", file.display());

    let user = resolve_user(db, user)?;
    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let transactions = parse_csv(reader).context("Failed to parse CSV")?;

    for tx in &transactions {
        db.insert_transaction(user.id, tx)?;
    }
    info!(count = transactions.len(), user = %user.email, "Imported transactions");

    db.log_audit(
        &user.email,
        "import",
        Some("transaction"),
        None,
        Some(&format!(
            "file={}, imported={}",
            file.display(),
            transactions.len()
        )),
    )?;

    println!("✅ Imported {} transactions", transactions.len());

    Ok(transactions.len())
}
