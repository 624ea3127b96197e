//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_user` - Map the --user flag to a stored user
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use spendcast_core::db::Database;
use spendcast_core::models::User;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Find or create the user named by --user
pub fn resolve_user(db: &Database, email: &str) -> Result<User> {
    db.ensure_user(email)
        .with_context(|| format!("Failed to resolve user '{}'", email))
}

/// The given date, or the local date
pub fn today_or(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool, user: &str) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let user = resolve_user(&db, user)?;
    println!("   User: {} (id {})", user.email, user.id);

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Import transactions: spendcast import --file expenses.csv");
    println!("  2. See the projection:  spendcast predict");
    println!("  3. Start web API:       spendcast serve");

    Ok(())
}
