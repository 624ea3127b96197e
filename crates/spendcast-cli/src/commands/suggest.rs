//! AI budgeting suggestions command

use anyhow::Result;
use chrono::NaiveDate;
use spendcast_core::ai::{AIBackend, AIClient};
use spendcast_core::db::Database;
use spendcast_core::suggestions::generate_suggestions;

use super::{resolve_user, today_or};

pub async fn cmd_suggest(db: &Database, user: &str, today: Option<NaiveDate>) -> Result<()> {
    let ai = AIClient::from_env();
    match &ai {
        Some(client) => println!("🤖 Asking {} ({})...", client.host(), client.model()),
        None => {
            println!("💡 Tip: Set OLLAMA_HOST (or AI_BACKEND=mock) to enable suggestions");
            return Ok(());
        }
    }

    let suggestions = run_suggest(db, ai.as_ref(), user, today).await?;

    if suggestions.is_empty() {
        println!("No suggestions right now (the AI backend did not answer usefully).");
        return Ok(());
    }

    println!();
    println!("💡 Budget Suggestions");
    println!("   ─────────────────────────────");
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!("   {}. {}", i + 1, suggestion);
    }

    Ok(())
}

/// Generate suggestions for `user` with an explicit backend and record the access
pub async fn run_suggest(
    db: &Database,
    ai: Option<&AIClient>,
    user: &str,
    today: Option<NaiveDate>,
) -> Result<Vec<String>> {
    let user = resolve_user(db, user)?;
    let today = today_or(today);

    let suggestions = generate_suggestions(db, ai, user.id, today).await?;

    db.log_audit(
        &user.email,
        "suggest",
        Some("budget"),
        None,
        Some(&format!("returned={}, cli", suggestions.len())),
    )?;

    Ok(suggestions)
}
