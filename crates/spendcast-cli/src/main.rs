//! Spendcast CLI - Expense tracker with year-end projections
//!
//! Usage:
//!   spendcast init                   Initialize database
//!   spendcast import --file CSV      Import transactions
//!   spendcast predict                Project this week, month and year
//!   spendcast serve --port 3000      Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt, &cli.user),
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, &cli.user, 20, None),
                Some(TransactionsAction::List {
                    limit,
                    transaction_type,
                }) => commands::cmd_transactions_list(
                    &db,
                    &cli.user,
                    limit,
                    transaction_type.as_deref(),
                ),
                Some(TransactionsAction::Add {
                    amount,
                    category,
                    transaction_type,
                    date,
                    name,
                }) => commands::cmd_transactions_add(
                    &db,
                    &cli.user,
                    amount,
                    &category,
                    &transaction_type,
                    date,
                    name,
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, &cli.user, id)
                }
            }
        }
        Commands::Goals { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(GoalsAction::List) => commands::cmd_goals_list(&db, &cli.user),
                Some(GoalsAction::Add {
                    name,
                    target,
                    current,
                    due,
                }) => commands::cmd_goals_add(&db, &cli.user, &name, target, current, due),
                Some(GoalsAction::Delete { id }) => commands::cmd_goals_delete(&db, &cli.user, id),
            }
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_import(&db, &cli.user, &file).map(|_| ())
        }
        Commands::Predict {
            today,
            iqr_multiplier,
            json,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_predict(&db, &cli.user, today, iqr_multiplier, json).map(|_| ())
        }
        Commands::Suggest { today } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_suggest(&db, &cli.user, today).await
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            iqr_multiplier,
        } => {
            commands::cmd_serve(
                &cli.db,
                &host,
                port,
                no_auth,
                cli.no_encrypt,
                iqr_multiplier,
            )
            .await
        }
    }
}
