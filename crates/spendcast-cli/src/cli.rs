//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Spendcast - Track expenses and see where the year is heading
#[derive(Parser)]
#[command(name = "spendcast")]
#[command(about = "Self-hosted expense tracker with year-end projections", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendcast.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set SPENDCAST_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// User whose data the command works on (email or identifier)
    #[arg(long, env = "SPENDCAST_USER", default_value = "local-dev", global = true)]
    pub user: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage transactions (list, add, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage savings goals (list, add, delete)
    Goals {
        #[command(subcommand)]
        action: Option<GoalsAction>,
    },

    /// Import transactions from CSV (columns: date,type,amount,category[,name])
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Project accumulated expenses for this week, month and year
    Predict {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Tukey fence multiplier used to separate one-off expenses
        #[arg(long, default_value = "1.5")]
        iqr_multiplier: f64,

        /// Print the raw JSON response instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Ask the AI backend for budgeting suggestions
    Suggest {
        /// Reference date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires the x-spendcast-user header from an
        /// auth proxy or an API key from SPENDCAST_API_KEYS.
        #[arg(long)]
        no_auth: bool,

        /// Tukey fence multiplier used by /api/expense-predictions
        #[arg(long, default_value = "1.5")]
        iqr_multiplier: f64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,

        /// Only show this type (income or expense)
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,
    },

    /// Record a transaction
    Add {
        /// Amount (non-negative; the type carries the direction)
        #[arg(short, long)]
        amount: f64,

        /// Category (e.g. Groceries, Rent)
        #[arg(short, long)]
        category: String,

        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<NaiveDate>,

        /// Optional description
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum GoalsAction {
    /// List savings goals
    List,

    /// Create a savings goal
    Add {
        /// Goal name (at most 30 characters)
        #[arg(short, long)]
        name: String,

        /// Amount to save
        #[arg(short, long)]
        target: f64,

        /// Amount already saved
        #[arg(short, long, default_value = "0")]
        current: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(short, long)]
        due: NaiveDate,
    },

    /// Delete a savings goal
    Delete {
        /// Goal ID
        id: i64,
    },
}
