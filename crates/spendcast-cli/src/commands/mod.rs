//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database setup (init) and shared utilities (open_db, resolve_user)
//! - `forecast` - Expense projection
//! - `goals` - Savings goal commands (list, add, delete)
//! - `import` - CSV import
//! - `serve` - Web server command
//! - `suggest` - AI budgeting suggestions
//! - `transactions` - Transaction commands (list, add, delete)

pub mod core;
pub mod forecast;
pub mod goals;
pub mod import;
pub mod serve;
pub mod suggest;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use forecast::*;
pub use goals::*;
pub use import::*;
pub use serve::*;
pub use suggest::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
