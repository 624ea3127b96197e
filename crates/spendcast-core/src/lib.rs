//! Spendcast Core Library
//!
//! Shared functionality for the Spendcast expense tracker:
//! - Database access and migrations (transactions, savings goals, audit log)
//! - Accumulated expense projection with outlier handling
//! - Budget suggestions through a pluggable local AI backend
//! - Prompt library for customizable AI prompts
//! - CSV import of transactions

pub mod ai;
pub mod db;
pub mod error;
pub mod forecast;
pub mod import;
pub mod models;
pub mod prompts;
pub mod suggestions;

/// Test utilities including mock Ollama server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use ai::{AIBackend, AIClient, MockBackend, OllamaBackend, SuggestionList};
pub use db::{AuditEntry, Database};
pub use error::{Error, Result};
pub use forecast::{
    DailyExpense, ExpenseForecast, ExpenseProjector, MonthlyExpense, TrendFit, YearProjection,
    YearTable,
};
pub use models::*;
pub use prompts::{Prompt, PromptId, PromptLibrary};
pub use suggestions::generate_suggestions;
