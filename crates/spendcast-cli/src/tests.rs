//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::io::Write;

use chrono::NaiveDate;
use spendcast_core::ai::{AIClient, MockBackend};
use spendcast_core::db::Database;
use spendcast_core::models::TransactionType;
use tempfile::NamedTempFile;

use crate::commands::{self, truncate};

const USER: &str = "ana@example.com";

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ========== Core ==========

#[test]
fn test_cmd_init_unencrypted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spendcast.db");

    let result = commands::cmd_init(&path, true, USER);
    assert!(result.is_ok());
    assert!(path.exists());

    let db = commands::open_db(&path, true).unwrap();
    assert!(db.get_user_by_email(USER).unwrap().is_some());
}

#[test]
fn test_resolve_user_is_stable() {
    let db = setup_test_db();
    let first = commands::resolve_user(&db, USER).unwrap();
    let second = commands::resolve_user(&db, USER).unwrap();
    assert_eq!(first.id, second.id);
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a longer description", 10), "a longe...");
    assert_eq!(truncate("café au lait", 7), "café...");
}

// ========== Transactions ==========

#[test]
fn test_cmd_transactions_add_and_list() {
    let db = setup_test_db();

    commands::cmd_transactions_add(
        &db,
        USER,
        12.5,
        "Groceries",
        "expense",
        Some(d(2026, 10, 19)),
        Some("Market".to_string()),
    )
    .unwrap();
    commands::cmd_transactions_add(&db, USER, 3000.0, "Salary", "INCOME", Some(d(2026, 10, 1)), None)
        .unwrap();

    let user = db.get_user_by_email(USER).unwrap().unwrap();
    let txs = db.list_transactions(user.id, None, 10, 0).unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].category, "Groceries");
    assert_eq!(txs[1].transaction_type, TransactionType::Income);

    assert!(commands::cmd_transactions_list(&db, USER, 20, None).is_ok());
    assert!(commands::cmd_transactions_list(&db, USER, 20, Some("expense")).is_ok());
}

#[test]
fn test_cmd_transactions_add_rejects_bad_input() {
    let db = setup_test_db();

    let result =
        commands::cmd_transactions_add(&db, USER, -1.0, "Food", "expense", Some(d(2026, 1, 1)), None);
    assert!(result.is_err());

    let result =
        commands::cmd_transactions_add(&db, USER, 1.0, "Food", "transfer", Some(d(2026, 1, 1)), None);
    assert!(result.is_err());

    assert!(commands::cmd_transactions_list(&db, USER, 20, Some("bogus")).is_err());
}

#[test]
fn test_cmd_transactions_list_empty() {
    let db = setup_test_db();
    assert!(commands::cmd_transactions_list(&db, USER, 20, None).is_ok());
}

#[test]
fn test_cmd_transactions_delete() {
    let db = setup_test_db();
    commands::cmd_transactions_add(&db, USER, 5.0, "Food", "expense", Some(d(2026, 1, 1)), None)
        .unwrap();
    let user = db.get_user_by_email(USER).unwrap().unwrap();
    let id = db.list_transactions(user.id, None, 1, 0).unwrap()[0].id;

    // Another user cannot delete it
    assert!(commands::cmd_transactions_delete(&db, "bo@example.com", id).is_err());

    commands::cmd_transactions_delete(&db, USER, id).unwrap();
    assert!(db.get_transaction(user.id, id).unwrap().is_none());
    assert!(commands::cmd_transactions_delete(&db, USER, id).is_err());
}

// ========== Goals ==========

#[test]
fn test_cmd_goals_add_list_delete() {
    let db = setup_test_db();

    commands::cmd_goals_add(&db, USER, "New bike", 500.0, 120.0, d(2026, 12, 1)).unwrap();
    assert!(commands::cmd_goals_list(&db, USER).is_ok());

    let user = db.get_user_by_email(USER).unwrap().unwrap();
    let goals = db.list_savings_goals(user.id).unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0].name, "New bike");

    commands::cmd_goals_delete(&db, USER, goals[0].id).unwrap();
    assert!(db.list_savings_goals(user.id).unwrap().is_empty());
    assert!(commands::cmd_goals_delete(&db, USER, goals[0].id).is_err());
}

#[test]
fn test_cmd_goals_add_name_too_long() {
    let db = setup_test_db();
    let name = "x".repeat(31);
    assert!(commands::cmd_goals_add(&db, USER, &name, 500.0, 0.0, d(2026, 12, 1)).is_err());
}

// ========== Import ==========

#[test]
fn test_cmd_import() {
    let db = setup_test_db();
    let file = write_csv(
        "date,type,amount,category,name\n\
         2026-10-01,expense,20,Groceries,Market\n\
         10/02/2026,expense,\"$1,500.00\",Rent,October\n\
         2026-10-03,income,3000,Salary,\n",
    );

    let count = commands::cmd_import(&db, USER, file.path()).unwrap();
    assert_eq!(count, 3);

    let user = db.get_user_by_email(USER).unwrap().unwrap();
    let records = db.list_expense_records(user.id).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].amount, 1500.0);
}

#[test]
fn test_cmd_import_bad_row_stores_nothing() {
    let db = setup_test_db();
    let file = write_csv(
        "date,type,amount,category\n\
         2026-10-01,expense,20,Groceries\n\
         2026-10-02,expense,abc,Groceries\n",
    );

    let err = commands::cmd_import(&db, USER, file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("Line 3"));

    let user = db.get_user_by_email(USER).unwrap().unwrap();
    assert_eq!(db.count_transactions(user.id, None).unwrap(), 0);
}

#[test]
fn test_cmd_import_missing_file() {
    let db = setup_test_db();
    let dir = tempfile::tempdir().unwrap();
    let result = commands::cmd_import(&db, USER, &dir.path().join("missing.csv"));
    assert!(result.is_err());
}

// ========== Predict ==========

#[test]
fn test_cmd_predict_empty() {
    let db = setup_test_db();
    let forecast = commands::cmd_predict(&db, USER, Some(d(2026, 10, 19)), 1.5, false).unwrap();
    assert!(forecast.is_empty());
}

#[test]
fn test_cmd_predict_with_history() {
    let db = setup_test_db();
    for day in 1..=19 {
        commands::cmd_transactions_add(&db, USER, 10.0, "Food", "expense", Some(d(2026, 10, day)), None)
            .unwrap();
    }

    let forecast = commands::cmd_predict(&db, USER, Some(d(2026, 10, 19)), 1.5, false).unwrap();
    assert_eq!(forecast.this_week_expense.len(), 7);
    assert_eq!(forecast.this_month_expense.len(), 31);
    assert_eq!(forecast.this_year_expense.len(), 12);
    assert!((forecast.this_month_expense[18].accumulated_expense - 190.0).abs() < 1e-9);

    // JSON output returns the same data
    let json = commands::cmd_predict(&db, USER, Some(d(2026, 10, 19)), 1.5, true).unwrap();
    assert_eq!(json, forecast);
}

#[test]
fn test_cmd_predict_rejects_negative_multiplier() {
    let db = setup_test_db();
    commands::cmd_transactions_add(&db, USER, 10.0, "Food", "expense", Some(d(2026, 10, 1)), None)
        .unwrap();
    assert!(commands::cmd_predict(&db, USER, Some(d(2026, 10, 19)), -1.0, false).is_err());
}

// ========== Suggest ==========

#[tokio::test]
async fn test_run_suggest_with_mock_backend() {
    let db = setup_test_db();
    let ai = AIClient::mock();

    let suggestions = commands::run_suggest(&db, Some(&ai), USER, Some(d(2026, 10, 19)))
        .await
        .unwrap();
    assert_eq!(suggestions.len(), 3);

    let audit = db.list_audit_log(1).unwrap();
    assert_eq!(audit[0].action, "suggest");
    assert_eq!(audit[0].user_email, USER);
}

#[tokio::test]
async fn test_run_suggest_failing_backend() {
    let db = setup_test_db();
    let ai = AIClient::Mock(MockBackend::failing());

    let suggestions = commands::run_suggest(&db, Some(&ai), USER, Some(d(2026, 10, 19)))
        .await
        .unwrap();
    assert!(suggestions.is_empty());
}
