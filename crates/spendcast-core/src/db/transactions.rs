//! Transaction operations

use rusqlite::{params, OptionalExtension};

use super::{parse_date_column, parse_datetime, Database};
use crate::error::Result;
use crate::models::{ExpenseRecord, NewTransaction, Transaction, TransactionType};

const TRANSACTION_COLUMNS: &str =
    "id, user_id, name, type, amount, category, date, created_at";

impl Database {
    /// Insert a validated transaction for a user
    pub fn insert_transaction(&self, user_id: i64, tx: &NewTransaction) -> Result<i64> {
        tx.validate()?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (user_id, name, type, amount, category, date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                normalize_name(tx.name.as_deref()),
                tx.transaction_type.as_str(),
                tx.amount,
                tx.category.trim(),
                tx.date.to_string(),
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a single transaction owned by the user
    pub fn get_transaction(&self, user_id: i64, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE id = ? AND user_id = ?",
            TRANSACTION_COLUMNS
        );
        let tx = conn
            .query_row(&sql, params![id, user_id], Self::row_to_transaction)
            .optional()?;
        Ok(tx)
    }

    /// List a user's transactions, newest first
    pub fn list_transactions(
        &self,
        user_id: i64,
        transaction_type: Option<TransactionType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            r#"
            SELECT {} FROM transactions
            WHERE user_id = ?1 AND (?2 IS NULL OR type = ?2)
            ORDER BY date DESC, created_at DESC, id DESC
            LIMIT ?3 OFFSET ?4
            "#,
            TRANSACTION_COLUMNS
        );

        let mut stmt = conn.prepare(&sql)?;
        let transactions = stmt
            .query_map(
                params![
                    user_id,
                    transaction_type.map(|t| t.as_str()),
                    limit,
                    offset
                ],
                Self::row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(transactions)
    }

    pub fn count_transactions(
        &self,
        user_id: i64,
        transaction_type: Option<TransactionType>,
    ) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM transactions WHERE user_id = ?1 AND (?2 IS NULL OR type = ?2)",
            params![user_id, transaction_type.map(|t| t.as_str())],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Replace a transaction's fields. Returns false if the user has no such transaction.
    pub fn update_transaction(&self, user_id: i64, id: i64, tx: &NewTransaction) -> Result<bool> {
        tx.validate()?;
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE transactions
            SET name = ?, type = ?, amount = ?, category = ?, date = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                normalize_name(tx.name.as_deref()),
                tx.transaction_type.as_str(),
                tx.amount,
                tx.category.trim(),
                tx.date.to_string(),
                id,
                user_id,
            ],
        )?;

        Ok(updated > 0)
    }

    pub fn delete_transaction(&self, user_id: i64, id: i64) -> Result<bool> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM transactions WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;
        Ok(deleted > 0)
    }

    /// Expense transactions of a user as projection input, ordered by date
    pub fn list_expense_records(&self, user_id: i64) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT date, amount FROM transactions
            WHERE user_id = ? AND type = 'expense'
            ORDER BY date, id
            "#,
        )?;

        let records = stmt
            .query_map(params![user_id], |row| {
                let date: String = row.get(0)?;
                Ok(ExpenseRecord {
                    date: parse_date_column(0, &date)?,
                    amount: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let type_str: String = row.get(3)?;
        let date_str: String = row.get(6)?;
        let created_at_str: String = row.get(7)?;

        let transaction_type = type_str.parse::<TransactionType>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(crate::Error::InvalidData(e)),
            )
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            user_id: row.get(1)?,
            name: row.get(2)?,
            transaction_type,
            amount: row.get(4)?,
            category: row.get(5)?,
            date: parse_date_column(6, &date_str)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}

fn normalize_name(name: Option<&str>) -> Option<&str> {
    name.map(str::trim).filter(|n| !n.is_empty())
}
