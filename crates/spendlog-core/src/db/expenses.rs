//! Expense operations

use std::str::FromStr;

use chrono::{NaiveDate, SecondsFormat, SubsecRound, Utc};
use rust_decimal::Decimal;
use rusqlite::params;
use rusqlite::types::Type;
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{ExpenseRecord, ResolvedWindow};
use crate::repository::ExpenseRepository;
use crate::window::DATE_FORMAT;

const EXPENSE_COLUMNS: &str = "id, user_id, amount, category, description, date, logged_at";

impl Database {
    /// Most recent expenses for a user, newest first
    pub fn list_expenses(&self, user_id: &str, limit: i64) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM expenses
            WHERE user_id = ?1
            ORDER BY date DESC, logged_at DESC, id DESC
            LIMIT ?2
            "#,
            EXPENSE_COLUMNS
        ))?;

        let expenses = stmt
            .query_map(params![user_id, limit], |row| Self::row_to_expense(row))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Count a user's expenses
    pub fn count_expenses(&self, user_id: &str) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM expenses WHERE user_id = ?",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Helper to convert a row to ExpenseRecord
    /// Column order: id, user_id, amount, category, description, date, logged_at
    pub(crate) fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<ExpenseRecord> {
        let amount_str: String = row.get(2)?;
        let date_str: String = row.get(5)?;
        let logged_at_str: String = row.get(6)?;

        let amount = Decimal::from_str(&amount_str)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e)))?;
        let date = NaiveDate::parse_from_str(&date_str, DATE_FORMAT)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;
        let logged_at = parse_datetime(&logged_at_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                6,
                Type::Text,
                format!("bad timestamp: {}", logged_at_str).into(),
            )
        })?;

        Ok(ExpenseRecord {
            id: row.get(0)?,
            user_id: row.get(1)?,
            amount,
            category: row.get(3)?,
            description: row.get(4)?,
            date,
            logged_at,
        })
    }
}

impl ExpenseRepository for Database {
    fn create_expense(
        &self,
        user_id: &str,
        amount: Decimal,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<ExpenseRecord> {
        let conn = self.conn()?;
        // Stored with microsecond precision, so the returned record matches a re-read
        let logged_at = Utc::now().trunc_subsecs(6);

        conn.execute(
            r#"
            INSERT INTO expenses (user_id, amount, category, description, date, logged_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                amount.to_string(),
                category,
                description,
                date.format(DATE_FORMAT).to_string(),
                logged_at.to_rfc3339_opts(SecondsFormat::Micros, true),
            ],
        )?;

        let id = conn.last_insert_rowid();
        debug!(id, user_id, "Inserted expense");

        Ok(ExpenseRecord {
            id,
            user_id: user_id.to_string(),
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
            logged_at,
        })
    }

    fn fetch_by_user_and_window(
        &self,
        user_id: &str,
        window: &ResolvedWindow,
    ) -> Result<Vec<ExpenseRecord>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {}
            FROM expenses
            WHERE user_id = ?1
              AND date <= ?2
              AND (?3 IS NULL OR date >= ?3)
            ORDER BY date DESC, logged_at DESC, id DESC
            "#,
            EXPENSE_COLUMNS
        ))?;

        let start = window.start.map(|d| d.format(DATE_FORMAT).to_string());
        let expenses = stmt
            .query_map(
                params![user_id, window.end.format(DATE_FORMAT).to_string(), start],
                |row| Self::row_to_expense(row),
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }
}
