//! Test utilities for spendlog-core
//!
//! Provides an in-process repository with failure injection so dispatcher
//! behavior can be tested without SQLite.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, ResolvedWindow};
use crate::repository::ExpenseRepository;

/// Expense repository backed by a `Vec`
#[derive(Default)]
pub struct MemoryRepository {
    records: Mutex<Vec<ExpenseRecord>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-populated with records (ids are kept as given)
    pub fn with_records(records: Vec<ExpenseRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make every subsequent create fail
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent fetch fail
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of everything stored
    pub fn records(&self) -> Vec<ExpenseRecord> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<ExpenseRecord>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ExpenseRepository for MemoryRepository {
    fn create_expense(
        &self,
        user_id: &str,
        amount: Decimal,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<ExpenseRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Error::Repository("write rejected".to_string()));
        }

        let mut records = self.lock();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = ExpenseRecord {
            id,
            user_id: user_id.to_string(),
            amount,
            category: category.to_string(),
            description: description.to_string(),
            date,
            logged_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    fn fetch_by_user_and_window(
        &self,
        user_id: &str,
        window: &ResolvedWindow,
    ) -> Result<Vec<ExpenseRecord>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Error::Repository("store unreachable".to_string()));
        }

        Ok(self
            .lock()
            .iter()
            .filter(|r| r.user_id == user_id && window.contains(r.date))
            .cloned()
            .collect())
    }
}
