//! Storage interface required by the dispatcher
//!
//! The engine only needs to create one expense and fetch a user's expenses for
//! a window. Any serialization between concurrent writers is the store's job.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::models::{ExpenseRecord, ResolvedWindow};

pub trait ExpenseRepository {
    /// Persist a new expense and return it with its assigned id and timestamp
    ///
    /// Either the whole record is stored or an error is returned.
    fn create_expense(
        &self,
        user_id: &str,
        amount: Decimal,
        category: &str,
        description: &str,
        date: NaiveDate,
    ) -> Result<ExpenseRecord>;

    /// All of a user's expenses dated inside `window` (inclusive)
    fn fetch_by_user_and_window(
        &self,
        user_id: &str,
        window: &ResolvedWindow,
    ) -> Result<Vec<ExpenseRecord>>;
}
