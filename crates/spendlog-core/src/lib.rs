//! Spendlog Core Library
//!
//! Intent resolution and aggregation engine for a conversational expense
//! tracker:
//! - Time window resolution for relative dates and named timeframes
//! - Per-category aggregation with exact decimal money
//! - Free-text search over a user's expenses
//! - Intent dispatcher producing presentation-ready outcomes
//! - SQLite repository with optional encryption
//! - Decoding of interpretation-service payloads

pub mod aggregate;
pub mod db;
pub mod dispatch;
pub mod error;
pub mod interpret;
pub mod models;
pub mod repository;
pub mod search;
pub mod window;

/// Test utilities including an in-memory repository
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use aggregate::{summarize, CategorySummary, CategoryTotal};
pub use db::Database;
pub use dispatch::{Dispatcher, Outcome};
pub use error::{Error, Result};
pub use interpret::parse_interpretation;
pub use models::{
    ExpenseRecord, Intent, LoggingIntent, QueryIntent, QueryType, ResolvedWindow, Timeframe,
};
pub use repository::ExpenseRepository;
pub use search::search;
pub use window::{resolve_reference, resolve_timeframe};
