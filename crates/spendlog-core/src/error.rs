//! Error types for Spendlog

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An explicit date that is not `YYYY-MM-DD`
    #[error("Invalid date: {0}. Use YYYY-MM-DD, 'today' or 'yesterday'")]
    InvalidDate(String),

    /// Missing or non-positive amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Failure reported by a non-SQLite repository
    #[error("Repository error: {0}")]
    Repository(String),
}

pub type Result<T> = std::result::Result<T, Error>;
