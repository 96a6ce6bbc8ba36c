//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// Spendlog - Log and query everyday spending
#[derive(Parser)]
#[command(name = "spendlog")]
#[command(about = "Conversational expense tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendlog.db", env = "SPENDLOG_DB", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set SPENDLOG_DB_KEY environment variable with your passphrase.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// User whose expenses are logged and queried
    #[arg(short, long, default_value = "local", env = "SPENDLOG_USER", global = true)]
    pub user: String,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Currency symbol used when printing amounts
    #[arg(long, default_value = "₹", global = true)]
    pub currency: String,

    /// Print outcomes as JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Log an expense
    Log {
        /// Amount spent (omit to be asked for it)
        #[arg(allow_hyphen_values = true)]
        amount: Option<Decimal>,

        /// Category, e.g. coffee, food, transport
        #[arg(short, long)]
        category: Option<String>,

        /// Free-text description
        #[arg(short, long)]
        description: Option<String>,

        /// Day of the expense: today, yesterday or YYYY-MM-DD
        #[arg(short, long)]
        when: Option<String>,
    },

    /// Ask about past spending
    Ask {
        /// Query type: check_if_logged, how_much_spent, when_did_i, list_expenses
        query_type: String,

        /// Text to look for in category or description (empty matches all)
        #[arg(short, long, default_value = "")]
        item: String,

        /// Timeframe: today, yesterday, this_week, this_month, all_time
        #[arg(short, long, default_value = "all_time")]
        timeframe: String,
    },

    /// Dispatch an interpretation payload (JSON or plain text)
    Handle {
        /// File holding the payload (reads stdin if not specified)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show today's spending by category
    Today,

    /// Show the last seven days of spending by category
    Week,

    /// Show this month's spending by category with percentages
    Month,

    /// List recent expenses
    List {
        /// Maximum number to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },
}
