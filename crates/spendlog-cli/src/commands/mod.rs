//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database setup (init) and shared utilities (open_db)
//! - `intents` - Logging, asking and dispatching interpretation payloads
//! - `reports` - Period summaries and recent expense listing

pub mod core;
pub mod intents;
pub mod reports;

// Re-export command functions for main.rs
pub use core::*;
pub use intents::*;
pub use reports::*;

use chrono::{Local, NaiveDate};

use crate::cli::Cli;

/// Settings shared by every command that reads or writes expenses
pub struct RunContext {
    pub user: String,
    pub today: NaiveDate,
    pub currency: String,
    pub json: bool,
}

impl RunContext {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            user: cli.user.clone(),
            today: cli.today.unwrap_or_else(|| Local::now().date_naive()),
            currency: cli.currency.clone(),
            json: cli.json,
        }
    }
}

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
