//! Spendlog CLI - Conversational expense tracker
//!
//! Usage:
//!   spendlog init                          Initialize database
//!   spendlog log 50 --category coffee      Log an expense
//!   spendlog ask how_much_spent -i coffee  Ask about spending
//!   spendlog handle --file payload.json    Dispatch an interpretation payload
//!   spendlog month                         Monthly summary

mod cli;
mod commands;
mod render;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let ctx = commands::RunContext::from_cli(&cli);
    let open_db = || commands::open_db(&cli.db, cli.no_encrypt);

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Log {
            amount,
            category,
            description,
            when,
        } => commands::cmd_log(&open_db()?, &ctx, amount, category, description, when),
        Commands::Ask {
            query_type,
            item,
            timeframe,
        } => commands::cmd_ask(&open_db()?, &ctx, &query_type, &item, &timeframe),
        Commands::Handle { file } => commands::cmd_handle(&open_db()?, &ctx, file.as_deref()),
        Commands::Today => commands::cmd_report(&open_db()?, &ctx, commands::Period::Today),
        Commands::Week => commands::cmd_report(&open_db()?, &ctx, commands::Period::Week),
        Commands::Month => commands::cmd_report(&open_db()?, &ctx, commands::Period::Month),
        Commands::List { limit } => commands::cmd_list(&open_db()?, &ctx, limit),
    }
}
