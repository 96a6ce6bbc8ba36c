//! Intent command implementations
//!
//! `log` and `ask` build intents from arguments; `handle` decodes an
//! interpretation payload. All three go through the dispatcher.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use spendlog_core::db::Database;
use spendlog_core::{
    parse_interpretation, Dispatcher, Intent, LoggingIntent, Outcome, QueryIntent, QueryType,
    Timeframe,
};
use tracing::debug;

use super::RunContext;
use crate::render::render_outcome;

pub fn cmd_log(
    db: &Database,
    ctx: &RunContext,
    amount: Option<Decimal>,
    category: Option<String>,
    description: Option<String>,
    when: Option<String>,
) -> Result<()> {
    let intent = Intent::Log(LoggingIntent {
        amount,
        category,
        description,
        when,
        ..Default::default()
    });
    dispatch(db, ctx, &intent)
}

pub fn cmd_ask(
    db: &Database,
    ctx: &RunContext,
    query_type: &str,
    item: &str,
    timeframe: &str,
) -> Result<()> {
    let intent = Intent::Query(QueryIntent {
        query_type: QueryType::from(query_type),
        item: item.to_string(),
        timeframe: Timeframe::from(timeframe),
    });
    dispatch(db, ctx, &intent)
}

/// Decode a payload from `file` (or stdin) and dispatch it
pub fn cmd_handle(db: &Database, ctx: &RunContext, file: Option<&Path>) -> Result<()> {
    let payload = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read payload from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read payload from stdin")?;
            buf
        }
    };

    let intent = parse_interpretation(&payload).context("Invalid interpretation payload")?;
    debug!(?intent, "Decoded payload");
    dispatch(db, ctx, &intent)
}

/// Run one intent and print the outcome
///
/// A `Failed` outcome is printed like any other and then turned into an
/// error so the process exits non-zero.
pub fn dispatch(db: &Database, ctx: &RunContext, intent: &Intent) -> Result<()> {
    let outcome = Dispatcher::new(db).handle(intent, &ctx.user, ctx.today);

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", render_outcome(&outcome, &ctx.currency));
    }

    if let Outcome::Failed { cause } = outcome {
        anyhow::bail!("Repository failure: {}", cause);
    }
    Ok(())
}
