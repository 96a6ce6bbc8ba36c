//! Report command implementations

use anyhow::{Context, Result};
use serde_json::json;
use spendlog_core::db::Database;
use spendlog_core::{resolve_timeframe, summarize, ExpenseRepository, Timeframe};

use super::RunContext;
use crate::render::{format_currency, render_category_lines, render_record};

/// Summary period for the `today`, `week` and `month` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Today,
    Week,
    Month,
}

impl Period {
    fn timeframe(self) -> Timeframe {
        match self {
            Self::Today => Timeframe::Today,
            Self::Week => Timeframe::ThisWeek,
            Self::Month => Timeframe::ThisMonth,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Today => "📅 Today's Expenses",
            Self::Week => "📊 This Week's Expenses",
            Self::Month => "📈 This Month's Expenses",
        }
    }

    fn empty_message(self) -> &'static str {
        match self {
            Self::Today => "No expenses logged today. Start tracking! 💸",
            Self::Week => "No expenses logged this week.",
            Self::Month => "No expenses logged this month.",
        }
    }
}

/// Build the text of a period summary
pub fn period_report(db: &Database, ctx: &RunContext, period: Period) -> Result<String> {
    let window = resolve_timeframe(period.timeframe(), ctx.today);
    let expenses = db
        .fetch_by_user_and_window(&ctx.user, &window)
        .context("Failed to fetch expenses")?;

    if expenses.is_empty() {
        return Ok(period.empty_message().to_string());
    }

    let summary = summarize(&expenses);
    let mut out = format!("{}\n\n", period.title());
    out.push_str(&render_category_lines(
        &summary,
        &ctx.currency,
        period == Period::Month,
    ));
    out.push_str(&format!(
        "\n\n💰 Total: {}",
        format_currency(&ctx.currency, summary.total)
    ));
    if period != Period::Today {
        out.push_str(&format!("\n📝 {} transactions", expenses.len()));
    }
    Ok(out)
}

pub fn cmd_report(db: &Database, ctx: &RunContext, period: Period) -> Result<()> {
    if ctx.json {
        let window = resolve_timeframe(period.timeframe(), ctx.today);
        let expenses = db
            .fetch_by_user_and_window(&ctx.user, &window)
            .context("Failed to fetch expenses")?;
        let summary = summarize(&expenses);
        let report = json!({
            "window": window,
            "transaction_count": expenses.len(),
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("{}", period_report(db, ctx, period)?);
    Ok(())
}

pub fn cmd_list(db: &Database, ctx: &RunContext, limit: i64) -> Result<()> {
    let expenses = db
        .list_expenses(&ctx.user, limit)
        .context("Failed to list expenses")?;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&expenses)?);
        return Ok(());
    }

    if expenses.is_empty() {
        println!("No expenses found. Log one with:");
        println!("  spendlog log 5 --category coffee");
        return Ok(());
    }

    let total = db.count_expenses(&ctx.user)?;

    println!();
    println!("📝 Recent Expenses ({} total)", total);
    println!("   ─────────────────────────────────────────────────────────────");

    for expense in &expenses {
        println!("{}", render_record(expense, &ctx.currency));
    }

    Ok(())
}
