//! Text rendering of outcomes and summaries

use rust_decimal::Decimal;
use spendlog_core::models::{QueryType, Timeframe};
use spendlog_core::{CategorySummary, CategoryTotal, ExpenseRecord, Outcome};

use crate::commands::truncate;

/// Emoji shown next to a category; unknown categories get a money bag
pub fn category_emoji(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "food" => "🍔",
        "coffee" => "☕",
        "transport" => "🚗",
        "groceries" => "🛒",
        "entertainment" => "🎬",
        "shopping" => "🛍️",
        "bills" => "📄",
        "health" => "💊",
        "uncategorized" => "❓",
        _ => "💰",
    }
}

pub fn format_currency(currency: &str, amount: Decimal) -> String {
    format!("{}{:.2}", currency, amount.round_dp(2))
}

/// Render an outcome as a chat-style reply
pub fn render_outcome(outcome: &Outcome, currency: &str) -> String {
    match outcome {
        Outcome::Logged { record } => {
            let label = if record.description.is_empty() {
                &record.category
            } else {
                &record.description
            };
            format!(
                "✅ Logged {}\n{} {}: {}\n📅 {}",
                format_currency(currency, record.amount),
                category_emoji(&record.category),
                record.category,
                label,
                record.date
            )
        }
        Outcome::ClarificationNeeded { question } => format!("🤔 {}", question),
        Outcome::FoundMatches {
            query_type,
            item,
            timeframe,
            matches,
            total,
            remaining,
        } => {
            let mut out = match query_type {
                QueryType::CheckIfLogged => format!(
                    "Yes, you logged {} {}:",
                    subject(item),
                    timeframe.label()
                ),
                _ => {
                    let count = matches.len() + remaining;
                    let noun = if count == 1 { "expense" } else { "expenses" };
                    format!("Found {} {}:", count, describe(noun, item, *timeframe))
                }
            };
            for record in matches {
                out.push('\n');
                out.push_str(&render_record(record, currency));
            }
            if *remaining > 0 {
                out.push_str(&format!("\n   ...and {} more", remaining));
            }
            out.push_str(&format!("\n💰 Total: {}", format_currency(currency, *total)));
            out
        }
        Outcome::NoMatches {
            query_type,
            item,
            timeframe,
        } => match query_type {
            QueryType::CheckIfLogged => format!(
                "No, I couldn't find any {} logged {}.",
                subject(item),
                timeframe.label()
            ),
            _ => format!("No {}.", describe("expenses", item, *timeframe)),
        },
        Outcome::SpendingAnswer {
            item,
            timeframe,
            total,
            breakdown,
        } => {
            let mut out = if item.trim().is_empty() {
                format!(
                    "You spent {} in total {}",
                    format_currency(currency, *total),
                    timeframe.label()
                )
            } else {
                format!(
                    "You spent {} on {} {}",
                    format_currency(currency, *total),
                    item,
                    timeframe.label()
                )
            };
            if !breakdown.is_empty() {
                out.push('\n');
                out.push_str(&render_category_lines(breakdown, currency, false));
            }
            out
        }
        Outcome::Failed { .. } => "⚠️  Sorry, something went wrong. Please try again.".to_string(),
    }
}

/// One line per expense: date, amount, category and description
pub fn render_record(record: &ExpenseRecord, currency: &str) -> String {
    let mut line = format!(
        "   {} │ {:>10} │ {} {}",
        record.date,
        format_currency(currency, record.amount),
        category_emoji(&record.category),
        record.category
    );
    if !record.description.is_empty() {
        line.push_str(&format!(": {}", truncate(&record.description, 40)));
    }
    line
}

/// Category lines, optionally sorted by amount with each category's share of the total
pub fn render_category_lines(
    summary: &CategorySummary,
    currency: &str,
    with_percentages: bool,
) -> String {
    let categories: Vec<&CategoryTotal> = if with_percentages {
        summary.by_amount_desc()
    } else {
        summary.categories.iter().collect()
    };

    categories
        .into_iter()
        .map(|c| {
            let mut line = format!(
                "{} {}: {}",
                category_emoji(&c.category),
                c.category,
                format_currency(currency, c.amount)
            );
            if with_percentages {
                if let Some(share) = summary.share_of(c.amount) {
                    line.push_str(&format!(" ({:.1}%)", share.round_dp(1)));
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn subject(item: &str) -> &str {
    match item.trim() {
        "" => "expenses",
        trimmed => trimmed,
    }
}

fn describe(noun: &str, item: &str, timeframe: Timeframe) -> String {
    match item.trim() {
        "" => format!("{} {}", noun, timeframe.label()),
        trimmed => format!("{} matching '{}' {}", noun, trimmed, timeframe.label()),
    }
}
