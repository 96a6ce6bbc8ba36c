//! Intent dispatcher
//!
//! Takes one structured intent, resolves its time reference, talks to the
//! repository and returns an [`Outcome`] for the presentation layer. Nothing is
//! kept between calls and repository failures are never retried.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregate::{summarize, CategorySummary};
use crate::error::{Error, Result};
use crate::models::{
    ExpenseRecord, Intent, LoggingIntent, QueryIntent, QueryType, Timeframe, DEFAULT_CATEGORY,
};
use crate::repository::ExpenseRepository;
use crate::search::search;
use crate::window::{resolve_reference, resolve_timeframe};

/// Listing queries show at most this many matches
pub const MAX_LISTED_MATCHES: usize = 5;

/// Asked when the interpretation service wants clarification but gave no question
pub const DEFAULT_CLARIFICATION: &str = "Could you provide more details?";

/// Reply for messages the interpretation service could not turn into an intent
pub const UNPARSEABLE_REPLY: &str =
    "I couldn't understand that. Please try something like 'coffee 5' or 'lunch 25'";

/// Result of handling one intent
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// An expense was stored
    Logged { record: ExpenseRecord },
    /// Nothing was stored; the user must answer `question` first
    ClarificationNeeded { question: String },
    /// Matching expenses, newest first
    ///
    /// `total` covers every match, including the `remaining` ones left out of
    /// `matches`.
    FoundMatches {
        query_type: QueryType,
        item: String,
        timeframe: Timeframe,
        matches: Vec<ExpenseRecord>,
        total: Decimal,
        remaining: usize,
    },
    NoMatches {
        query_type: QueryType,
        item: String,
        timeframe: Timeframe,
    },
    /// Answer to "how much did I spend"
    SpendingAnswer {
        item: String,
        timeframe: Timeframe,
        total: Decimal,
        breakdown: CategorySummary,
    },
    /// The repository failed; nothing was persisted
    Failed { cause: String },
}

/// Routes intents to the repository
pub struct Dispatcher<'a, R: ExpenseRepository + ?Sized> {
    repo: &'a R,
}

impl<'a, R: ExpenseRepository + ?Sized> Dispatcher<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Handle one intent on behalf of `user_id`
    ///
    /// `today` anchors every relative date. Handling the same logging intent
    /// twice stores two records.
    pub fn handle(&self, intent: &Intent, user_id: &str, today: NaiveDate) -> Outcome {
        match intent {
            Intent::Log(log) => self.handle_log(log, user_id, today),
            Intent::Query(query) => self.handle_query(query, user_id, today),
            Intent::Unparseable(message) => Outcome::ClarificationNeeded {
                question: non_blank(message.as_deref())
                    .unwrap_or(UNPARSEABLE_REPLY)
                    .to_string(),
            },
        }
    }

    fn handle_log(&self, intent: &LoggingIntent, user_id: &str, today: NaiveDate) -> Outcome {
        if intent.needs_clarification {
            return Outcome::ClarificationNeeded {
                question: non_blank(intent.clarification_question.as_deref())
                    .unwrap_or(DEFAULT_CLARIFICATION)
                    .to_string(),
            };
        }

        let category = non_blank(intent.category.as_deref()).unwrap_or(DEFAULT_CATEGORY);
        let description = intent.description.as_deref().unwrap_or("").trim();

        let validated = validate_amount(intent.amount).and_then(|amount| {
            resolve_reference(intent.when.as_deref(), today).map(|date| (amount, date))
        });
        let (amount, date) = match validated {
            Ok(v) => v,
            Err(e) => return clarification_for(&e, intent),
        };

        match self
            .repo
            .create_expense(user_id, amount, category, description, date)
        {
            Ok(record) => {
                info!(
                    id = record.id,
                    %amount,
                    category,
                    %date,
                    "Logged expense"
                );
                Outcome::Logged { record }
            }
            Err(e) => failed("create_expense", e),
        }
    }

    fn handle_query(&self, intent: &QueryIntent, user_id: &str, today: NaiveDate) -> Outcome {
        let window = resolve_timeframe(intent.timeframe, today);

        let records = match self.repo.fetch_by_user_and_window(user_id, &window) {
            Ok(records) => records,
            Err(e) => return failed("fetch_by_user_and_window", e),
        };

        let mut matches = search(user_id, &intent.item, &window, &records);
        debug!(
            query_type = %intent.query_type,
            item = %intent.item,
            fetched = records.len(),
            matched = matches.len(),
            "Searched expenses"
        );

        if matches.is_empty() {
            return Outcome::NoMatches {
                query_type: intent.query_type.clone(),
                item: intent.item.clone(),
                timeframe: intent.timeframe,
            };
        }

        match intent.query_type {
            QueryType::HowMuchSpent => {
                let breakdown = summarize(&matches);
                Outcome::SpendingAnswer {
                    item: intent.item.clone(),
                    timeframe: intent.timeframe,
                    total: breakdown.total,
                    breakdown,
                }
            }
            QueryType::CheckIfLogged => Outcome::FoundMatches {
                query_type: intent.query_type.clone(),
                item: intent.item.clone(),
                timeframe: intent.timeframe,
                total: total_of(&matches),
                matches,
                remaining: 0,
            },
            QueryType::WhenDidI | QueryType::ListExpenses | QueryType::Other(_) => {
                let total = total_of(&matches);
                let remaining = matches.len().saturating_sub(MAX_LISTED_MATCHES);
                matches.truncate(MAX_LISTED_MATCHES);
                Outcome::FoundMatches {
                    query_type: intent.query_type.clone(),
                    item: intent.item.clone(),
                    timeframe: intent.timeframe,
                    matches,
                    total,
                    remaining,
                }
            }
        }
    }
}

fn validate_amount(amount: Option<Decimal>) -> Result<Decimal> {
    match amount {
        Some(a) if a > Decimal::ZERO => Ok(a),
        Some(a) => Err(Error::InvalidAmount(format!("{} is not positive", a))),
        None => Err(Error::InvalidAmount("missing".to_string())),
    }
}

/// Validation failures become a question back to the user, not a failure
fn clarification_for(error: &Error, intent: &LoggingIntent) -> Outcome {
    debug!(%error, "Logging intent failed validation");
    let question = match error {
        Error::InvalidDate(when) => format!(
            "I couldn't tell which day '{}' is. Could you give the date as YYYY-MM-DD?",
            when
        ),
        _ => match non_blank(intent.category.as_deref()) {
            Some(category) => format!("How much did you spend on {}?", category),
            None => "How much did you spend?".to_string(),
        },
    };
    Outcome::ClarificationNeeded { question }
}

fn failed(operation: &str, error: Error) -> Outcome {
    warn!(operation, %error, "Repository call failed");
    Outcome::Failed {
        cause: error.to_string(),
    }
}

fn total_of(records: &[ExpenseRecord]) -> Decimal {
    records.iter().map(|r| r.amount).sum()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
