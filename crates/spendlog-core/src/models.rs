//! Domain models for Spendlog

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Category used when a logging intent has none
pub const DEFAULT_CATEGORY: &str = "other";

/// Category label used by summaries for records with a blank category
pub const UNCATEGORIZED: &str = "uncategorized";

/// A logged expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: i64,
    pub user_id: String,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    /// Day the expense is attributed to, not necessarily the day it was logged
    pub date: NaiveDate,
    /// Creation time. Only used to order records within a day.
    pub logged_at: DateTime<Utc>,
}

/// Request to record an expense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingIntent {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `today`, `yesterday` or an explicit `YYYY-MM-DD` date. Absent means today.
    #[serde(default)]
    pub when: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub needs_clarification: bool,
    #[serde(default)]
    pub clarification_question: Option<String>,
}

/// Question about past spending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub query_type: QueryType,
    /// Free text the user is asking about. Empty matches everything.
    #[serde(default, deserialize_with = "null_as_default")]
    pub item: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeframe: Timeframe,
}

/// Structured output of the interpretation service
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Log(LoggingIntent),
    Query(QueryIntent),
    /// The service could not extract an intent; carries its reply, if any
    Unparseable(Option<String>),
}

/// Kind of question asked about past spending
///
/// Unknown values are kept as `Other` and handled like a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QueryType {
    CheckIfLogged,
    HowMuchSpent,
    WhenDidI,
    ListExpenses,
    Other(String),
}

impl QueryType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CheckIfLogged => "check_if_logged",
            Self::HowMuchSpent => "how_much_spent",
            Self::WhenDidI => "when_did_i",
            Self::ListExpenses => "list_expenses",
            Self::Other(s) => s,
        }
    }
}

impl From<&str> for QueryType {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "check_if_logged" => Self::CheckIfLogged,
            "how_much_spent" => Self::HowMuchSpent,
            "when_did_i" => Self::WhenDidI,
            "list_expenses" => Self::ListExpenses,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for QueryType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<QueryType> for String {
    fn from(q: QueryType) -> Self {
        q.as_str().to_string()
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named period a query is scoped to
///
/// Unrecognized names resolve to `AllTime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Timeframe {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    #[default]
    AllTime,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this_week",
            Self::ThisMonth => "this_month",
            Self::AllTime => "all_time",
        }
    }

    /// Human-readable phrase, e.g. "this week"
    pub fn label(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::ThisWeek => "this week",
            Self::ThisMonth => "this month",
            Self::AllTime => "so far",
        }
    }
}

impl From<&str> for Timeframe {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "today" => Self::Today,
            "yesterday" => Self::Yesterday,
            "this_week" | "week" => Self::ThisWeek,
            "this_month" | "month" => Self::ThisMonth,
            _ => Self::AllTime,
        }
    }
}

impl From<String> for Timeframe {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Timeframe> for String {
    fn from(t: Timeframe) -> Self {
        t.as_str().to_string()
    }
}

impl std::fmt::Display for Timeframe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Inclusive date range used to scope retrieval
///
/// `start` is `None` for an open-ended window (all time).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedWindow {
    pub start: Option<NaiveDate>,
    pub end: NaiveDate,
}

impl ResolvedWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end,
        }
    }

    /// Window covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Everything up to and including `end`
    pub fn up_to(end: NaiveDate) -> Self {
        Self { start: None, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date <= self.end && self.start.map_or(true, |start| date >= start)
    }

    /// Number of calendar days covered, or `None` when open-ended
    pub fn days(&self) -> Option<i64> {
        self.start
            .map(|start| (self.end - start).num_days() + 1)
    }
}

/// Treat an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_type_parsing() {
        assert_eq!(QueryType::from("check_if_logged"), QueryType::CheckIfLogged);
        assert_eq!(QueryType::from("HOW_MUCH_SPENT"), QueryType::HowMuchSpent);
        assert_eq!(QueryType::from("when_did_i"), QueryType::WhenDidI);
        assert_eq!(QueryType::from("list_expenses"), QueryType::ListExpenses);
        assert_eq!(
            QueryType::from("compare"),
            QueryType::Other("compare".to_string())
        );
        assert_eq!(QueryType::from("compare").as_str(), "compare");
    }

    #[test]
    fn test_timeframe_fallback() {
        assert_eq!(Timeframe::from("this_week"), Timeframe::ThisWeek);
        assert_eq!(Timeframe::from("This Month"), Timeframe::ThisMonth);
        assert_eq!(Timeframe::from("last_decade"), Timeframe::AllTime);
        assert_eq!(Timeframe::from(""), Timeframe::AllTime);
        assert_eq!(Timeframe::default(), Timeframe::AllTime);
    }

    #[test]
    fn test_query_intent_defaults() {
        let intent: QueryIntent =
            serde_json::from_str(r#"{"query_type": "check_if_logged"}"#).unwrap();
        assert_eq!(intent.item, "");
        assert_eq!(intent.timeframe, Timeframe::AllTime);

        let intent: QueryIntent = serde_json::from_str(
            r#"{"query_type": "how_much_spent", "item": null, "timeframe": null}"#,
        )
        .unwrap();
        assert_eq!(intent.item, "");
        assert_eq!(intent.timeframe, Timeframe::AllTime);
    }

    #[test]
    fn test_window_contains() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let window = ResolvedWindow::new(start, end);

        assert!(window.contains(start));
        assert!(window.contains(end));
        assert!(!window.contains(start.pred_opt().unwrap()));
        assert!(!window.contains(end.succ_opt().unwrap()));
        assert_eq!(window.days(), Some(7));

        let open = ResolvedWindow::up_to(end);
        assert!(open.contains(NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()));
        assert!(!open.contains(end.succ_opt().unwrap()));
        assert_eq!(open.days(), None);
    }
}
