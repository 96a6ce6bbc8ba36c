//! Time window resolution
//!
//! Turns relative references from intents ("today", "yesterday", "this_week")
//! into concrete dates. Every function takes `today` explicitly so results do
//! not depend on the wall clock.

use chrono::{Datelike, Duration, NaiveDate};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ResolvedWindow, Timeframe};

/// Format accepted for explicit dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve a logging intent's `when` to the date the expense is attributed to
///
/// `"today"`, an empty string or `None` resolve to `today`; `"yesterday"` to the
/// day before. Anything else must be an explicit `YYYY-MM-DD` date. Dates after
/// `today` are accepted.
pub fn resolve_reference(when: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    let when = when.unwrap_or("").trim();

    match when.to_lowercase().as_str() {
        "" | "today" => Ok(today),
        "yesterday" => Ok(today - Duration::days(1)),
        _ => {
            let date = NaiveDate::parse_from_str(when, DATE_FORMAT)
                .map_err(|_| Error::InvalidDate(when.to_string()))?;
            if date > today {
                debug!(%date, %today, "Expense attributed to a future date");
            }
            Ok(date)
        }
    }
}

/// Resolve a query timeframe to an inclusive window ending today
///
/// `this_week` is a rolling seven-day window, not a calendar week.
pub fn resolve_timeframe(timeframe: Timeframe, today: NaiveDate) -> ResolvedWindow {
    let window = match timeframe {
        Timeframe::Today => ResolvedWindow::day(today),
        Timeframe::Yesterday => ResolvedWindow::day(today - Duration::days(1)),
        Timeframe::ThisWeek => ResolvedWindow::new(today - Duration::days(6), today),
        Timeframe::ThisMonth => ResolvedWindow::new(first_of_month(today), today),
        Timeframe::AllTime => ResolvedWindow::up_to(today),
    };
    debug!(%timeframe, start = ?window.start, end = %window.end, "Resolved timeframe");
    window
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    // Day 1 exists in every month, so with_day(1) cannot fail
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_reference_today_and_default() {
        let today = ymd(2024, 3, 10);
        assert_eq!(resolve_reference(Some("today"), today).unwrap(), today);
        assert_eq!(resolve_reference(Some(""), today).unwrap(), today);
        assert_eq!(resolve_reference(Some("  TODAY "), today).unwrap(), today);
        assert_eq!(resolve_reference(None, today).unwrap(), today);
    }

    #[test]
    fn test_reference_yesterday_across_boundaries() {
        assert_eq!(
            resolve_reference(Some("yesterday"), ymd(2024, 3, 10)).unwrap(),
            ymd(2024, 3, 9)
        );
        assert_eq!(
            resolve_reference(Some("yesterday"), ymd(2024, 1, 1)).unwrap(),
            ymd(2023, 12, 31)
        );
        assert_eq!(
            resolve_reference(Some("yesterday"), ymd(2024, 3, 1)).unwrap(),
            ymd(2024, 2, 29)
        );
        assert_eq!(
            resolve_reference(Some("Yesterday"), ymd(2023, 3, 1)).unwrap(),
            ymd(2023, 2, 28)
        );
    }

    #[test]
    fn test_reference_explicit_date() {
        let today = ymd(2024, 3, 10);
        assert_eq!(
            resolve_reference(Some("2024-02-14"), today).unwrap(),
            ymd(2024, 2, 14)
        );
        // Future dates are not rejected
        assert_eq!(
            resolve_reference(Some("2024-04-01"), today).unwrap(),
            ymd(2024, 4, 1)
        );
    }

    #[test]
    fn test_reference_malformed_date() {
        let today = ymd(2024, 3, 10);
        for bad in ["last tuesday", "2024-13-01", "10/03/2024", "2024-02-30"] {
            let err = resolve_reference(Some(bad), today).unwrap_err();
            assert!(matches!(err, Error::InvalidDate(ref s) if s == bad));
        }
    }

    #[test]
    fn test_timeframe_single_days() {
        let today = ymd(2024, 3, 10);
        assert_eq!(
            resolve_timeframe(Timeframe::Today, today),
            ResolvedWindow::day(today)
        );
        assert_eq!(
            resolve_timeframe(Timeframe::Yesterday, ymd(2024, 1, 1)),
            ResolvedWindow::day(ymd(2023, 12, 31))
        );
    }

    #[test]
    fn test_this_week_is_seven_days() {
        let mut day = ymd(2023, 12, 25);
        for _ in 0..400 {
            let window = resolve_timeframe(Timeframe::ThisWeek, day);
            assert_eq!(window.end, day);
            assert_eq!(window.days(), Some(7));
            day = day.succ_opt().unwrap();
        }

        let window = resolve_timeframe(Timeframe::ThisWeek, ymd(2024, 3, 3));
        assert_eq!(window.start, Some(ymd(2024, 2, 26)));
    }

    #[test]
    fn test_this_month_starts_on_first() {
        assert_eq!(
            resolve_timeframe(Timeframe::ThisMonth, ymd(2024, 3, 10)),
            ResolvedWindow::new(ymd(2024, 3, 1), ymd(2024, 3, 10))
        );
        assert_eq!(
            resolve_timeframe(Timeframe::ThisMonth, ymd(2024, 3, 1)),
            ResolvedWindow::day(ymd(2024, 3, 1))
        );
    }

    #[test]
    fn test_all_time_and_unrecognized() {
        let today = ymd(2024, 3, 10);
        assert_eq!(
            resolve_timeframe(Timeframe::AllTime, today),
            ResolvedWindow::up_to(today)
        );
        assert_eq!(
            resolve_timeframe(Timeframe::from("last_fortnight"), today),
            ResolvedWindow::up_to(today)
        );
    }
}
