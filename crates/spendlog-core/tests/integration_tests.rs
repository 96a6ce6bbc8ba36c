//! Integration tests for spendlog-core
//!
//! These tests exercise the full interpretation payload → dispatcher → SQLite
//! → outcome workflow.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use spendlog_core::{
    db::Database,
    dispatch::{Dispatcher, Outcome, MAX_LISTED_MATCHES},
    interpret::parse_interpretation,
    models::{Intent, LoggingIntent, QueryType, Timeframe},
    ExpenseRepository,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn handle_json(db: &Database, payload: &str, user: &str, today: NaiveDate) -> Outcome {
    let intent = parse_interpretation(payload).expect("Failed to parse payload");
    Dispatcher::new(db).handle(&intent, user, today)
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_log_coffee_today() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let today = ymd(2024, 3, 10);

    let outcome = handle_json(
        &db,
        r#"{"success": true, "type": "expense", "data": {"amount": 50, "category": "coffee", "description": "", "when": "today"}}"#,
        "42",
        today,
    );

    let Outcome::Logged { record } = outcome else {
        panic!("expected Logged, got {:?}", outcome);
    };
    assert_eq!(record.amount, dec!(50));
    assert_eq!(record.category, "coffee");
    assert_eq!(record.date, today);

    let stored = db.list_expenses("42", 10).unwrap();
    assert_eq!(stored, vec![record]);
}

#[test]
fn test_logging_is_additive() {
    let db = Database::in_memory().unwrap();
    let payload = r#"{"type": "expense", "data": {"amount": 5, "category": "coffee"}}"#;

    handle_json(&db, payload, "42", ymd(2024, 3, 10));
    handle_json(&db, payload, "42", ymd(2024, 3, 10));

    assert_eq!(db.count_expenses("42").unwrap(), 2);
}

#[test]
fn test_yesterday_crosses_year_boundary() {
    let db = Database::in_memory().unwrap();
    let outcome = handle_json(
        &db,
        r#"{"type": "expense", "data": {"amount": 20, "category": "food", "description": "breakfast yesterday morning", "when": "yesterday"}}"#,
        "42",
        ymd(2024, 1, 1),
    );

    let Outcome::Logged { record } = outcome else {
        panic!("expected Logged");
    };
    assert_eq!(record.date, ymd(2023, 12, 31));
}

#[test]
fn test_clarification_writes_nothing() {
    let db = Database::in_memory().unwrap();
    let outcome = handle_json(
        &db,
        r#"{"type": "expense", "data": {"needs_clarification": true, "clarification_question": "How much did you spend on groceries?"}}"#,
        "42",
        ymd(2024, 3, 10),
    );

    assert_eq!(
        outcome,
        Outcome::ClarificationNeeded {
            question: "How much did you spend on groceries?".to_string()
        }
    );
    assert_eq!(db.count_expenses("42").unwrap(), 0);
}

// =============================================================================
// Queries
// =============================================================================

fn seed(db: &Database) {
    db.create_expense("42", dec!(50), "coffee", "", ymd(2024, 3, 10))
        .unwrap();
    db.create_expense("42", dec!(20), "tea", "", ymd(2024, 3, 9))
        .unwrap();
    db.create_expense("42", dec!(35), "food", "panipuri", ymd(2024, 3, 6))
        .unwrap();
    db.create_expense("42", dec!(99), "shopping", "", ymd(2024, 2, 20))
        .unwrap();
    db.create_expense("7", dec!(500), "coffee", "", ymd(2024, 3, 10))
        .unwrap();
}

#[test]
fn test_how_much_spent_on_coffee_this_week() {
    let db = Database::in_memory().unwrap();
    seed(&db);

    let outcome = handle_json(
        &db,
        r#"{"type": "query", "data": {"query_type": "how_much_spent", "item": "coffee", "timeframe": "this_week"}}"#,
        "42",
        ymd(2024, 3, 10),
    );

    let Outcome::SpendingAnswer {
        total, breakdown, ..
    } = outcome
    else {
        panic!("expected SpendingAnswer");
    };
    assert_eq!(total, dec!(50));
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown.get("coffee"), Some(dec!(50)));
}

#[test]
fn test_check_if_logged_sushi_today() {
    let db = Database::in_memory().unwrap();
    seed(&db);

    let outcome = handle_json(
        &db,
        r#"{"name": "query_expenses", "args": {"query_type": "check_if_logged", "item": "sushi", "timeframe": "today"}}"#,
        "42",
        ymd(2024, 3, 10),
    );

    assert_eq!(
        outcome,
        Outcome::NoMatches {
            query_type: QueryType::CheckIfLogged,
            item: "sushi".to_string(),
            timeframe: Timeframe::Today,
        }
    );
}

#[test]
fn test_did_i_eat_panipuri_this_week() {
    let db = Database::in_memory().unwrap();
    seed(&db);

    let outcome = handle_json(
        &db,
        r#"{"type": "query", "data": {"query_type": "check_if_logged", "item": "Panipuri", "timeframe": "this_week"}}"#,
        "42",
        ymd(2024, 3, 10),
    );

    let Outcome::FoundMatches { matches, total, .. } = outcome else {
        panic!("expected FoundMatches");
    };
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].description, "panipuri");
    assert_eq!(total, dec!(35));
}

#[test]
fn test_all_time_listing_is_truncated() {
    let db = Database::in_memory().unwrap();
    for day in 1..=9 {
        db.create_expense("42", dec!(1.10), "coffee", "", ymd(2024, 3, day))
            .unwrap();
    }

    let outcome = handle_json(
        &db,
        r#"{"type": "query", "data": {"query_type": "when_did_i", "item": "coffee"}}"#,
        "42",
        ymd(2024, 3, 10),
    );

    let Outcome::FoundMatches {
        matches,
        total,
        remaining,
        ..
    } = outcome
    else {
        panic!("expected FoundMatches");
    };
    assert_eq!(matches.len(), MAX_LISTED_MATCHES);
    assert_eq!(remaining, 4);
    assert_eq!(total, dec!(9.90));
    assert_eq!(matches[0].date, ymd(2024, 3, 9));
}

#[test]
fn test_unparseable_text_is_relayed() {
    let db = Database::in_memory().unwrap();
    let outcome = handle_json(&db, "Hi there! Tell me what you spent.", "42", ymd(2024, 3, 10));

    assert_eq!(
        outcome,
        Outcome::ClarificationNeeded {
            question: "Hi there! Tell me what you spent.".to_string()
        }
    );
}

#[test]
fn test_dispatcher_accepts_trait_object() {
    let db = Database::in_memory().unwrap();
    let repo: &dyn ExpenseRepository = &db;
    let intent = Intent::Log(LoggingIntent {
        amount: Some(dec!(3)),
        ..Default::default()
    });

    let outcome = Dispatcher::new(repo).handle(&intent, "42", ymd(2024, 3, 10));
    let Outcome::Logged { record } = outcome else {
        panic!("expected Logged");
    };
    assert_eq!(record.category, "other");
}
