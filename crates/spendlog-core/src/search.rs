//! Free-text search over a user's expenses
//!
//! Matching is a case-insensitive substring test against category and
//! description. Synonyms ("cappuccino" for "coffee") are expected to be
//! normalized by the interpretation service before the item reaches here.

use std::cmp::Reverse;

use crate::models::{ExpenseRecord, ResolvedWindow};

/// Records belonging to `user_id`, dated inside `window`, whose category or
/// description contains `item`
///
/// An empty `item` matches every record in the window. Results are ordered
/// most recent date first, then most recently logged.
pub fn search(
    user_id: &str,
    item: &str,
    window: &ResolvedWindow,
    records: &[ExpenseRecord],
) -> Vec<ExpenseRecord> {
    let needle = item.trim().to_lowercase();

    let mut matches: Vec<ExpenseRecord> = records
        .iter()
        .filter(|r| r.user_id == user_id && window.contains(r.date))
        .filter(|r| matches_item(r, &needle))
        .cloned()
        .collect();

    sort_most_recent_first(&mut matches);
    matches
}

/// Whether a record matches an already-lowercased needle
pub fn matches_item(record: &ExpenseRecord, needle: &str) -> bool {
    needle.is_empty()
        || record.category.to_lowercase().contains(needle)
        || record.description.to_lowercase().contains(needle)
}

/// Order by date, then logged_at, then id; newest first
pub fn sort_most_recent_first(records: &mut [ExpenseRecord]) {
    records.sort_by_key(|r| Reverse((r.date, r.logged_at, r.id)));
}
