//! Per-category spending totals

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{ExpenseRecord, UNCATEGORIZED};

/// Spending in one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Decimal,
    pub transaction_count: usize,
}

/// Category totals in first-seen order, plus the grand total
///
/// Callers that derive percentages from `total` must handle a zero total;
/// [`CategorySummary::share_of`] returns `None` in that case instead of dividing.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CategorySummary {
    pub categories: Vec<CategoryTotal>,
    pub total: Decimal,
}

impl CategorySummary {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Amount spent in `category`, if it appears
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.categories
            .iter()
            .find(|c| c.category == category)
            .map(|c| c.amount)
    }

    /// Percentage of the total that `amount` represents
    pub fn share_of(&self, amount: Decimal) -> Option<Decimal> {
        amount
            .checked_div(self.total)
            .map(|ratio| ratio * Decimal::ONE_HUNDRED)
    }

    /// Categories sorted by amount, largest first (stable for equal amounts)
    pub fn by_amount_desc(&self) -> Vec<&CategoryTotal> {
        let mut sorted: Vec<&CategoryTotal> = self.categories.iter().collect();
        sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
        sorted
    }
}

/// Sum records per category in a single pass
pub fn summarize<'a, I>(records: I) -> CategorySummary
where
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut summary = CategorySummary::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let category = match record.category.trim() {
            "" => UNCATEGORIZED,
            c => c,
        };

        let slot = *index.entry(category.to_string()).or_insert_with(|| {
            summary.categories.push(CategoryTotal {
                category: category.to_string(),
                amount: Decimal::ZERO,
                transaction_count: 0,
            });
            summary.categories.len() - 1
        });

        let entry = &mut summary.categories[slot];
        entry.amount += record.amount;
        entry.transaction_count += 1;
        summary.total += record.amount;
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn record(id: i64, category: &str, amount: Decimal) -> ExpenseRecord {
        ExpenseRecord {
            id,
            user_id: "u1".to_string(),
            amount,
            category: category.to_string(),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&Vec::<ExpenseRecord>::new());
        assert!(summary.is_empty());
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.share_of(dec!(10)), None);
    }

    #[test]
    fn test_summarize_first_seen_order() {
        let records = vec![
            record(1, "tea", dec!(20)),
            record(2, "coffee", dec!(50)),
            record(3, "tea", dec!(15.50)),
            record(4, "food", dec!(120)),
        ];
        let summary = summarize(&records);

        let order: Vec<&str> = summary
            .categories
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(order, vec!["tea", "coffee", "food"]);
        assert_eq!(summary.get("tea"), Some(dec!(35.50)));
        assert_eq!(summary.categories[0].transaction_count, 2);
        assert_eq!(summary.total, dec!(205.50));
    }

    #[test]
    fn test_total_is_order_independent() {
        let mut records = vec![
            record(1, "a", dec!(0.10)),
            record(2, "b", dec!(0.20)),
            record(3, "c", dec!(0.30)),
        ];
        let forward = summarize(&records).total;
        records.reverse();
        let backward = summarize(&records);
        assert_eq!(forward, dec!(0.60));
        assert_eq!(backward.total, forward);
        assert_eq!(backward.categories[0].category, "c");
    }

    #[test]
    fn test_no_drift_under_repeated_summation() {
        let records: Vec<ExpenseRecord> =
            (0..1000).map(|i| record(i, "coffee", dec!(0.1))).collect();
        assert_eq!(summarize(&records).total, dec!(100));
    }

    #[test]
    fn test_blank_category_is_uncategorized() {
        let records = vec![record(1, "", dec!(5)), record(2, "   ", dec!(7))];
        let summary = summarize(&records);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get(UNCATEGORIZED), Some(dec!(12)));
    }

    #[test]
    fn test_share_and_sorting() {
        let records = vec![record(1, "tea", dec!(25)), record(2, "food", dec!(75))];
        let summary = summarize(&records);
        assert_eq!(summary.share_of(dec!(25)), Some(dec!(25)));

        let sorted: Vec<&str> = summary
            .by_amount_desc()
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(sorted, vec!["food", "tea"]);
    }
}
