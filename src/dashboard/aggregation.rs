//! Pure aggregation functions over a list of expenses.
//!
//! Everything in this module is a plain function of its inputs: the handlers
//! fetch the expense list once, then derive month groups, totals and
//! category breakdowns from it without touching the database again.

use crate::{category::Category, date_format::MonthKey, expense::Expense};

/// A month's worth of expenses.
#[derive(Debug, PartialEq)]
pub(crate) struct MonthGroup<'a> {
    /// The month the group covers.
    pub key: MonthKey,
    /// The expenses in the month, in the same relative order as the input.
    pub expenses: Vec<&'a Expense>,
}

impl MonthGroup<'_> {
    /// The sum of the group's expense amounts.
    pub fn total(&self) -> f64 {
        month_total(&self.expenses)
    }
}

/// Partition expenses into per-month groups, newest month first.
///
/// Every input expense lands in exactly one group. The relative order of
/// expenses within a group matches their order in the input; this step never
/// re-sorts them, that is the sort pipeline's job.
pub(crate) fn group_by_month<'a>(expenses: &[&'a Expense]) -> Vec<MonthGroup<'a>> {
    let mut groups: Vec<MonthGroup> = Vec::new();

    for &expense in expenses {
        let key = MonthKey::from_date(expense.date);

        match groups.iter_mut().find(|group| group.key == key) {
            Some(group) => group.expenses.push(expense),
            None => groups.push(MonthGroup {
                key,
                expenses: vec![expense],
            }),
        }
    }

    groups.sort_by(|a, b| b.key.cmp(&a.key));
    groups
}

/// The sum of the amounts of `expenses`.
pub(crate) fn month_total(expenses: &[&Expense]) -> f64 {
    expenses.iter().map(|expense| expense.amount).sum()
}

/// A category's share of a month group.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryBreakdownEntry {
    /// The category.
    pub category: Category,
    /// The sum of the category's expense amounts within the group.
    pub total: f64,
    /// The number of expenses in the category within the group.
    pub count: usize,
    /// The category's share of the group total, in percent (0 when the
    /// group total is zero).
    pub percentage: f64,
}

/// The per-category totals, counts and percentages for one month group,
/// sorted by total from highest to lowest.
///
/// The sort is stable, so categories with equal totals keep the order in
/// which they first appear in the input.
pub(crate) fn category_breakdown(expenses: &[&Expense]) -> Vec<CategoryBreakdownEntry> {
    let group_total = month_total(expenses);

    let mut breakdown: Vec<CategoryBreakdownEntry> = Vec::new();

    for expense in expenses {
        match breakdown
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            Some(entry) => {
                entry.total += expense.amount;
                entry.count += 1;
            }
            None => breakdown.push(CategoryBreakdownEntry {
                category: expense.category.clone(),
                total: expense.amount,
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    for entry in &mut breakdown {
        entry.percentage = if group_total > 0.0 {
            (entry.total / group_total) * 100.0
        } else {
            0.0
        };
    }

    breakdown.sort_by(|a, b| b.total.total_cmp(&a.total));
    breakdown
}

/// A category's totals over the whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySummary {
    /// The category.
    pub category: Category,
    /// The sum of all the category's expense amounts.
    pub total_amount: f64,
    /// The number of expenses in the category.
    pub count: usize,
}

/// Per-category totals over all of `expenses`, sorted by total from highest
/// to lowest.
///
/// This drives the category filter and the charts page selector, so it
/// covers every category that appears anywhere in the data.
pub(crate) fn category_summary(expenses: &[Expense]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for expense in expenses {
        match summaries
            .iter_mut()
            .find(|summary| summary.category == expense.category)
        {
            Some(summary) => {
                summary.total_amount += expense.amount;
                summary.count += 1;
            }
            None => summaries.push(CategorySummary {
                category: expense.category.clone(),
                total_amount: expense.amount,
                count: 1,
            }),
        }
    }

    summaries.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    summaries
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        category::Category,
        expense::Expense,
        user::UserID,
    };

    use super::{category_breakdown, category_summary, group_by_month, month_total};

    fn create_test_expense(amount: f64, date: Date, category: Category) -> Expense {
        Expense {
            id: 0,
            user_id: UserID::new(1),
            description: "test".to_owned(),
            amount,
            category,
            date,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn march_expenses() -> Vec<Expense> {
        vec![
            create_test_expense(10.0, date!(2025 - 03 - 01), Category::Food),
            create_test_expense(20.0, date!(2025 - 03 - 15), Category::Food),
            create_test_expense(5.0, date!(2025 - 03 - 02), Category::Gas),
        ]
    }

    #[test]
    fn group_by_month_is_a_partition() {
        let expenses = vec![
            create_test_expense(100.0, date!(2025 - 01 - 15), Category::Food),
            create_test_expense(50.0, date!(2025 - 01 - 20), Category::Gas),
            create_test_expense(30.0, date!(2025 - 02 - 10), Category::Food),
            create_test_expense(70.0, date!(2024 - 12 - 31), Category::Car),
        ];

        let refs: Vec<&_> = expenses.iter().collect();
        let groups = group_by_month(&refs);

        let total_count: usize = groups.iter().map(|group| group.expenses.len()).sum();
        assert_eq!(total_count, expenses.len());
        assert_eq!(groups.len(), 3);
    }

    #[test]
    fn group_by_month_is_newest_first() {
        let expenses = vec![
            create_test_expense(100.0, date!(2025 - 01 - 15), Category::Food),
            create_test_expense(30.0, date!(2025 - 02 - 10), Category::Food),
            create_test_expense(70.0, date!(2024 - 12 - 31), Category::Car),
        ];

        let refs: Vec<&_> = expenses.iter().collect();
        let groups = group_by_month(&refs);

        let keys: Vec<String> = groups.iter().map(|group| group.key.to_string()).collect();
        assert_eq!(keys, vec!["2025-02", "2025-01", "2024-12"]);
    }

    #[test]
    fn group_by_month_keeps_input_order_within_a_group() {
        let expenses = vec![
            create_test_expense(3.0, date!(2025 - 03 - 30), Category::Food),
            create_test_expense(1.0, date!(2025 - 03 - 01), Category::Gas),
            create_test_expense(2.0, date!(2025 - 03 - 15), Category::Car),
        ];

        let refs: Vec<&_> = expenses.iter().collect();
        let groups = group_by_month(&refs);

        assert_eq!(groups.len(), 1);
        let amounts: Vec<f64> = groups[0]
            .expenses
            .iter()
            .map(|expense| expense.amount)
            .collect();
        // Input order, not date order.
        assert_eq!(amounts, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn group_by_month_handles_empty_input() {
        let groups = group_by_month(&[]);

        assert!(groups.is_empty());
    }

    #[test]
    fn breakdown_matches_the_spending_by_category() {
        let expenses = march_expenses();

        let refs: Vec<&_> = expenses.iter().collect();
        let groups = group_by_month(&refs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].key.to_string(), "2025-03");
        assert_eq!(groups[0].expenses.len(), 3);
        assert_eq!(groups[0].total(), 35.0);

        let breakdown = category_breakdown(&groups[0].expenses);
        assert_eq!(breakdown.len(), 2);

        assert_eq!(breakdown[0].category, Category::Food);
        assert_eq!(breakdown[0].total, 30.0);
        assert_eq!(breakdown[0].count, 2);
        assert!((breakdown[0].percentage - 85.71).abs() < 0.01);

        assert_eq!(breakdown[1].category, Category::Gas);
        assert_eq!(breakdown[1].total, 5.0);
        assert_eq!(breakdown[1].count, 1);
        assert!((breakdown[1].percentage - 14.29).abs() < 0.01);
    }

    #[test]
    fn breakdown_percentages_sum_to_one_hundred() {
        let expenses = vec![
            create_test_expense(12.5, date!(2025 - 03 - 01), Category::Food),
            create_test_expense(7.25, date!(2025 - 03 - 02), Category::Gas),
            create_test_expense(80.0, date!(2025 - 03 - 03), Category::Car),
            create_test_expense(0.25, date!(2025 - 03 - 04), Category::Barber),
        ];
        let refs: Vec<&_> = expenses.iter().collect();

        let breakdown = category_breakdown(&refs);

        let percentage_sum: f64 = breakdown.iter().map(|entry| entry.percentage).sum();
        assert!((percentage_sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn breakdown_is_sorted_descending_by_total() {
        let expenses = march_expenses();
        let refs: Vec<&_> = expenses.iter().collect();

        let breakdown = category_breakdown(&refs);

        for pair in breakdown.windows(2) {
            assert!(pair[0].total >= pair[1].total);
        }
    }

    #[test]
    fn breakdown_of_empty_group_is_empty() {
        let breakdown = category_breakdown(&[]);

        assert!(breakdown.is_empty());
    }

    #[test]
    fn breakdown_ties_keep_first_encounter_order() {
        let expenses = vec![
            create_test_expense(10.0, date!(2025 - 03 - 01), Category::Gas),
            create_test_expense(10.0, date!(2025 - 03 - 02), Category::Food),
        ];
        let refs: Vec<&_> = expenses.iter().collect();

        let breakdown = category_breakdown(&refs);

        assert_eq!(breakdown[0].category, Category::Gas);
        assert_eq!(breakdown[1].category, Category::Food);
    }

    #[test]
    fn month_total_of_empty_list_is_zero() {
        assert_eq!(month_total(&[]), 0.0);
    }

    #[test]
    fn summary_covers_all_categories_sorted_by_total() {
        let expenses = vec![
            create_test_expense(10.0, date!(2025 - 03 - 01), Category::Food),
            create_test_expense(200.0, date!(2024 - 07 - 01), Category::Car),
            create_test_expense(20.0, date!(2025 - 01 - 15), Category::Food),
        ];

        let summary = category_summary(&expenses);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].category, Category::Car);
        assert_eq!(summary[0].total_amount, 200.0);
        assert_eq!(summary[0].count, 1);
        assert_eq!(summary[1].category, Category::Food);
        assert_eq!(summary[1].total_amount, 30.0);
        assert_eq!(summary[1].count, 2);
    }
}
