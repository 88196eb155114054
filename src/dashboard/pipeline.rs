//! The category filter and single-column sort applied to the expense list.
//!
//! The filter runs before the sort, both are pure, and the sort is stable:
//! the same inputs always produce the same output order.

use std::cmp::Ordering;

use crate::{
    category::Category,
    expense::Expense,
    selection::{SortColumn, SortConfig, SortDirection},
};

/// Keep only the expenses in `category`, or all of them when no filter is set.
///
/// The match is exact and case sensitive, the same comparison the category
/// filter dropdown produces.
pub(crate) fn filter_by_category<'a>(
    expenses: &'a [Expense],
    category: Option<&Category>,
) -> Vec<&'a Expense> {
    match category {
        Some(category) => expenses
            .iter()
            .filter(|expense| expense.category == *category)
            .collect(),
        None => expenses.iter().collect(),
    }
}

/// Stable-sort `expenses` by a single column.
///
/// Dates compare chronologically, amounts numerically, and the two text
/// columns with a case-insensitive lexicographic comparison. A descending
/// sort reverses the ascending comparator.
pub(crate) fn sort_expenses(expenses: &mut [&Expense], sort: SortConfig) {
    expenses.sort_by(|a, b| {
        let ascending = match sort.column {
            SortColumn::Date => a.date.cmp(&b.date),
            SortColumn::Category => compare_text(a.category.as_str(), b.category.as_str()),
            SortColumn::Amount => a.amount.total_cmp(&b.amount),
            SortColumn::Description => compare_text(&a.description, &b.description),
        };

        match sort.direction {
            SortDirection::Asc => ascending,
            SortDirection::Desc => ascending.reverse(),
        }
    });
}

/// Case-insensitive lexicographic string comparison, so "apples" sorts
/// before "Bananas" the way a user expects.
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use time::{Date, macros::date};

    use crate::{
        category::Category,
        expense::Expense,
        selection::{SortColumn, SortConfig, SortDirection},
        user::UserID,
    };

    use super::{filter_by_category, sort_expenses};

    fn create_test_expense(
        description: &str,
        amount: f64,
        date: Date,
        category: Category,
    ) -> Expense {
        Expense {
            id: 0,
            user_id: UserID::new(1),
            description: description.to_owned(),
            amount,
            category,
            date,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn sample_expenses() -> Vec<Expense> {
        vec![
            create_test_expense("groceries", 10.0, date!(2025 - 03 - 01), Category::Food),
            create_test_expense("dinner out", 20.0, date!(2025 - 03 - 15), Category::Food),
            create_test_expense("fuel", 5.0, date!(2025 - 03 - 02), Category::Gas),
        ]
    }

    #[test]
    fn no_filter_keeps_every_expense() {
        let expenses = sample_expenses();

        let filtered = filter_by_category(&expenses, None);

        assert_eq!(filtered.len(), expenses.len());
    }

    #[test]
    fn filter_keeps_only_the_matching_category() {
        let expenses = sample_expenses();

        let filtered = filter_by_category(&expenses, Some(&Category::Gas));

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].description, "fuel");
    }

    #[test]
    fn filter_is_case_sensitive() {
        let expenses = vec![create_test_expense(
            "odd one",
            1.0,
            date!(2025 - 03 - 01),
            Category::Other("food".to_owned()),
        )];

        let filtered = filter_by_category(&expenses, Some(&Category::Food));

        assert!(filtered.is_empty());
    }

    #[test]
    fn filter_then_sort_by_amount_descending() {
        // Filtering by Gas then sorting by amount leaves exactly the fuel expense.
        let expenses = sample_expenses();

        let mut filtered = filter_by_category(&expenses, Some(&Category::Gas));
        sort_expenses(
            &mut filtered,
            SortConfig {
                column: SortColumn::Amount,
                direction: SortDirection::Desc,
            },
        );

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].amount, 5.0);
    }

    #[test]
    fn sorts_by_date_chronologically() {
        let expenses = sample_expenses();
        let mut refs: Vec<&_> = expenses.iter().collect();

        sort_expenses(
            &mut refs,
            SortConfig {
                column: SortColumn::Date,
                direction: SortDirection::Asc,
            },
        );

        let dates: Vec<Date> = refs.iter().map(|expense| expense.date).collect();
        assert_eq!(
            dates,
            vec![
                date!(2025 - 03 - 01),
                date!(2025 - 03 - 02),
                date!(2025 - 03 - 15)
            ]
        );
    }

    #[test]
    fn descending_reverses_the_ascending_order() {
        let expenses = sample_expenses();

        let mut ascending: Vec<&_> = expenses.iter().collect();
        sort_expenses(
            &mut ascending,
            SortConfig {
                column: SortColumn::Amount,
                direction: SortDirection::Asc,
            },
        );

        let mut descending: Vec<&_> = expenses.iter().collect();
        sort_expenses(
            &mut descending,
            SortConfig {
                column: SortColumn::Amount,
                direction: SortDirection::Desc,
            },
        );

        let mut reversed = ascending.clone();
        reversed.reverse();
        assert_eq!(
            descending
                .iter()
                .map(|expense| expense.amount)
                .collect::<Vec<_>>(),
            reversed
                .iter()
                .map(|expense| expense.amount)
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn sort_is_idempotent() {
        let expenses = vec![
            create_test_expense("a", 10.0, date!(2025 - 03 - 01), Category::Food),
            create_test_expense("b", 10.0, date!(2025 - 03 - 02), Category::Gas),
            create_test_expense("c", 5.0, date!(2025 - 03 - 03), Category::Car),
        ];
        let sort = SortConfig {
            column: SortColumn::Amount,
            direction: SortDirection::Asc,
        };

        let mut once: Vec<&_> = expenses.iter().collect();
        sort_expenses(&mut once, sort);

        let mut twice = once.clone();
        sort_expenses(&mut twice, sort);

        let descriptions =
            |refs: &[&Expense]| refs.iter().map(|e| e.description.clone()).collect::<Vec<_>>();
        assert_eq!(descriptions(&once), descriptions(&twice));
        // The equal amounts kept their relative order.
        assert_eq!(descriptions(&once), vec!["c", "a", "b"]);
    }

    #[test]
    fn text_sort_ignores_case() {
        let expenses = vec![
            create_test_expense("Zebra crossing fee", 1.0, date!(2025 - 03 - 01), Category::Car),
            create_test_expense("apples", 2.0, date!(2025 - 03 - 02), Category::Food),
        ];
        let mut refs: Vec<&_> = expenses.iter().collect();

        sort_expenses(
            &mut refs,
            SortConfig {
                column: SortColumn::Description,
                direction: SortDirection::Asc,
            },
        );

        assert_eq!(refs[0].description, "apples");
        assert_eq!(refs[1].description, "Zebra crossing fee");
    }
}
