//! Building the per-category monthly series for the charts page.

use time::Date;

use crate::{
    category::Category,
    dashboard::category_summary,
    expense::Expense,
};

/// The three-letter labels for the chart's x axis, January through December.
pub(crate) const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One category's monthly spending over the current year.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategorySeries {
    /// The category the series belongs to.
    pub category: Category,
    /// The amount spent in each month, January through December.
    pub amounts: [f64; 12],
}

/// Build a January-to-December series for every category in the dataset.
///
/// Each series starts at zero for all twelve months and accumulates the
/// amounts of the expenses dated in `current_year`. Categories that only
/// have activity in other years still get a series (all zeros), so the
/// charts page can show every category the user has ever used. Series are
/// ordered by all-time category total, highest first, matching the
/// selector cards.
pub(crate) fn build_category_series(
    expenses: &[Expense],
    current_year: i32,
) -> Vec<CategorySeries> {
    let mut series: Vec<CategorySeries> = category_summary(expenses)
        .into_iter()
        .map(|summary| CategorySeries {
            category: summary.category,
            amounts: [0.0; 12],
        })
        .collect();

    for expense in expenses {
        if expense.date.year() != current_year {
            continue;
        }

        if let Some(entry) = series
            .iter_mut()
            .find(|entry| entry.category == expense.category)
        {
            entry.amounts[month_index(expense.date)] += expense.amount;
        }
    }

    series
}

/// The zero-based month bucket for `date` (January = 0).
fn month_index(date: Date) -> usize {
    date.month() as usize - 1
}
