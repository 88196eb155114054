//! The summary card statistics and how they react to the month selection.
//!
//! The cards show one of two views: totals for a single month while that
//! month is selected and expanded, or totals for the current calendar year
//! the rest of the time. The yearly average is a "smart" average, it divides
//! by the number of months that actually contain expenses rather than by
//! twelve.

use std::collections::HashSet;

use crate::{date_format::MonthKey, expense::Expense, selection::SelectionState};

/// The numbers behind the dashboard's three summary cards.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Statistics {
    /// The sum of the amounts in scope.
    pub total: f64,
    /// The number of expenses in scope.
    pub count: usize,
    /// Per-expense average for a focused month, smart average for the year.
    pub average: f64,
    /// The focused month, if the statistics are month-scoped.
    pub focused_month: Option<MonthKey>,
}

/// Compute the summary statistics for the current selection.
///
/// When a month is selected *and* expanded the statistics cover just that
/// month (average per expense); otherwise they cover the expenses whose date
/// falls in `current_year` (smart average per active month). `expenses`
/// should already have the category filter applied.
pub(crate) fn select_statistics(
    expenses: &[&Expense],
    selection: &SelectionState,
    current_year: i32,
) -> Statistics {
    if let Some(month) = selection.selected_month.filter(|_| selection.is_month_focused()) {
        let month_expenses: Vec<&&Expense> = expenses
            .iter()
            .filter(|expense| MonthKey::from_date(expense.date) == month)
            .collect();

        let total: f64 = month_expenses.iter().map(|expense| expense.amount).sum();
        let count = month_expenses.len();
        let average = if count > 0 { total / count as f64 } else { 0.0 };

        return Statistics {
            total,
            count,
            average,
            focused_month: Some(month),
        };
    }

    let year_expenses: Vec<&Expense> = expenses
        .iter()
        .copied()
        .filter(|expense| expense.date.year() == current_year)
        .collect();

    Statistics {
        total: year_expenses.iter().map(|expense| expense.amount).sum(),
        count: year_expenses.len(),
        average: smart_average(&year_expenses),
        focused_month: None,
    }
}

/// The total amount divided by the number of distinct months with at least
/// one expense.
///
/// A year with expenses in only three months divides by three, not twelve,
/// so the average reflects months the user actually spent money in. Returns
/// zero for an empty list.
pub(crate) fn smart_average(expenses: &[&Expense]) -> f64 {
    if expenses.is_empty() {
        return 0.0;
    }

    let active_months: HashSet<MonthKey> = expenses
        .iter()
        .map(|expense| MonthKey::from_date(expense.date))
        .collect();

    let total: f64 = expenses.iter().map(|expense| expense.amount).sum();

    total / active_months.len() as f64
}
