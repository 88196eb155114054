//! The dashboard's three summary cards.
//!
//! The card labels change depending on whether a month is focused: the
//! month view shows its total, transaction count and per-expense average,
//! while the year view shows the year total, count and the per-active-month
//! average. Every amount carries its € conversion underneath.

use maud::{Markup, html};

use crate::{
    dashboard::statistics::Statistics,
    html::{format_eur, format_lev},
};

const CARD_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-4 shadow-md";

const CARD_FOCUSED_STYLE: &str = "bg-blue-50 dark:bg-blue-900/20 border border-blue-200 \
    dark:border-blue-800 rounded-lg p-4 shadow-md";

const CARD_TITLE_STYLE: &str = "text-sm font-medium text-gray-600 dark:text-gray-400";

const CARD_VALUE_STYLE: &str = "text-2xl font-bold text-gray-900 dark:text-white";

const CARD_SUBTEXT_STYLE: &str = "text-sm text-gray-500 dark:text-gray-400";

/// Render the three summary cards for `statistics`.
pub(super) fn summary_cards(statistics: &Statistics) -> Markup {
    let month_focused = statistics.focused_month.is_some();
    let card_style = if month_focused {
        CARD_FOCUSED_STYLE
    } else {
        CARD_STYLE
    };

    let (total_title, count_title, count_subtext, average_title) = if month_focused {
        ("Month Total", "Transactions", "expenses", "Avg per Expense")
    } else {
        (
            "Total Spent (This Year)",
            "This Year",
            "total expenses",
            "Monthly Average",
        )
    };

    html! {
        div class="grid grid-cols-1 md:grid-cols-3 gap-6"
        {
            div class=(card_style)
            {
                div class=(CARD_TITLE_STYLE) { (total_title) }
                div class=(CARD_VALUE_STYLE) { (format_lev(statistics.total)) }
                div class=(CARD_SUBTEXT_STYLE) { (format_eur(statistics.total)) }
            }

            div class=(card_style)
            {
                div class=(CARD_TITLE_STYLE) { (count_title) }
                div class=(CARD_VALUE_STYLE) { (statistics.count) }
                div class=(CARD_SUBTEXT_STYLE) { (count_subtext) }
            }

            div class=(card_style)
            {
                div class=(CARD_TITLE_STYLE) { (average_title) }
                div class=(CARD_VALUE_STYLE) { (format_lev(statistics.average)) }
                div class=(CARD_SUBTEXT_STYLE) { (format_eur(statistics.average)) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{dashboard::statistics::Statistics, date_format::MonthKey};

    use super::summary_cards;

    #[test]
    fn year_view_uses_the_year_labels() {
        let statistics = Statistics {
            total: 150.0,
            count: 2,
            average: 75.0,
            focused_month: None,
        };

        let html = summary_cards(&statistics).into_string();

        assert!(html.contains("Total Spent (This Year)"));
        assert!(html.contains("Monthly Average"));
        assert!(html.contains("150.00 лв"));
        assert!(html.contains("€76.53"));
    }

    #[test]
    fn month_view_uses_the_month_labels() {
        let statistics = Statistics {
            total: 35.0,
            count: 3,
            average: 35.0 / 3.0,
            focused_month: Some(MonthKey::from_date(date!(2025 - 03 - 01))),
        };

        let html = summary_cards(&statistics).into_string();

        assert!(html.contains("Month Total"));
        assert!(html.contains("Avg per Expense"));
        assert!(html.contains("35.00 лв"));
        assert!(html.contains("11.67 лв"));
    }
}
