//! The month cards, category breakdowns and expense tables on the dashboard.

use maud::{Markup, html};

use crate::{
    dashboard::{
        aggregation::{CategoryBreakdownEntry, CategorySummary, MonthGroup, category_breakdown},
        handlers::DashboardQuery,
    },
    endpoints,
    endpoints::format_endpoint,
    expense::Expense,
    html::{
        BADGE_BASE_STYLE, BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, LINK_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_eur, format_lev,
        lev_with_eur_tooltip, truncate_text,
    },
    selection::{SelectionState, SortColumn, SortDirection},
};

/// How many characters of a description to show in the table before cutting off.
const DESCRIPTION_DISPLAY_LIMIT: usize = 60;

/// The category filter dropdown, with a clear link while a filter is active.
///
/// Changing the dropdown submits the form, which reloads the dashboard with
/// the new `filter` query parameter and drops any month selection, since the
/// month list changes under a different filter.
pub(super) fn filter_controls(categories: &[CategorySummary], query: &DashboardQuery) -> Markup {
    html! {
        div class="flex items-center gap-4 flex-wrap mt-6"
        {
            span class="text-sm font-medium" { "Filters:" }

            form method="get" action=(endpoints::DASHBOARD_VIEW) class="flex items-center gap-2"
            {
                @if let Some(sort) = query.sort {
                    input type="hidden" name="sort" value=(serde_variant_name(sort));
                }
                @if let Some(direction) = query.direction {
                    input type="hidden" name="direction" value=(direction_name(direction));
                }

                select
                    name="filter"
                    onchange="this.form.submit()"
                    class="p-2 rounded border border-gray-300 dark:border-gray-600
                        bg-gray-50 dark:bg-gray-700 text-sm text-gray-900 dark:text-white"
                {
                    option value="" { "All categories" }

                    @for summary in categories {
                        @if query.filter.as_deref() == Some(summary.category.as_str()) {
                            option value=(summary.category) selected { (summary.category) }
                        } @else {
                            option value=(summary.category) { (summary.category) }
                        }
                    }
                }
            }

            @if query.filter.is_some() {
                a
                    href=(DashboardQuery { filter: None, ..query.clone() }.to_url())
                    class=(LINK_STYLE)
                {
                    "Clear filter"
                }
            }
        }
    }
}

/// One month's card: a clickable header with the count and total, and the
/// category breakdown plus expense table while the month is expanded.
pub(super) fn month_group_view(
    group: &MonthGroup<'_>,
    selection: &SelectionState,
    query: &DashboardQuery,
) -> Markup {
    let is_expanded = selection.expanded_months.contains(&group.key);
    let is_selected = selection.selected_month == Some(group.key);
    // Only highlight when both selected and expanded, matching the summary cards.
    let show_as_selected = is_selected && is_expanded;

    let card_style = if show_as_selected {
        "bg-white dark:bg-gray-800 rounded-lg shadow-lg ring-2 ring-blue-500 overflow-hidden"
    } else {
        "bg-white dark:bg-gray-800 rounded-lg shadow-sm overflow-hidden"
    };

    let chevron = if is_expanded { "▼" } else { "▶" };
    let transactions_label = if group.expenses.len() == 1 {
        "1 transaction".to_owned()
    } else {
        format!("{} transactions", group.expenses.len())
    };
    let total = group.total();

    html! {
        div class=(card_style)
        {
            a
                href=(query.with_month_clicked(group.key).to_url())
                class="flex items-center justify-between p-4 hover:bg-gray-50
                    dark:hover:bg-gray-700 transition-colors"
            {
                div class="flex items-center gap-3"
                {
                    span class="text-gray-500" { (chevron) }

                    div
                    {
                        h3 class="text-lg font-semibold" { (group.key.display_name()) }
                        p class="text-sm text-gray-600 dark:text-gray-400" { (transactions_label) }
                    }
                }

                div class="text-right"
                {
                    div class="text-xl font-bold" { (format_lev(total)) }
                    div class="text-sm text-gray-500" { (format_eur(total)) }
                }
            }

            @if is_expanded {
                div class="p-4 pt-0 space-y-6"
                {
                    (breakdown_view(&category_breakdown(&group.expenses)))

                    (expense_table(&group.expenses, query))
                }
            }
        }
    }
}

/// The per-category breakdown grid for an expanded month.
fn breakdown_view(breakdown: &[CategoryBreakdownEntry]) -> Markup {
    html! {
        div class="space-y-3"
        {
            h4 class="text-sm font-semibold text-gray-700 dark:text-gray-300"
            {
                "Category Breakdown"
            }

            div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-3"
            {
                @for entry in breakdown {
                    div class="p-3 bg-white dark:bg-gray-900 border border-gray-200
                        dark:border-gray-700 rounded-lg"
                    {
                        div class="flex items-center justify-between mb-2"
                        {
                            span class=(format!("{BADGE_BASE_STYLE} {}", entry.category.badge_class()))
                            {
                                (entry.category)
                            }

                            span class="text-xs text-gray-500"
                            {
                                (entry.count) " " (if entry.count == 1 { "expense" } else { "expenses" })
                            }
                        }

                        div class="flex items-baseline justify-between"
                        {
                            span class="text-lg font-bold" { (format_lev(entry.total)) }
                            span class="text-sm font-medium text-gray-600 dark:text-gray-400"
                            {
                                (format!("{:.1}%", entry.percentage))
                            }
                        }

                        div class="text-xs text-gray-500" { (format_eur(entry.total)) }

                        div class="w-full bg-gray-200 dark:bg-gray-700 rounded-full h-4 mt-2"
                        {
                            div
                                class=(format!("h-4 rounded-full {}", entry.category.bar_class()))
                                style=(format!("width: {:.1}%", entry.percentage.clamp(0.0, 100.0)))
                            {}
                        }
                    }
                }
            }
        }
    }
}

/// The expense table for an expanded month, with sortable column headers.
fn expense_table(expenses: &[&Expense], query: &DashboardQuery) -> Markup {
    html! {
        div class="overflow-x-auto"
        {
            table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            (sort_header("Description", SortColumn::Description, query))
                        }
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            (sort_header("Category", SortColumn::Category, query))
                        }
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            (sort_header("Date", SortColumn::Date, query))
                        }
                        th scope="col" class=(TABLE_CELL_STYLE)
                        {
                            (sort_header("Amount", SortColumn::Amount, query))
                        }
                        th scope="col" class=(TABLE_CELL_STYLE) {}
                    }
                }

                tbody
                {
                    @for expense in expenses {
                        (expense_row(expense))
                    }
                }
            }
        }
    }
}

/// A column header that toggles the sort when clicked.
fn sort_header(title: &str, column: SortColumn, query: &DashboardQuery) -> Markup {
    let selection_sort = query.selection().sort;
    let indicator = if selection_sort.column == column {
        match selection_sort.direction {
            SortDirection::Asc => " ↑",
            SortDirection::Desc => " ↓",
        }
    } else {
        ""
    };

    html! {
        a
            href=(query.with_sort_toggled(column).to_url())
            class="hover:text-gray-900 dark:hover:text-white"
        {
            (title) (indicator)
        }
    }
}

fn expense_row(expense: &Expense) -> Markup {
    html! {
        tr class=(TABLE_ROW_STYLE)
        {
            td class=(TABLE_CELL_STYLE)
            {
                span
                    class="font-medium text-gray-900 dark:text-white"
                    title=(expense.description)
                {
                    (truncate_text(&expense.description, DESCRIPTION_DISPLAY_LIMIT))
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(format!("{BADGE_BASE_STYLE} {}", expense.category.badge_class()))
                {
                    (expense.category)
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                (crate::date_format::format_display_date(expense.date))
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="font-bold text-gray-900 dark:text-white"
                {
                    (lev_with_eur_tooltip(expense.amount))
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                div class="flex items-center gap-2"
                {
                    a
                        href=(format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id))
                        class=(LINK_STYLE)
                    {
                        "Edit"
                    }

                    button
                        hx-post=(format_endpoint(endpoints::DUPLICATE_EXPENSE, expense.id))
                        hx-target-error="#alert-container"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Duplicate"
                    }

                    button
                        hx-delete=(format_endpoint(endpoints::EXPENSE, expense.id))
                        hx-confirm="Delete this expense?"
                        hx-target-error="#alert-container"
                        class=(BUTTON_DELETE_STYLE)
                    {
                        "Delete"
                    }
                }
            }
        }
    }
}

fn serde_variant_name(column: SortColumn) -> &'static str {
    match column {
        SortColumn::Date => "date",
        SortColumn::Category => "category",
        SortColumn::Amount => "amount",
        SortColumn::Description => "description",
    }
}

fn direction_name(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}
