//! The charts page: category selector cards and the monthly spending chart.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use charming::{
    Chart,
    component::{Axis, Grid, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::Line,
};
use maud::{Markup, PreEscaped, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    category::Category,
    charts::series::{CategorySeries, MONTH_LABELS, build_category_series},
    dashboard::{CategorySummary, category_summary},
    expense::get_all_expenses,
    html::{
        BADGE_BASE_STYLE, HeadElement, PAGE_CONTAINER_STYLE, base, format_lev,
    },
    navigation::NavBar,
    timezone::get_local_offset,
    user::UserID,
};

/// The state needed for displaying the charts page.
#[derive(Debug, Clone)]
pub struct ChartsState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Sofia".
    pub local_timezone: String,
}

impl FromRef<AppState> for ChartsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The charts page query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ChartsQuery {
    /// The category whose chart is shown; defaults to the biggest spender.
    pub category: Option<String>,
}

/// Display the charts page for the selected category.
pub async fn get_charts_page(
    State(state): State<ChartsState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<ChartsQuery>,
) -> Result<Response, Error> {
    let local_timezone = get_local_offset(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;
    let current_year = OffsetDateTime::now_utc().to_offset(local_timezone).year();

    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get expenses: {error}"))?
    };

    let nav_bar = NavBar::new(endpoints::CHARTS_VIEW);

    let categories = category_summary(&expenses);
    if categories.is_empty() {
        return Ok(charts_no_data_view(nav_bar).into_response());
    }

    let all_series = build_category_series(&expenses, current_year);

    // Fall back to the biggest category when the query names an unknown one.
    let selected = query
        .category
        .as_deref()
        .map(Category::from)
        .filter(|category| {
            categories
                .iter()
                .any(|summary| summary.category == *category)
        })
        .unwrap_or_else(|| categories[0].category.clone());

    let selected_series = all_series
        .iter()
        .find(|series| series.category == selected)
        .cloned()
        .unwrap_or(CategorySeries {
            category: selected.clone(),
            amounts: [0.0; 12],
        });

    let chart_options = monthly_spending_chart(&selected_series).to_string();

    Ok(charts_view(nav_bar, &categories, &selected, &chart_options).into_response())
}

/// Renders the charts page when no expense data exists.
fn charts_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            h2 class="text-xl font-bold" { "No expense data available yet" }

            p
            {
                "Start adding expenses to see your category breakdown."
            }
        }
    );

    base("Charts", &[], &content)
}

/// Renders the charts page: one selector card per category and the chart for
/// the selected one.
fn charts_view(
    nav_bar: NavBar,
    categories: &[CategorySummary],
    selected: &Category,
    chart_options: &str,
) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                h1 class="text-2xl font-bold mb-1" { "Charts" }
                p class="text-gray-600 dark:text-gray-400 mb-6"
                {
                    "Breakdown of spending by category"
                }

                div class="grid grid-cols-2 md:grid-cols-4 gap-3 mb-6"
                {
                    @for summary in categories {
                        (category_card(summary, summary.category == *selected))
                    }
                }

                div
                    id="category-chart"
                    class="min-h-[380px] w-full bg-white rounded-lg border p-2 dark:bg-gray-100"
                {}
            }
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        chart_script("category-chart", chart_options),
    ];

    base("Charts", &scripts, &content)
}

/// A selector card showing a category's total and count, linking to its chart.
fn category_card(summary: &CategorySummary, is_selected: bool) -> Markup {
    let card_style = if is_selected {
        "p-3 rounded-lg border border-blue-500 bg-blue-50 dark:bg-blue-900/20 block"
    } else {
        "p-3 rounded-lg border border-gray-200 dark:border-gray-700 hover:border-blue-300 block"
    };

    let url = format!(
        "{}?category={}",
        endpoints::CHARTS_VIEW,
        summary.category.as_str()
    );

    html!(
        a href=(url) class=(card_style)
        {
            div class="space-y-1"
            {
                span class=(format!("{BADGE_BASE_STYLE} {}", summary.category.badge_class()))
                {
                    (summary.category)
                }

                div class="text-sm font-semibold" { (format_lev(summary.total_amount)) }

                div class="text-xs text-gray-500"
                {
                    (summary.count) " " (if summary.count == 1 { "expense" } else { "expenses" })
                }
            }
        }
    )
}

/// Generates the JavaScript that initialises the ECharts instance.
fn chart_script(chart_id: &str, chart_options: &str) -> HeadElement {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chartDom = document.getElementById("{chart_id}");
            const chart = echarts.init(chartDom);
            const option = {chart_options};
            chart.setOption(option);

            window.addEventListener('resize', chart.resize);
        }});"#
    );

    HeadElement::ScriptSource(PreEscaped(script))
}

/// The twelve month line chart for one category's spending.
fn monthly_spending_chart(series: &CategorySeries) -> Chart {
    let labels: Vec<String> = MONTH_LABELS.iter().map(|label| label.to_string()).collect();
    let values: Vec<f64> = series.amounts.to_vec();

    Chart::new()
        .title(
            Title::new()
                .text(format!("{} Spending", series.category))
                .subtext("Monthly spending throughout the year"),
        )
        .tooltip(lev_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(lev_formatter())),
        )
        .series(Line::new().name(series.category.as_str()).data(values))
}

#[inline]
fn lev_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "return (number || number === 0) ? number.toFixed(2) + ' лв' : '-';",
    )
}

/// Creates a tooltip configuration for лв values
fn lev_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(lev_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
