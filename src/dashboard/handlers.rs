//! The dashboard HTTP handler and the URL query state it runs on.
//!
//! The dashboard has no client-side state: the category filter, sort order,
//! selected month and expanded months all live in the URL query string.
//! Every link on the page is a variation of the current query, built here.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use axum::{
    Extension,
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    AppState, Error, analytics, endpoints,
    category::Category,
    dashboard::{
        aggregation::group_by_month,
        cards::summary_cards,
        pipeline::{filter_by_category, sort_expenses},
        statistics::select_statistics,
        tables::{filter_controls, month_group_view},
    },
    date_format::MonthKey,
    expense::get_all_expenses,
    html::{PAGE_CONTAINER_STYLE, base, link},
    navigation::NavBar,
    selection::{SelectionState, SortColumn, SortConfig, SortDirection},
    timezone::get_local_offset,
    user::UserID,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Sofia".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The dashboard's view state as it appears in the URL query string.
///
/// `expanded` holds a comma-separated list of month keys so the whole state
/// round-trips through a flat set of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardQuery {
    /// The active category filter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// The active sort column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortColumn>,
    /// The active sort direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<SortDirection>,
    /// The selected month key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<String>,
    /// Comma-separated month keys whose tables are expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded: Option<String>,
}

impl DashboardQuery {
    /// Decode the query into the selection state the aggregation functions
    /// take. Unparseable month keys and empty filters are ignored.
    pub(crate) fn selection(&self) -> SelectionState {
        let filter_category = self
            .filter
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(Category::from);

        let sort = match (self.sort, self.direction) {
            (Some(column), Some(direction)) => SortConfig { column, direction },
            (Some(column), None) => SortConfig {
                column,
                ..Default::default()
            },
            _ => SortConfig::default(),
        };

        let selected_month = self.month.as_deref().and_then(|key| key.parse().ok());

        let expanded_months: HashSet<MonthKey> = self
            .expanded
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|key| key.parse().ok())
            .collect();

        SelectionState {
            filter_category,
            sort,
            selected_month,
            expanded_months,
        }
    }

    /// The dashboard URL for this query.
    pub(crate) fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query_string) if !query_string.is_empty() => {
                format!("{}?{}", endpoints::DASHBOARD_VIEW, query_string)
            }
            Ok(_) => endpoints::DASHBOARD_VIEW.to_owned(),
            Err(error) => {
                tracing::error!("could not serialize dashboard query: {error}");
                endpoints::DASHBOARD_VIEW.to_owned()
            }
        }
    }

    /// The query after clicking the header for `column`: the active column
    /// flips direction, any other column starts ascending.
    pub(crate) fn with_sort_toggled(&self, column: SortColumn) -> Self {
        let toggled = self.selection().sort.toggle(column);

        Self {
            sort: Some(toggled.column),
            direction: Some(toggled.direction),
            ..self.clone()
        }
    }

    /// The query after clicking the header of `month`'s card.
    ///
    /// Clicking a collapsed month expands and selects it; clicking the
    /// selected, expanded month collapses it and clears the selection;
    /// clicking an expanded but unselected month just selects it.
    pub(crate) fn with_month_clicked(&self, month: MonthKey) -> Self {
        let selection = self.selection();
        let mut expanded = selection.expanded_months.clone();

        let selected = if expanded.contains(&month) {
            if selection.selected_month == Some(month) {
                expanded.remove(&month);
                None
            } else {
                Some(month)
            }
        } else {
            expanded.insert(month);
            Some(month)
        };

        Self {
            month: selected.map(|key| key.to_string()),
            expanded: encode_expanded(&expanded),
            ..self.clone()
        }
    }

    /// The query after clicking "View All Months": the selection is cleared
    /// but the expanded months stay open.
    pub(crate) fn with_month_cleared(&self) -> Self {
        Self {
            month: None,
            ..self.clone()
        }
    }
}

fn encode_expanded(expanded: &HashSet<MonthKey>) -> Option<String> {
    if expanded.is_empty() {
        return None;
    }

    // Sorted so the same set always produces the same URL.
    let mut keys: Vec<MonthKey> = expanded.iter().copied().collect();
    keys.sort();

    Some(
        keys.iter()
            .map(|key| key.to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}

/// Display the dashboard page: summary cards, the category filter and the
/// expenses grouped by month.
pub async fn get_dashboard_page(
    State(state): State<DashboardState>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<DashboardQuery>,
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

    analytics::track_expenses_viewed(expenses.len());

    let selection = query.selection();

    let mut filtered = filter_by_category(&expenses, selection.filter_category.as_ref());
    sort_expenses(&mut filtered, selection.sort);

    let statistics = select_statistics(&filtered, &selection, current_year);
    let groups = group_by_month(&filtered);
    let categories = crate::dashboard::category_summary(&expenses);

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();
    let new_expense_button = html!(
        a
            href=(endpoints::NEW_EXPENSE_VIEW)
            class="px-4 py-2 bg-black hover:bg-gray-800 text-white rounded"
        {
            "+ Add Expense"
        }
    );

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-xl"
            {
                div class="flex items-center justify-between mb-6"
                {
                    h1 class="text-3xl font-bold" { "Dashboard" }

                    (new_expense_button)
                }

                @if let Some(month) = statistics.focused_month {
                    div class="flex items-center justify-between mb-4"
                    {
                        span class="text-sm font-medium text-blue-700 dark:text-blue-400"
                        {
                            "Viewing " (month.display_name())
                        }

                        (link(&query.with_month_cleared().to_url(), "View All Months"))
                    }
                }

                (summary_cards(&statistics))

                (filter_controls(&categories, &query))

                h2 class="text-xl font-semibold mt-8 mb-4" { "Expenses by Month" }

                @if groups.is_empty() {
                    div class="bg-white dark:bg-gray-800 rounded-lg shadow-sm p-8 text-center
                        text-gray-500 dark:text-gray-400"
                    {
                        "No expenses found for the selected filter."
                    }
                } @else {
                    div class="space-y-3"
                    {
                        @for group in &groups {
                            (month_group_view(group, &selection, &query))
                        }
                    }
                }
            }
        }
    );

    Ok(base("Dashboard", &[], &content).into_response())
}

#[cfg(test)]
mod tests {
    use std::{
        collections::HashSet,
        sync::{Arc, Mutex},
    };

    use axum::{
        Extension,
        extract::{Query, State},
        http::StatusCode,
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        PasswordHash,
        category::Category,
        date_format::MonthKey,
        db::initialize,
        expense::{NewExpense, create_expense},
        selection::{SortColumn, SortDirection},
        user::{UserID, create_user},
    };

    use super::{DashboardQuery, DashboardState, get_dashboard_page};

    fn get_test_state() -> (DashboardState, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user("foo@bar.baz", PasswordHash::new_unchecked("hunter2"), &conn)
            .expect("Could not create test user");

        (
            DashboardState {
                db_connection: Arc::new(Mutex::new(conn)),
                local_timezone: "Etc/UTC".to_owned(),
            },
            user.id,
        )
    }

    fn add_expense(state: &DashboardState, user_id: UserID, description: &str, amount: f64) {
        let connection = state.db_connection.lock().unwrap();
        create_expense(
            NewExpense {
                description: description.to_owned(),
                amount,
                category: Category::Food,
                date: date!(2025 - 03 - 15),
                user_id,
            },
            &connection,
        )
        .unwrap();
    }

    async fn render(state: DashboardState, user_id: UserID, query: DashboardQuery) -> Html {
        let response = get_dashboard_page(State(state), Extension(user_id), Query(query))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        Html::parse_document(&String::from_utf8_lossy(&body))
    }

    #[tokio::test]
    async fn dashboard_page_loads_successfully() {
        let (state, user_id) = get_test_state();
        add_expense(&state, user_id, "lunch", 12.3);

        let html = render(state, user_id, DashboardQuery::default()).await;

        assert!(
            html.errors.is_empty(),
            "Got HTML parsing errors: {:?}",
            html.errors
        );

        let heading = Selector::parse("h1").unwrap();
        assert!(html.select(&heading).next().is_some());
    }

    #[tokio::test]
    async fn shows_prompt_text_when_the_filter_matches_nothing() {
        let (state, user_id) = get_test_state();

        let query = DashboardQuery {
            filter: Some("Barber".to_owned()),
            ..Default::default()
        };
        let html = render(state, user_id, query).await;

        assert!(
            html.html()
                .contains("No expenses found for the selected filter.")
        );
    }

    #[test]
    fn query_round_trips_through_the_url() {
        let query = DashboardQuery {
            filter: Some("Food".to_owned()),
            sort: Some(SortColumn::Amount),
            direction: Some(SortDirection::Asc),
            month: Some("2025-03".to_owned()),
            expanded: Some("2025-02,2025-03".to_owned()),
        };

        let url = query.to_url();
        let query_string = url.split_once('?').unwrap().1;
        let parsed: DashboardQuery = serde_urlencoded::from_str(query_string).unwrap();

        assert_eq!(parsed, query);
    }

    #[test]
    fn selection_ignores_invalid_month_keys() {
        let query = DashboardQuery {
            month: Some("not-a-month".to_owned()),
            expanded: Some("2025-03,garbage".to_owned()),
            ..Default::default()
        };

        let selection = query.selection();

        assert_eq!(selection.selected_month, None);
        assert_eq!(
            selection.expanded_months,
            HashSet::from([MonthKey::from_date(date!(2025 - 03 - 01))])
        );
    }

    #[test]
    fn clicking_a_collapsed_month_expands_and_selects_it() {
        let march = MonthKey::from_date(date!(2025 - 03 - 01));

        let query = DashboardQuery::default().with_month_clicked(march);

        assert_eq!(query.month.as_deref(), Some("2025-03"));
        assert_eq!(query.expanded.as_deref(), Some("2025-03"));
    }

    #[test]
    fn clicking_the_selected_month_collapses_and_clears_it() {
        let march = MonthKey::from_date(date!(2025 - 03 - 01));

        let query = DashboardQuery::default()
            .with_month_clicked(march)
            .with_month_clicked(march);

        assert_eq!(query.month, None);
        assert_eq!(query.expanded, None);
    }

    #[test]
    fn clicking_an_expanded_but_unselected_month_selects_it() {
        let march = MonthKey::from_date(date!(2025 - 03 - 01));

        let query = DashboardQuery {
            expanded: Some("2025-03".to_owned()),
            ..Default::default()
        }
        .with_month_clicked(march);

        assert_eq!(query.month.as_deref(), Some("2025-03"));
        assert_eq!(query.expanded.as_deref(), Some("2025-03"));
    }

    #[test]
    fn clearing_the_month_keeps_the_expansion() {
        let march = MonthKey::from_date(date!(2025 - 03 - 01));

        let query = DashboardQuery::default()
            .with_month_clicked(march)
            .with_month_cleared();

        assert_eq!(query.month, None);
        assert_eq!(query.expanded.as_deref(), Some("2025-03"));
    }

    #[test]
    fn sort_toggle_flips_the_active_column() {
        let query = DashboardQuery::default().with_sort_toggled(SortColumn::Date);

        // The default is date descending, so the first click flips to ascending.
        assert_eq!(query.sort, Some(SortColumn::Date));
        assert_eq!(query.direction, Some(SortDirection::Asc));

        let query = query.with_sort_toggled(SortColumn::Amount);
        assert_eq!(query.sort, Some(SortColumn::Amount));
        assert_eq!(query.direction, Some(SortDirection::Asc));
    }
}
