//! The page for recording a new expense.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use time::OffsetDateTime;

use crate::{
    AppState, Error, endpoints,
    expense::form::{ExpenseFormDefaults, expense_form_fields},
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    timezone::get_local_offset,
};

/// The state needed to display the new expense page.
#[derive(Debug, Clone)]
pub struct NewExpensePageState {
    /// The local timezone as a canonical timezone name, e.g. "Europe/Sofia".
    pub local_timezone: String,
}

impl FromRef<AppState> for NewExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the form for recording a new expense, pre-filled with today's date.
pub async fn get_new_expense_page(State(state): State<NewExpensePageState>) -> Response {
    let Some(local_timezone) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_response();
    };

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();
    let nav_bar = NavBar::new(endpoints::NEW_EXPENSE_VIEW).into_html();

    let fields = expense_form_fields(&ExpenseFormDefaults {
        amount: None,
        category: None,
        description: None,
        date: today,
    });

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "Add New Expense" }

            form
                hx-post=(endpoints::EXPENSES_API)
                hx-target-error="#alert-container"
                class="space-y-4 w-full"
            {
                (fields)

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
            }
        }
    );

    base("New Expense", &[], &content).into_response()
}
