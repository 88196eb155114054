//! Defines the endpoint for duplicating an expense with today's date.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    AppState, Error, analytics, endpoints,
    database_id::ExpenseId,
    expense::{
        NewExpense,
        core::{create_expense, get_expense},
    },
    timezone::get_local_offset,
};

/// The state needed to duplicate an expense.
#[derive(Debug, Clone)]
pub struct DuplicateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Europe/Sofia".
    pub local_timezone: String,
}

impl FromRef<AppState> for DuplicateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler that copies an expense's description, amount and category
/// into a new expense dated today, then redirects to the dashboard.
pub async fn duplicate_expense_endpoint(
    State(state): State<DuplicateExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let Some(local_timezone) = get_local_offset(&state.local_timezone) else {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        return Error::InvalidTimezoneError(state.local_timezone).into_alert_response();
    };

    let today = OffsetDateTime::now_utc().to_offset(local_timezone).date();

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let original = match get_expense(expense_id, &connection) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::error!("could not get expense to duplicate: {error}");
            return error.into_alert_response();
        }
    };

    let duplicate = NewExpense {
        description: original.description,
        amount: original.amount,
        category: original.category,
        date: today,
        user_id: original.user_id,
    };

    let expense = match create_expense(duplicate, &connection) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::error!("could not duplicate expense: {error}");
            return error.into_alert_response();
        }
    };

    analytics::track_expense_added(expense.id, expense.category.as_str(), expense.amount);

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
