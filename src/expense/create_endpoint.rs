//! Defines the endpoint for creating a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error, analytics, endpoints,
    category::Category,
    date_format::parse_iso_date,
    expense::{NewExpense, core::create_expense},
    user::UserID,
};

/// The state needed to create an expense.
#[derive(Debug, Clone)]
pub struct CreateExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The form data for creating an expense.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The amount spent, in лв.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// Text detailing the expense.
    pub description: String,
    /// When the money was spent, in the date input's ISO format.
    pub date: String,
}

/// A route handler for creating a new expense, redirects to the dashboard on success.
pub async fn create_expense_endpoint(
    State(state): State<CreateExpenseState>,
    Extension(user_id): Extension<UserID>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let date = match parse_iso_date(&form.date) {
        Ok(date) => date,
        Err(error) => {
            tracing::error!("rejected expense with malformed date: {error}");
            return error.into_alert_response();
        }
    };

    let new_expense = NewExpense {
        description: form.description,
        amount: form.amount,
        category: form.category,
        date,
        user_id,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let expense = match create_expense(new_expense, &connection) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::error!("could not create expense: {error}");
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
