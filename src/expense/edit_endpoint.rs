//! Defines the endpoint for updating an existing expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, analytics, endpoints,
    database_id::ExpenseId,
    date_format::parse_iso_date,
    expense::{ExpenseUpdate, core::update_expense, create_endpoint::ExpenseForm},
};

/// The state needed to update an expense.
#[derive(Debug, Clone)]
pub struct EditExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for updating an expense, redirects to the dashboard on success.
///
/// The expense's owner is assigned at creation time and is never touched by
/// an update.
pub async fn edit_expense_endpoint(
    State(state): State<EditExpenseState>,
    Path(expense_id): Path<ExpenseId>,
    Form(form): Form<ExpenseForm>,
) -> Response {
    let date = match parse_iso_date(&form.date) {
        Ok(date) => date,
        Err(error) => {
            tracing::error!("rejected expense update with malformed date: {error}");
            return error.into_alert_response();
        }
    };

    let update = ExpenseUpdate {
        description: form.description,
        amount: form.amount,
        category: form.category,
        date,
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let expense = match update_expense(expense_id, update, &connection) {
        Ok(expense) => expense,
        Err(error) => {
            tracing::error!("could not update expense: {error}");
            return error.into_alert_response();
        }
    };

    analytics::track_expense_edited(expense.id, expense.category.as_str(), expense.amount);

    (
        HxRedirect(endpoints::DASHBOARD_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        PasswordHash,
        category::Category,
        db::initialize,
        expense::{
            NewExpense, create_endpoint::ExpenseForm, create_expense,
            edit_endpoint::EditExpenseState, edit_expense_endpoint, get_expense,
        },
        user::{UserID, create_user},
    };

    fn get_test_state() -> (EditExpenseState, UserID) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user("foo@bar.baz", PasswordHash::new_unchecked("hunter2"), &conn)
            .expect("Could not create test user");

        (
            EditExpenseState {
                db_connection: Arc::new(Mutex::new(conn)),
            },
            user.id,
        )
    }

    #[tokio::test]
    async fn updates_fields_but_not_the_owner() {
        let (state, user_id) = get_test_state();
        let expense_id = {
            let connection = state.db_connection.lock().unwrap();
            create_expense(
                NewExpense {
                    description: "lunch".to_owned(),
                    amount: 12.3,
                    category: Category::Food,
                    date: date!(2025 - 03 - 15),
                    user_id,
                },
                &connection,
            )
            .unwrap()
            .id
        };

        let form = ExpenseForm {
            amount: 45.6,
            category: Category::Entertainment,
            description: "cinema".to_string(),
            date: "2025-04-01".to_string(),
        };

        let response = edit_expense_endpoint(State(state.clone()), Path(expense_id), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = state.db_connection.lock().unwrap();
        let expense = get_expense(expense_id, &connection).unwrap();
        assert_eq!(expense.description, "cinema");
        assert_eq!(expense.amount, 45.6);
        assert_eq!(expense.category, Category::Entertainment);
        assert_eq!(expense.date, date!(2025 - 04 - 01));
        assert_eq!(expense.user_id, user_id);
    }

    #[tokio::test]
    async fn updating_a_missing_expense_is_not_found() {
        let (state, _) = get_test_state();

        let form = ExpenseForm {
            amount: 45.6,
            category: Category::Entertainment,
            description: "cinema".to_string(),
            date: "2025-04-01".to_string(),
        };

        let response = edit_expense_endpoint(State(state), Path(1337), Form(form))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
