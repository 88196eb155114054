//! Defines the endpoint for deleting an expense.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use rusqlite::Connection;

use crate::{
    AppState, Error, analytics, endpoints,
    database_id::ExpenseId,
    expense::core::delete_expense,
};

/// The state needed to delete an expense.
#[derive(Debug, Clone)]
pub struct DeleteExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for deleting an expense, redirects to the dashboard on success.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteExpenseState>,
    Path(expense_id): Path<ExpenseId>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    if let Err(error) = delete_expense(expense_id, &connection) {
        tracing::error!("could not delete expense: {error}");
        return error.into_alert_response();
    }

    analytics::track_expense_deleted(expense_id);

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
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error, PasswordHash,
        category::Category,
        db::initialize,
        expense::{
            NewExpense, create_expense, delete_endpoint::DeleteExpenseState,
            delete_expense_endpoint, get_expense,
        },
        user::create_user,
    };

    fn get_test_state() -> (DeleteExpenseState, i64) {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user("foo@bar.baz", PasswordHash::new_unchecked("hunter2"), &conn)
            .expect("Could not create test user");
        let expense = create_expense(
            NewExpense {
                description: "lunch".to_owned(),
                amount: 12.3,
                category: Category::Food,
                date: date!(2025 - 03 - 15),
                user_id: user.id,
            },
            &conn,
        )
        .unwrap();

        (
            DeleteExpenseState {
                db_connection: Arc::new(Mutex::new(conn)),
            },
            expense.id,
        )
    }

    #[tokio::test]
    async fn deletes_the_expense() {
        let (state, expense_id) = get_test_state();

        let response = delete_expense_endpoint(State(state.clone()), Path(expense_id))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let connection = state.db_connection.lock().unwrap();
        assert_eq!(get_expense(expense_id, &connection), Err(Error::NotFound));
    }

    #[tokio::test]
    async fn deleting_a_missing_expense_is_not_found() {
        let (state, _) = get_test_state();

        let response = delete_expense_endpoint(State(state), Path(1337))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
