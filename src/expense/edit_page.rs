//! The page for editing an existing expense.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    database_id::ExpenseId,
    endpoints::format_endpoint,
    expense::{
        core::get_expense,
        form::{ExpenseFormDefaults, expense_form_fields},
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
};

/// The state needed to display the edit expense page.
#[derive(Debug, Clone)]
pub struct EditExpensePageState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditExpensePageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the form for editing an expense, pre-filled with its current values.
pub async fn get_edit_expense_page(
    State(state): State<EditExpensePageState>,
    Path(expense_id): Path<ExpenseId>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let expense = get_expense(expense_id, &connection)
        .inspect_err(|error| tracing::error!("could not get expense: {error}"))?;

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW).into_html();

    let fields = expense_form_fields(&ExpenseFormDefaults {
        amount: Some(expense.amount),
        category: Some(&expense.category),
        description: Some(&expense.description),
        date: expense.date,
    });

    let content = html!(
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold my-4" { "Edit Expense" }

            form
                hx-put=(format_endpoint(endpoints::EXPENSE, expense.id))
                hx-target-error="#alert-container"
                class="space-y-4 w-full"
            {
                (fields)

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Update Expense" }
            }
        }
    );

    Ok(base("Edit Expense", &[], &content).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        body::Body,
        extract::{Path, State},
        http::Response,
    };
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::macros::date;

    use crate::{
        Error, PasswordHash,
        category::Category,
        db::initialize,
        expense::{NewExpense, create_expense},
        user::create_user,
    };

    use super::{EditExpensePageState, get_edit_expense_page};

    fn get_test_state() -> (EditExpensePageState, i64) {
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
            EditExpensePageState {
                db_connection: Arc::new(Mutex::new(conn)),
            },
            expense.id,
        )
    }

    async fn parse_html(response: Response<Body>) -> Html {
        let body = response.into_body();
        let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        let text = String::from_utf8_lossy(&body).to_string();

        Html::parse_document(&text)
    }

    #[tokio::test]
    async fn form_is_pre_filled_with_the_expense() {
        let (state, expense_id) = get_test_state();

        let response = get_edit_expense_page(State(state), Path(expense_id))
            .await
            .unwrap();
        let html = parse_html(response).await;

        let description = Selector::parse("input[name=description]").unwrap();
        assert_eq!(
            html.select(&description).next().unwrap().value().attr("value"),
            Some("lunch")
        );

        let date = Selector::parse("input[name=date]").unwrap();
        assert_eq!(
            html.select(&date).next().unwrap().value().attr("value"),
            Some("2025-03-15")
        );
    }

    #[tokio::test]
    async fn missing_expense_is_an_error() {
        let (state, _) = get_test_state();

        let result = get_edit_expense_page(State(state), Path(1337)).await;

        assert!(matches!(result, Err(Error::NotFound)));
    }
}
