//! Exporting the signed-in user's expenses as a CSV file.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    date_format::format_display_date,
    expense::{Expense, core::get_all_expenses},
    user::UserID,
};

/// The state needed to export expenses.
#[derive(Debug, Clone)]
pub struct ExportState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler that downloads all of the user's expenses as `expenses.csv`.
pub async fn export_expenses_csv(
    State(state): State<ExportState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let expenses = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_expenses(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get expenses for export: {error}"))?
    };

    let csv = write_expenses_csv(&expenses)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"expenses.csv\"",
            ),
        ],
        csv,
    )
        .into_response())
}

/// Serialize `expenses` as CSV with a header row.
///
/// Dates are written in the canonical `DD/MM/YYYY` format.
fn write_expenses_csv(expenses: &[Expense]) -> Result<String, Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let write_error = |error: csv::Error| Error::CsvError(error.to_string());

    writer
        .write_record(["date", "description", "category", "amount"])
        .map_err(write_error)?;

    for expense in expenses {
        writer
            .write_record([
                format_display_date(expense.date),
                expense.description.clone(),
                expense.category.as_str().to_owned(),
                format!("{:.2}", expense.amount),
            ])
            .map_err(write_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|error| Error::CsvError(error.to_string()))?;

    String::from_utf8(bytes).map_err(|error| Error::CsvError(error.to_string()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{category::Category, expense::Expense, user::UserID};

    use super::write_expenses_csv;

    #[test]
    fn writes_a_header_and_one_row_per_expense() {
        let expenses = vec![Expense {
            id: 1,
            user_id: UserID::new(1),
            description: "lunch".to_owned(),
            amount: 12.3,
            category: Category::Food,
            date: date!(2025 - 03 - 15),
            created_at: String::new(),
            updated_at: String::new(),
        }];

        let csv = write_expenses_csv(&expenses).unwrap();

        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("date,description,category,amount"));
        assert_eq!(lines.next(), Some("15/03/2025,lunch,Food,12.30"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let csv = write_expenses_csv(&[]).unwrap();

        assert_eq!(csv.trim_end(), "date,description,category,amount");
    }
}
