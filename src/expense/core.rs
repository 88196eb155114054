//! Defines the core expense data model and database queries.

use rusqlite::{Connection, Row, types::Type};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    category::Category,
    database_id::ExpenseId,
    date_format::{format_display_date, parse_display_date},
    user::UserID,
};

// ============================================================================
// MODELS
// ============================================================================

/// A single recorded expense.
///
/// Expenses are immutable once fetched; edits go through [update_expense]
/// which replaces the stored row and returns the new version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// The ID of the expense.
    pub id: ExpenseId,
    /// The ID of the user the expense belongs to.
    pub user_id: UserID,
    /// A text description of what the money was spent on.
    pub description: String,
    /// The amount spent, in лв.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
    /// When the expense row was created (server-assigned).
    pub created_at: String,
    /// When the expense row was last updated (server-assigned).
    pub updated_at: String,
}

/// The fields needed to create a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    /// A text description of what the money was spent on. Must not be empty.
    pub description: String,
    /// The amount spent, in лв.
    pub amount: f64,
    /// The category the expense belongs to.
    pub category: Category,
    /// When the money was spent.
    pub date: Date,
    /// The ID of the user the expense belongs to.
    pub user_id: UserID,
}

/// The fields that can be changed on an existing expense.
///
/// The owner of an expense is fixed at creation time, so there is
/// deliberately no `user_id` field here.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseUpdate {
    /// The new description. Must not be empty.
    pub description: String,
    /// The new amount, in лв.
    pub amount: f64,
    /// The new category.
    pub category: Category,
    /// The new date.
    pub date: Date,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new expense in the database.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyDescription] if the description is empty or whitespace,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn create_expense(new_expense: NewExpense, connection: &Connection) -> Result<Expense, Error> {
    if new_expense.description.trim().is_empty() {
        return Err(Error::EmptyDescription);
    }

    let expense = connection
        .prepare(
            "INSERT INTO expense (user_id, description, amount, category, date)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, user_id, description, amount, category, date, created_at, updated_at",
        )?
        .query_row(
            (
                new_expense.user_id.as_i64(),
                new_expense.description,
                new_expense.amount,
                new_expense.category.as_str(),
                format_display_date(new_expense.date),
            ),
            map_expense_row,
        )?;

    Ok(expense)
}

/// Retrieve an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] there is some other SQL error.
pub fn get_expense(id: ExpenseId, connection: &Connection) -> Result<Expense, Error> {
    let expense = connection
        .prepare(
            "SELECT id, user_id, description, amount, category, date, created_at, updated_at
             FROM expense WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_expense_row)?;

    Ok(expense)
}

/// Retrieve all of a user's expenses, most recently created first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_expenses(user_id: UserID, connection: &Connection) -> Result<Vec<Expense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, description, amount, category, date, created_at, updated_at
             FROM expense WHERE user_id = :user_id
             ORDER BY created_at DESC, id DESC",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_expense_row)?
        .map(|expense_result| expense_result.map_err(Error::SqlError))
        .collect()
}

/// Update an existing expense, keeping its owner.
///
/// Only the description, amount, category and date can change; the
/// `user_id` assigned at creation time is never overwritten.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyDescription] if the new description is empty or whitespace,
/// - [Error::UpdateMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_expense(
    id: ExpenseId,
    update: ExpenseUpdate,
    connection: &Connection,
) -> Result<Expense, Error> {
    if update.description.trim().is_empty() {
        return Err(Error::EmptyDescription);
    }

    connection
        .prepare(
            "UPDATE expense
             SET description = ?1, amount = ?2, category = ?3, date = ?4,
                 updated_at = CURRENT_TIMESTAMP
             WHERE id = ?5
             RETURNING id, user_id, description, amount, category, date, created_at, updated_at",
        )?
        .query_row(
            (
                update.description,
                update.amount,
                update.category.as_str(),
                format_display_date(update.date),
                id,
            ),
            map_expense_row,
        )
        .map_err(|error| match error {
            rusqlite::Error::QueryReturnedNoRows => Error::UpdateMissingExpense,
            error => error.into(),
        })
}

/// Delete an expense from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingExpense] if `id` does not refer to a valid expense,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_expense(id: ExpenseId, connection: &Connection) -> Result<(), Error> {
    let rows_deleted = connection.execute("DELETE FROM expense WHERE id = ?1", (id,))?;

    if rows_deleted == 0 {
        Err(Error::DeleteMissingExpense)
    } else {
        Ok(())
    }
}

/// Get the total number of expenses in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_expenses(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM expense;", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Create the expense table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS expense (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
                )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('expense', 0)",
        (),
    )?;

    // Covers the per-user fetch on every page load.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_expense_user ON expense(user_id);",
        (),
    )?;

    Ok(())
}

/// Map a database row to an [Expense].
///
/// The stored date is the canonical `DD/MM/YYYY` string; it is parsed here
/// so the rest of the application only ever sees typed dates.
pub fn map_expense_row(row: &Row) -> Result<Expense, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_user_id: i64 = row.get(1)?;
    let description = row.get(2)?;
    let amount = row.get(3)?;
    let raw_category: String = row.get(4)?;
    let raw_date: String = row.get(5)?;
    let created_at = row.get(6)?;
    let updated_at = row.get(7)?;

    let date = parse_display_date(&raw_date).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(5, Type::Text, error.to_string().into())
    })?;

    Ok(Expense {
        id,
        user_id: UserID::new(raw_user_id),
        description,
        amount,
        category: Category::from(raw_category),
        date,
        created_at,
        updated_at,
    })
}

// ============================================================================
// TESTS
// ============================================================================
