//! Database initialization for the application.

use rusqlite::Connection;

use crate::{Error, expense::create_expense_table, user::create_user_table};

/// Create the application's tables if they do not exist yet.
///
/// # Errors
/// Returns an error if a table cannot be created or if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.execute_batch("PRAGMA foreign_keys = ON;")?;

    create_user_table(connection)?;
    create_expense_table(connection)?;

    Ok(())
}
