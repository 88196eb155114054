//! Expense management for the application.
//!
//! This module contains everything related to expenses:
//! - The `Expense` model and database functions for storing and querying expenses
//! - Endpoints for creating, editing, deleting and duplicating expenses
//! - View handlers for the new/edit expense pages and the CSV export

mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod duplicate_endpoint;
mod edit_endpoint;
mod edit_page;
mod export;
mod form;

pub use core::{
    Expense, ExpenseUpdate, NewExpense, create_expense, create_expense_table, delete_expense,
    get_all_expenses, get_expense, map_expense_row, update_expense,
};
pub use create_endpoint::create_expense_endpoint;
pub use create_page::get_new_expense_page;
pub use delete_endpoint::delete_expense_endpoint;
pub use duplicate_endpoint::duplicate_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use export::export_expenses_csv;

#[cfg(test)]
pub use core::count_expenses;
