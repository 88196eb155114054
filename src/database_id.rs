//! Database ID type definition.

/// Alias for the integer type used for expense row IDs.
pub type ExpenseId = i64;
