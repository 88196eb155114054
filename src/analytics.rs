//! Product analytics events.
//!
//! Events are emitted on a dedicated `tracing` target so they can be routed
//! to a separate sink (or dropped entirely) by the subscriber configuration.
//! Each mutation endpoint fires its event exactly once, after the database
//! write has succeeded; failed attempts are never counted.

use serde_json::Value;

use crate::database_id::ExpenseId;

/// The tracing target analytics events are emitted on.
pub const ANALYTICS_TARGET: &str = "analytics";

/// Record a named analytics event with a JSON property payload.
fn track(event: &str, properties: Value) {
    tracing::info!(target: ANALYTICS_TARGET, event, %properties);
}

/// An expense was created.
pub fn track_expense_added(id: ExpenseId, category: &str, amount: f64) {
    track(
        "expense_added",
        serde_json::json!({ "expense_id": id, "category": category, "amount": amount }),
    );
}

/// An existing expense was updated.
pub fn track_expense_edited(id: ExpenseId, category: &str, amount: f64) {
    track(
        "expense_edited",
        serde_json::json!({ "expense_id": id, "category": category, "amount": amount }),
    );
}

/// An expense was deleted.
pub fn track_expense_deleted(id: ExpenseId) {
    track("expense_deleted", serde_json::json!({ "expense_id": id }));
}

/// The dashboard's expense list was viewed.
pub fn track_expenses_viewed(count: usize) {
    track("expenses_viewed", serde_json::json!({ "count": count }));
}
