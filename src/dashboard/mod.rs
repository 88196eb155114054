//! Dashboard module
//!
//! Provides the main page showing expenses grouped by month, with summary
//! cards, a category filter, sortable expense tables and per-month category
//! breakdowns.

mod aggregation;
mod cards;
mod handlers;
mod pipeline;
mod statistics;
mod tables;

pub use handlers::get_dashboard_page;

pub(crate) use aggregation::{CategorySummary, category_summary};
