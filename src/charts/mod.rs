//! Charts module
//!
//! Provides the page with the per-category monthly spending chart for the
//! current year.

mod page;
mod series;

pub use page::get_charts_page;
