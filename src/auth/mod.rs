//! Cookie based authentication for the application.
//!
//! This module contains everything related to signing in:
//! - Private cookie handling for the session cookie pair
//! - The middleware that guards routes behind a valid session
//! - View handlers for the log in and registration pages

mod cookie;
mod log_in;
mod log_out;
mod middleware;
mod register;

pub use cookie::DEFAULT_COOKIE_DURATION;
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use register::{get_register_page, register_user};
