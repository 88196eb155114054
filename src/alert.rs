//! Alert fragments for displaying error messages to users.
//!
//! Mutation endpoints respond to htmx with one of these fragments when
//! something goes wrong; the page swaps it into the fixed alert container
//! so the user can retry without losing their place. Successful mutations
//! redirect instead, so there is no success variant.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// Renders an error alert with a heading and optional details.
pub struct AlertTemplate<'a> {
    message: &'a str,
    details: &'a str,
}

impl<'a> AlertTemplate<'a> {
    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    /// Render the alert markup.
    pub fn into_html(self) -> Markup {
        html!(
            div
                class="p-4 mb-4 rounded-lg bg-red-50 dark:bg-gray-800"
                role="alert"
                onclick="this.parentElement.classList.add('hidden')"
            {
                p class="font-medium text-red-800 dark:text-red-400" { (self.message) }

                @if !self.details.is_empty() {
                    p class="text-sm text-gray-700 dark:text-gray-300" { (self.details) }
                }
            }
        )
    }

    /// Render the alert as a response with `status_code`.
    pub fn into_response(self, status_code: StatusCode) -> Response {
        (status_code, self.into_html()).into_response()
    }
}
