//! The log in page and the endpoint that starts a session.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::{Form, PrivateCookieJar, cookie::Key};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::Duration;

use crate::{
    AppState, Error, endpoints,
    auth::cookie::set_auth_cookie,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base, link,
        log_in_register, password_input,
    },
    user::get_user_by_email,
};

/// The state needed to log in a user.
#[derive(Clone)]
pub struct LogInState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<LogInState> for Key {
    fn from_ref(state: &LogInState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for logging in.
#[derive(Debug, Deserialize)]
pub struct LogInForm {
    /// The email the user signs in with.
    pub email: String,
    /// The user's raw password.
    pub password: String,
}

/// Display the log in page.
pub async fn get_log_in_page() -> Markup {
    log_in_view(LogInForm {
        email: String::new(),
        password: String::new(),
    }, None)
}

/// A route handler for logging in a user, redirects to the dashboard on success.
pub async fn post_log_in(
    State(state): State<LogInState>,
    jar: PrivateCookieJar,
    Form(form): Form<LogInForm>,
) -> Response {
    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        get_user_by_email(&form.email, &connection)
    };

    let user = match user {
        Ok(user) => user,
        Err(Error::NotFound) => return invalid_credentials_response(form),
        Err(error) => {
            tracing::error!("could not look up user: {error}");
            return error.into_response();
        }
    };

    match user.password_hash.verify(&form.password) {
        Ok(true) => {}
        Ok(false) => return invalid_credentials_response(form),
        Err(error) => {
            tracing::error!("could not verify password: {error}");
            return Error::HashingError(error.to_string()).into_response();
        }
    }

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(jar) => (jar, Redirect::to(endpoints::DASHBOARD_VIEW)).into_response(),
        Err(error) => {
            tracing::error!("could not set auth cookie: {error}");
            error.into_response()
        }
    }
}

fn invalid_credentials_response(form: LogInForm) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        log_in_view(form, Some("The email or password is incorrect.")),
    )
        .into_response()
}

fn log_in_view(form: LogInForm, error_message: Option<&str>) -> Markup {
    let register_link = link(endpoints::REGISTER_VIEW, "Sign up");

    let log_in_form = html! {
        form
            method="post"
            action=(endpoints::LOG_IN_API)
            class="space-y-4 md:space-y-6"
        {
            div
            {
                label
                    for="email"
                    class=(FORM_LABEL_STYLE)
                {
                    "Email"
                }

                input
                    type="email"
                    name="email"
                    id="email"
                    placeholder="you@example.com"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    autofocus
                    value=(form.email);
            }

            (password_input(&form.password, 1, error_message))

            button
                type="submit"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Log in"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Don't have an account yet? " (register_link)
            }
        }
    };

    let content = log_in_register("Sign in to your account", &log_in_form);

    base("Log In", &[], &content)
}
