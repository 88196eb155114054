//! The registration page and the endpoint that creates a new account.

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
        log_in_register,
    },
    password::PasswordHash,
    user::create_user,
};

/// The minimum password length the registration form accepts.
const MINIMUM_PASSWORD_LENGTH: u8 = 8;

/// The state needed to register a new user.
#[derive(Clone)]
pub struct RegisterState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The database connection for creating users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
            db_connection: state.db_connection.clone(),
        }
    }
}

impl FromRef<RegisterState> for Key {
    fn from_ref(state: &RegisterState) -> Self {
        state.cookie_key.clone()
    }
}

/// The form data for registering a new user.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The email the user will sign in with.
    pub email: String,
    /// The user's raw password.
    pub password: String,
    /// The password again, to catch typos.
    pub confirm_password: String,
}

/// Display the registration page.
pub async fn get_register_page() -> Markup {
    register_view("", None)
}

/// A route handler for creating a new user, redirects to the dashboard on success.
pub async fn register_user(
    State(state): State<RegisterState>,
    jar: PrivateCookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.email.trim().is_empty() {
        return register_error(&form.email, "Enter an email address.");
    }

    if form.password != form.confirm_password {
        return register_error(&form.email, "The passwords do not match.");
    }

    let password_hash = match PasswordHash::from_raw_password(&form.password, PasswordHash::DEFAULT_COST)
    {
        Ok(password_hash) => password_hash,
        Err(Error::TooWeak(feedback)) => {
            return register_error(&form.email, &format!("The password is too weak: {feedback}"));
        }
        Err(error) => {
            tracing::error!("could not hash password: {error}");
            return error.into_response();
        }
    };

    let user = {
        let connection = match state.db_connection.lock() {
            Ok(connection) => connection,
            Err(error) => {
                tracing::error!("could not acquire database lock: {error}");
                return Error::DatabaseLockError.into_response();
            }
        };

        create_user(form.email.trim(), password_hash, &connection)
    };

    let user = match user {
        Ok(user) => user,
        Err(Error::DuplicateEmail(email)) => {
            return register_error(
                &email,
                "An account already exists for that email. Log in instead.",
            );
        }
        Err(error) => {
            tracing::error!("could not create user: {error}");
            return error.into_response();
        }
    };

    match set_auth_cookie(jar, user.id, state.cookie_duration) {
        Ok(jar) => (jar, Redirect::to(endpoints::DASHBOARD_VIEW)).into_response(),
        Err(error) => {
            tracing::error!("could not set auth cookie: {error}");
            error.into_response()
        }
    }
}

fn register_error(email: &str, error_message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        register_view(email, Some(error_message)),
    )
        .into_response()
}

fn register_view(email: &str, error_message: Option<&str>) -> Markup {
    let log_in_link = link(endpoints::LOG_IN_VIEW, "Log in");

    let register_form = html! {
        form
            method="post"
            action=(endpoints::USERS)
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
                    value=(email);
            }

            div
            {
                label
                    for="password"
                    class=(FORM_LABEL_STYLE)
                {
                    "Password"
                }

                input
                    type="password"
                    name="password"
                    id="password"
                    placeholder="••••••••"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    minlength=(MINIMUM_PASSWORD_LENGTH);
            }

            div
            {
                label
                    for="confirm_password"
                    class=(FORM_LABEL_STYLE)
                {
                    "Confirm password"
                }

                input
                    type="password"
                    name="confirm_password"
                    id="confirm_password"
                    placeholder="••••••••"
                    class=(FORM_TEXT_INPUT_STYLE)
                    required
                    minlength=(MINIMUM_PASSWORD_LENGTH);

                @if let Some(error_message) = error_message
                {
                    p class="text-red-500 text-base" { (error_message) }
                }
            }

            button
                type="submit"
                class=(BUTTON_PRIMARY_STYLE)
            {
                "Create account"
            }

            p class="text-sm font-light text-gray-500 dark:text-gray-400"
            {
                "Already have an account? " (log_in_link)
            }
        }
    };

    let content = log_in_register("Create an account", &register_form);

    base("Register", &[], &content)
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::get_register_page;

    #[tokio::test]
    async fn register_page_has_all_form_fields() {
        let markup = get_register_page().await;
        let html = Html::parse_document(&markup.into_string());

        for selector in [
            "input[name=email]",
            "input[name=password]",
            "input[name=confirm_password]",
        ] {
            let selector = Selector::parse(selector).unwrap();
            assert!(
                html.select(&selector).next().is_some(),
                "expected the page to contain {selector:?}"
            );
        }
    }
}
