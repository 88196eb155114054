//! The settings page: account information, data export and sign out.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::html;
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{BUTTON_SECONDARY_STYLE, PAGE_CONTAINER_STYLE, base},
    navigation::NavBar,
    user::{UserID, get_user_by_id},
};

const SECTION_STYLE: &str = "bg-white dark:bg-gray-800 border border-gray-200 \
    dark:border-gray-700 rounded-lg p-6 shadow-md";

/// The state needed for displaying the settings page.
#[derive(Debug, Clone)]
pub struct SettingsState {
    /// The database connection for looking up the signed-in user.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for SettingsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Display the settings page.
pub async fn get_settings_page(
    State(state): State<SettingsState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Response, Error> {
    let user = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_user_by_id(user_id, &connection)
            .inspect_err(|error| tracing::error!("could not get user: {error}"))?
    };

    let nav_bar = NavBar::new(endpoints::SETTINGS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-screen-md space-y-6"
            {
                div
                {
                    h1 class="text-3xl font-bold" { "Settings" }
                    p class="text-gray-600 dark:text-gray-400 mt-1"
                    {
                        "Manage your account and preferences"
                    }
                }

                div class=(SECTION_STYLE)
                {
                    h2 class="text-lg font-semibold mb-4" { "Account Information" }

                    div class="space-y-4"
                    {
                        div
                        {
                            div class="text-sm font-medium text-gray-700 dark:text-gray-300"
                            {
                                "Email"
                            }
                            div class="mt-1 font-medium" { (user.email) }
                        }

                        div
                        {
                            div class="text-sm font-medium text-gray-700 dark:text-gray-300"
                            {
                                "Account ID"
                            }
                            div class="mt-1 text-xs text-gray-500 font-mono" { (user.id) }
                        }
                    }
                }

                div class=(SECTION_STYLE)
                {
                    h2 class="text-lg font-semibold mb-4" { "Data Management" }

                    div class="flex items-center justify-between"
                    {
                        div
                        {
                            div class="text-sm font-medium text-gray-700 dark:text-gray-300"
                            {
                                "Export Data"
                            }
                            p class="text-xs text-gray-500" { "Download your expenses as CSV" }
                        }

                        a
                            href=(endpoints::EXPORT_CSV)
                            class=(BUTTON_SECONDARY_STYLE)
                        {
                            "Export CSV"
                        }
                    }
                }

                div class="bg-red-50 dark:bg-red-900/10 border border-red-200
                    dark:border-red-800 rounded-lg p-6 shadow-md"
                {
                    h2 class="text-lg font-semibold text-red-700 dark:text-red-400 mb-4"
                    {
                        "Danger Zone"
                    }

                    div class="flex items-center justify-between"
                    {
                        div
                        {
                            div class="text-sm font-medium text-red-700 dark:text-red-400"
                            {
                                "Sign Out"
                            }
                            p class="text-xs text-gray-500" { "Sign out of your account" }
                        }

                        a
                            href=(endpoints::LOG_OUT)
                            class="py-2 px-4 text-sm font-medium text-red-600 bg-white
                                rounded border border-red-600 hover:bg-red-50"
                        {
                            "Sign Out"
                        }
                    }
                }
            }
        }
    );

    Ok(base("Settings", &[], &content).into_response())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Extension, extract::State, http::StatusCode};
    use rusqlite::Connection;

    use crate::{PasswordHash, db::initialize, user::create_user};

    use super::{SettingsState, get_settings_page};

    #[tokio::test]
    async fn settings_page_shows_the_users_email() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        let user = create_user("foo@bar.baz", PasswordHash::new_unchecked("hunter2"), &conn)
            .expect("Could not create test user");
        let state = SettingsState {
            db_connection: Arc::new(Mutex::new(conn)),
        };

        let response = get_settings_page(State(state), Extension(user.id))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let html = String::from_utf8_lossy(&body);

        assert!(html.contains("foo@bar.baz"));
        assert!(html.contains("Export CSV"));
        assert!(html.contains("Sign Out"));
    }
}
