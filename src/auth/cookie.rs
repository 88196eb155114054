//! Defines functions for handling user authentication with cookies.

use std::cmp::max;

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, PrimitiveDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::{Error, user::UserID};

pub(crate) const COOKIE_USER_ID: &str = "user_id";
pub(crate) const COOKIE_EXPIRY: &str = "expiry";

/// The default duration for which auth cookies are valid.
pub const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

/// The format used for the expiry cookie's value.
const DATE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Add an auth cookie to the cookie jar, indicating that a user is logged in and authenticated.
///
/// Sets the initial expiry of the cookie to `duration` from the current time.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns a [Error::InvalidDateFormat] if the expiry time cannot be formatted.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let expiry = OffsetDateTime::now_utc() + duration;
    // Use format instead of to_string to avoid errors at midnight when the
    // hour is printed as a single digit when DATE_TIME_FORMAT expects two digits.
    let expiry_string = expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), expiry.to_string()))?;

    Ok(jar
        .add(
            Cookie::build((COOKIE_USER_ID, user_id.as_i64().to_string()))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        )
        .add(
            Cookie::build((COOKIE_EXPIRY, expiry_string))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_USER_ID, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
    .add(
        Cookie::build((COOKIE_EXPIRY, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the signed-in user's ID from the cookie jar.
///
/// # Errors
///
/// Returns a:
/// - [Error::CookieMissing] if the user ID or expiry cookie is not in the jar,
/// - [Error::InvalidDateFormat] if the expiry cookie's value cannot be parsed,
/// - [Error::InvalidCredentials] if the session has expired or the user ID is
///   not a valid integer.
pub(crate) fn get_user_id_from_cookies(jar: &PrivateCookieJar) -> Result<UserID, Error> {
    let user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;

    let expiry = parse_expiry(expiry_cookie.value())?;

    if expiry < OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    user_id_cookie
        .value()
        .parse()
        .map(UserID::new)
        .map_err(|_| Error::InvalidCredentials)
}

/// Set the expiry of the auth cookie in `jar` to the latest of UTC now
/// plus `duration` and the cookie's current expiry.
///
/// # Errors
///
/// The cookie jar is not modified if an error is returned.
///
/// Returns a:
/// - [Error::CookieMissing] if the expiry cookie is not in the cookie jar,
/// - [Error::InvalidDateFormat] if the stored or new expiry cannot be
///   parsed or formatted.
pub(crate) fn extend_auth_cookie_duration_if_needed(
    jar: PrivateCookieJar,
    duration: Duration,
) -> Result<PrivateCookieJar, Error> {
    let user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;

    let current_expiry = parse_expiry(expiry_cookie.value())?;
    let new_expiry = OffsetDateTime::now_utc()
        .checked_add(duration)
        .ok_or_else(|| {
            Error::InvalidDateFormat("overflowed the expiry date".to_owned(), duration.to_string())
        })?;

    let expiry = max(current_expiry, new_expiry);
    let expiry_string = expiry
        .format(DATE_TIME_FORMAT)
        .map_err(|error| Error::InvalidDateFormat(error.to_string(), expiry.to_string()))?;

    Ok(jar
        .add(
            Cookie::build((COOKIE_USER_ID, user_id_cookie.value().to_owned()))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        )
        .add(
            Cookie::build((COOKIE_EXPIRY, expiry_string))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        ))
}

fn parse_expiry(expiry_string: &str) -> Result<OffsetDateTime, Error> {
    PrimitiveDateTime::parse(expiry_string, DATE_TIME_FORMAT)
        .map(|date_time| date_time.assume_utc())
        .map_err(|error| {
            Error::InvalidDateFormat(error.to_string(), expiry_string.to_owned())
        })
}

#[cfg(test)]
mod tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use time::Duration;

    use crate::{Error, user::UserID};

    use super::{
        get_user_id_from_cookies, invalidate_auth_cookie, set_auth_cookie,
    };

    fn get_test_jar() -> PrivateCookieJar {
        PrivateCookieJar::new(Key::generate())
    }

    #[test]
    fn set_cookie_round_trips_the_user_id() {
        let jar = get_test_jar();
        let user_id = UserID::new(42);

        let jar = set_auth_cookie(jar, user_id, Duration::minutes(5)).unwrap();

        assert_eq!(get_user_id_from_cookies(&jar), Ok(user_id));
    }

    #[test]
    fn missing_cookies_are_an_error() {
        let jar = get_test_jar();

        assert_eq!(get_user_id_from_cookies(&jar), Err(Error::CookieMissing));
    }

    #[test]
    fn expired_session_is_rejected() {
        let jar = get_test_jar();
        let user_id = UserID::new(42);

        let jar = set_auth_cookie(jar, user_id, Duration::minutes(-5)).unwrap();

        assert_eq!(
            get_user_id_from_cookies(&jar),
            Err(Error::InvalidCredentials)
        );
    }

    #[test]
    fn invalidated_jar_has_no_valid_session() {
        let jar = get_test_jar();
        let user_id = UserID::new(42);

        let jar = set_auth_cookie(jar, user_id, Duration::minutes(5)).unwrap();
        let jar = invalidate_auth_cookie(jar);

        assert!(get_user_id_from_cookies(&jar).is_err());
    }
}
