//! The canonical date format for expenses and the month key derived from it.
//!
//! Expense dates travel over the wire and render in the UI as `DD/MM/YYYY`
//! strings (day first, zero-padded, slash-separated). HTML date inputs
//! produce ISO `YYYY-MM-DD` strings instead, so this module also converts
//! between the two. Both conversions are exact inverses for valid input.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The canonical display format for expense dates, e.g. "05/11/2025".
const DISPLAY_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]/[month]/[year]");

/// The format produced by HTML `<input type="date">` elements, e.g. "2025-11-05".
const ISO_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Parse a `DD/MM/YYYY` string into a [Date].
///
/// # Errors
/// Returns [Error::InvalidDisplayDate] if the string is not a real calendar
/// date in the canonical format. Rejecting bad input here, at the write
/// path, guarantees every stored date can be parsed by the aggregation code.
pub fn parse_display_date(date_string: &str) -> Result<Date, Error> {
    Date::parse(date_string, DISPLAY_FORMAT)
        .map_err(|_| Error::InvalidDisplayDate(date_string.to_owned()))
}

/// Format a [Date] in the canonical `DD/MM/YYYY` display format.
pub fn format_display_date(date: Date) -> String {
    date.format(DISPLAY_FORMAT)
        .expect("the display format has no components that can fail to format")
}

/// Parse an ISO `YYYY-MM-DD` string (the HTML date input format) into a [Date].
///
/// # Errors
/// Returns [Error::InvalidDisplayDate] if the string is not a real calendar
/// date in the ISO format.
pub fn parse_iso_date(date_string: &str) -> Result<Date, Error> {
    Date::parse(date_string, ISO_FORMAT)
        .map_err(|_| Error::InvalidDisplayDate(date_string.to_owned()))
}

/// Format a [Date] in the ISO `YYYY-MM-DD` format for HTML date inputs.
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_FORMAT)
        .expect("the ISO format has no components that can fail to format")
}

/// The year and month an expense belongs to, used to group and sort expenses.
///
/// Month keys order chronologically, and their string form `YYYY-MM` is
/// zero-padded so that the lexicographic order of the strings agrees with
/// the chronological order of the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthKey {
    year: i32,
    month: u8,
}

impl MonthKey {
    /// The month key for `date`.
    pub fn from_date(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month() as u8,
        }
    }

    /// The key rendered as a long month name and year, e.g. "November 2025".
    pub fn display_name(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = Error;

    fn from_str(key_string: &str) -> Result<Self, Self::Err> {
        let error = || Error::InvalidDisplayDate(key_string.to_owned());

        let (year, month) = key_string.split_once('-').ok_or_else(error)?;
        let year: i32 = year.parse().map_err(|_| error())?;
        let month: u8 = month.parse().map_err(|_| error())?;

        if !(1..=12).contains(&month) {
            return Err(error());
        }

        Ok(Self { year, month })
    }
}

impl TryFrom<String> for MonthKey {
    type Error = Error;

    fn try_from(key_string: String) -> Result<Self, Self::Error> {
        key_string.parse()
    }
}

impl From<MonthKey> for String {
    fn from(key: MonthKey) -> Self {
        key.to_string()
    }
}

/// The fixed English month vocabulary used for month headings.
fn month_name(month: u8) -> &'static str {
    match Month::try_from(month) {
        Ok(Month::January) => "January",
        Ok(Month::February) => "February",
        Ok(Month::March) => "March",
        Ok(Month::April) => "April",
        Ok(Month::May) => "May",
        Ok(Month::June) => "June",
        Ok(Month::July) => "July",
        Ok(Month::August) => "August",
        Ok(Month::September) => "September",
        Ok(Month::October) => "October",
        Ok(Month::November) => "November",
        Ok(Month::December) => "December",
        Err(_) => "Unknown",
    }
}
