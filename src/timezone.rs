//! Resolving the server's canonical timezone name to a UTC offset.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// Get the current UTC offset for a canonical timezone name, e.g. "Europe/Sofia".
///
/// Returns [None] if the timezone name is not recognised.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod tests {
    use super::get_local_offset;

    #[test]
    fn resolves_canonical_timezone_names() {
        assert!(get_local_offset("Europe/Sofia").is_some());
        assert!(get_local_offset("Etc/UTC").is_some());
    }

    #[test]
    fn rejects_unknown_timezone_names() {
        assert!(get_local_offset("Neverland/Nowhere").is_none());
    }
}
