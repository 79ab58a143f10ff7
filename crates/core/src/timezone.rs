//! Zone-aware conversion between provider wall-clock hours and absolute
//! instants.
//!
//! DST handling follows the wall clock: an hour that occurs twice on a
//! fall-back night maps to its first occurrence, and an hour that does not
//! exist on a spring-forward night has no instant at all.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::errors::{BookingError, BookingResult};

/// Validates an IANA zone identifier such as `"Europe/Berlin"`.
///
/// # Errors
///
/// Returns `BookingError::Validation` naming the identifier if the zone
/// database does not know it.
pub fn parse_zone(id: &str) -> BookingResult<Tz> {
    id.parse::<Tz>()
        .map_err(|_| BookingError::Validation(format!("Invalid IANA time zone: {}", id)))
}

/// Converts `hour:00` on `date` in `zone` to a UTC instant.
///
/// Returns `None` when the local time falls in a DST gap or `hour` is not a
/// valid hour of day.
pub fn local_to_instant(date: NaiveDate, hour: u32, zone: Tz) -> Option<DateTime<Utc>> {
    let time = NaiveTime::from_hms_opt(hour, 0, 0)?;
    zone.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|local| local.with_timezone(&Utc))
}

pub fn instant_to_local(instant: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
    instant.with_timezone(&zone)
}

/// Renders an instant in `zone` with a numeric offset, for JSON output.
pub fn to_display(instant: DateTime<Utc>, zone: Tz) -> DateTime<FixedOffset> {
    instant_to_local(instant, zone).fixed_offset()
}
