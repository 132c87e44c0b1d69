use chrono::{DateTime, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use log::warn;

/// Resolve an IANA zone id. Unknown ids degrade to UTC with a warning
/// rather than failing the calculation.
pub fn parse_zone(id: &str) -> Tz {
    id.parse().unwrap_or_else(|_| {
        warn!("unknown timezone id {:?}, falling back to UTC", id);
        Tz::UTC
    })
}

/// Resolve a naive wall-clock time, read in the given zone on that calendar
/// date, to the absolute UTC instant.
///
/// An ambiguous wall time (the repeated fall-back hour) takes the earliest
/// mapping. A nonexistent wall time (the spring-forward gap) is resolved
/// with the offset in force at the naive instant queried as UTC, which is
/// the closest answer zone rules allow for a time that never happened.
pub fn resolve_local(wall: NaiveDateTime, zone: Tz) -> DateTime<Utc> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let offset = zone.offset_from_utc_datetime(&wall).fix();
            Utc.from_utc_datetime(&(wall - offset))
        }
    }
}

/// Wall-clock view of a UTC instant in the given zone.
pub fn project(instant: DateTime<Utc>, zone: Tz) -> DateTime<Tz> {
    instant.with_timezone(&zone)
}

/// UTC offset of a zone at a given instant, in hours. Fractional for
/// half-hour and quarter-hour zones.
pub fn utc_offset_hours(zone: Tz, instant: DateTime<Utc>) -> f64 {
    let seconds = zone
        .offset_from_utc_datetime(&instant.naive_utc())
        .fix()
        .local_minus_utc();
    f64::from(seconds) / 3600.0
}
