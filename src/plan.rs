use crate::clock;
use crate::geo;
use crate::reference::ReferenceData;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use thiserror::Error;

/// Assumed cruise speed, km/h.
const CRUISE_SPEED_KMH: f64 = 875.0;
/// Fixed ground/climb/descent overhead, minutes.
const FIXED_BUFFER_MINUTES: f64 = 36.0;
/// Distance-proportional schedule padding, fraction of airborne time.
const PADDING_RATIO: f64 = 0.08;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Unknown airport code: {0}")]
    UnknownAirport(String),
    #[error("Could not parse departure date/time: \"{0}\"")]
    InvalidInput(String),
}

/// Everything the ticket needs to know about a flight, derived from two
/// airport codes and a local departure wall time. Recomputed on every call.
#[derive(Clone, Debug)]
pub struct FlightPlan {
    pub distance_km: f64,
    pub duration_minutes: i64,
    pub duration_formatted: String,
    pub departure_utc: DateTime<Utc>,
    pub arrival_utc: DateTime<Utc>,
    pub departure_time_local: String,
    pub arrival_time_local: String,
    pub departure_date_local: String,
    pub arrival_date_local: String,
    /// Arrival local calendar day minus departure local calendar day.
    pub day_change: i32,
    pub timezone_difference: String,
    pub arrival_weekday: String,
}

/// Schedule estimate for a given great-circle distance. Deterministic and
/// monotone in distance; never below the fixed buffer.
pub fn estimate_duration_minutes(distance_km: f64) -> i64 {
    let base_hours = distance_km / CRUISE_SPEED_KMH;
    let buffer_minutes = FIXED_BUFFER_MINUTES + base_hours * 60.0 * PADDING_RATIO;
    (base_hours * 60.0 + buffer_minutes).round() as i64
}

pub fn format_duration(minutes: i64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}h", hours)
    }
}

pub fn format_distance(distance_km: f64) -> String {
    format!("{:.0} km", distance_km)
}

fn format_timezone_difference(hours_diff: f64) -> String {
    let sign = if hours_diff >= 0.0 { "+" } else { "-" };
    let abs = hours_diff.abs();
    let hours = abs.floor();
    let minutes = ((abs - hours) * 60.0).round() as i64;

    if minutes == 0 {
        format!("{}{}h", sign, hours)
    } else {
        format!("{}{}h {}m", sign, hours, minutes)
    }
}

/// Compute distance, duration and zone-correct departure/arrival times for
/// one flight. The departure date/time is read as wall-clock time in the
/// origin airport's zone.
pub fn compute_flight_plan(
    reference: &ReferenceData,
    origin_code: &str,
    dest_code: &str,
    date: &str,
    time: &str,
) -> Result<FlightPlan, PlanError> {
    let origin = reference
        .airport(origin_code)
        .ok_or_else(|| PlanError::UnknownAirport(origin_code.to_string()))?;
    let dest = reference
        .airport(dest_code)
        .ok_or_else(|| PlanError::UnknownAirport(dest_code.to_string()))?;

    let distance_km = geo::haversine_km(
        origin.latitude,
        origin.longitude,
        dest.latitude,
        dest.longitude,
    );
    let duration_minutes = estimate_duration_minutes(distance_km);

    let departure_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidInput(date.to_string()))?;
    let departure_time = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| PlanError::InvalidInput(time.to_string()))?;

    let origin_zone = clock::parse_zone(&origin.timezone);
    let dest_zone = clock::parse_zone(&dest.timezone);

    let departure_utc = clock::resolve_local(departure_date.and_time(departure_time), origin_zone);
    let arrival_utc = departure_utc + Duration::minutes(duration_minutes);

    let departure_local = clock::project(departure_utc, origin_zone);
    let arrival_local = clock::project(arrival_utc, dest_zone);

    let day_change = (arrival_local.date_naive() - departure_local.date_naive()).num_days() as i32;

    // Offset difference is evaluated at call time, not at the flight's
    // instant. Stable for almost all zone pairs within a day; inherited
    // from the original tool.
    let now = Utc::now();
    let tz_diff_hours =
        clock::utc_offset_hours(dest_zone, now) - clock::utc_offset_hours(origin_zone, now);

    Ok(FlightPlan {
        distance_km,
        duration_minutes,
        duration_formatted: format_duration(duration_minutes),
        departure_utc,
        arrival_utc,
        departure_time_local: departure_local.format("%H:%M").to_string(),
        arrival_time_local: arrival_local.format("%H:%M").to_string(),
        departure_date_local: departure_local.format("%Y-%m-%d").to_string(),
        arrival_date_local: arrival_local.format("%Y-%m-%d").to_string(),
        day_change,
        timezone_difference: format_timezone_difference(tz_diff_hours),
        arrival_weekday: arrival_local.format("%A").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::airport::Airport;
    use std::sync::Arc;

    fn airport(code: &str, lat: f64, lon: f64, tz: &str) -> Airport {
        Airport {
            code: Arc::from(code),
            name: format!("{} International", code),
            city: code.to_string(),
            country: String::new(),
            latitude: lat,
            longitude: lon,
            timezone: tz.to_string(),
        }
    }

    fn reference() -> ReferenceData {
        ReferenceData::new(
            vec![
                airport("JFK", 40.6413, -73.7781, "America/New_York"),
                airport("LAX", 33.9416, -118.4085, "America/Los_Angeles"),
                airport("SIN", 1.3644, 103.9915, "Asia/Singapore"),
                airport("NAN", -17.7553, 177.4431, "Pacific/Fiji"),
                airport("HNL", 21.3245, -157.9251, "Pacific/Honolulu"),
                airport("XXU", 10.0, 10.0, "Mars/Olympus_Mons"),
            ],
            vec![],
        )
    }

    #[test]
    fn test_zero_distance_keeps_fixed_buffer() {
        assert_eq!(estimate_duration_minutes(0.0), 36);
    }

    #[test]
    fn test_transcontinental_westbound() {
        let plan = compute_flight_plan(&reference(), "JFK", "LAX", "2024-07-15", "09:00").unwrap();

        assert!((plan.distance_km - 3974.3).abs() < 1.0, "got {}", plan.distance_km);
        assert_eq!(plan.duration_minutes, 330);
        assert_eq!(plan.duration_formatted, "5h 30m");
        assert_eq!(plan.departure_time_local, "09:00");
        assert_eq!(plan.departure_date_local, "2024-07-15");
        // 13:00Z + 5h30 = 18:30Z, which is 11:30 in Los Angeles.
        assert_eq!(plan.arrival_time_local, "11:30");
        assert_eq!(plan.arrival_date_local, "2024-07-15");
        assert_eq!(plan.day_change, 0);
        assert_eq!(plan.arrival_weekday, "Monday");
        // -3h year-round: both coasts switch DST together.
        assert_eq!(plan.timezone_difference, "-3h");
    }

    #[test]
    fn test_date_line_westbound_same_calendar_day() {
        // An 18-hour flight that lands three wall-clock hours after it
        // left, on the same local date.
        let plan = compute_flight_plan(&reference(), "SIN", "LAX", "2024-07-15", "09:00").unwrap();

        assert_eq!(plan.duration_minutes, 1080);
        assert_eq!(plan.arrival_time_local, "12:00");
        assert_eq!(plan.arrival_date_local, "2024-07-15");
        assert_eq!(plan.day_change, 0);
    }

    #[test]
    fn test_date_line_negative_day_change() {
        let plan = compute_flight_plan(&reference(), "NAN", "HNL", "2024-07-15", "01:00").unwrap();

        assert_eq!(plan.arrival_date_local, "2024-07-14");
        assert_eq!(plan.day_change, -1);
    }

    #[test]
    fn test_overnight_positive_day_change() {
        let plan = compute_flight_plan(&reference(), "LAX", "SIN", "2024-07-15", "09:00").unwrap();

        // 16:00Z + 18h rolls into July 16th everywhere east of UTC+2.
        assert_eq!(plan.arrival_date_local, "2024-07-16");
        assert_eq!(plan.day_change, 1);
    }

    #[test]
    fn test_arrival_is_departure_plus_duration() {
        let plan = compute_flight_plan(&reference(), "JFK", "SIN", "2024-12-31", "23:30").unwrap();

        let elapsed = (plan.arrival_utc - plan.departure_utc).num_minutes();
        assert_eq!(elapsed, plan.duration_minutes);
        // Instant arithmetic rolls over the year boundary.
        assert_eq!(&plan.arrival_date_local[..4], "2025");
    }

    #[test]
    fn test_unknown_airport_names_the_code() {
        let err = compute_flight_plan(&reference(), "ZZZ", "LAX", "2024-07-15", "09:00")
            .unwrap_err();
        assert!(matches!(err, PlanError::UnknownAirport(_)));
        assert!(err.to_string().contains("ZZZ"));
    }

    #[test]
    fn test_malformed_time_names_the_string() {
        let err = compute_flight_plan(&reference(), "JFK", "LAX", "2024-07-15", "25:99")
            .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput(_)));
        assert!(err.to_string().contains("25:99"));
    }

    #[test]
    fn test_malformed_date() {
        let err = compute_flight_plan(&reference(), "JFK", "LAX", "2024-13-40", "09:00")
            .unwrap_err();
        assert!(err.to_string().contains("2024-13-40"));
    }

    #[test]
    fn test_unknown_timezone_reads_wall_time_as_utc() {
        let plan = compute_flight_plan(&reference(), "XXU", "JFK", "2024-07-15", "09:00").unwrap();
        assert_eq!(plan.departure_utc.format("%H:%M").to_string(), "09:00");
    }

    #[test]
    fn test_same_airport_is_buffer_only() {
        let plan = compute_flight_plan(&reference(), "JFK", "JFK", "2024-07-15", "09:00").unwrap();
        assert_eq!(plan.distance_km, 0.0);
        assert_eq!(plan.duration_minutes, 36);
    }

    #[test]
    fn test_duration_formatting() {
        assert_eq!(format_duration(120), "2h");
        assert_eq!(format_duration(90), "1h 30m");
        assert_eq!(format_duration(36), "0h 36m");
    }

    #[test]
    fn test_timezone_difference_formatting() {
        assert_eq!(format_timezone_difference(0.0), "+0h");
        assert_eq!(format_timezone_difference(-3.0), "-3h");
        assert_eq!(format_timezone_difference(4.5), "+4h 30m");
        assert_eq!(format_timezone_difference(-9.5), "-9h 30m");
    }
}
