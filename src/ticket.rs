use crate::airline::Airline;
use crate::airport::Airport;
use crate::plan::{self, FlightPlan};
use chrono::{Duration, NaiveTime};
use colored::Colorize;
use rand::Rng;
use std::fmt;
use std::fmt::Formatter;

const BOOKING_REF_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn generate_booking_reference(rng: &mut impl Rng) -> String {
    (0..6)
        .map(|_| BOOKING_REF_CHARS[rng.gen_range(0..BOOKING_REF_CHARS.len())] as char)
        .collect()
}

pub fn generate_gate(rng: &mut impl Rng) -> String {
    let letter = (b'A' + rng.gen_range(0..5u8)) as char;
    format!("{}{}", letter, rng.gen_range(1..=30))
}

pub fn generate_seat(rng: &mut impl Rng) -> String {
    let letter = (b'A' + rng.gen_range(0..6u8)) as char;
    format!("{}{}", rng.gen_range(1..=45), letter)
}

/// Flight numbers are the airline code plus 1 to 5 digits.
pub fn valid_flight_digits(digits: &str) -> bool {
    !digits.is_empty() && digits.len() <= 5 && digits.chars().all(|c| c.is_ascii_digit())
}

/// Boarding opens 30 minutes before departure, in origin wall-clock time.
pub fn boarding_time(departure_time_local: &str) -> Option<String> {
    let departure = NaiveTime::parse_from_str(departure_time_local, "%H:%M").ok()?;
    Some((departure - Duration::minutes(30)).format("%H:%M").to_string())
}

/// A fully assembled (fictitious) boarding pass, ready to print.
pub struct BoardingPass {
    pub passenger: String,
    pub airline: Airline,
    pub flight_number: String,
    pub origin: Airport,
    pub destination: Airport,
    pub plan: FlightPlan,
    pub boarding_time: String,
    pub seat: String,
    pub gate: String,
    pub booking_reference: String,
}

impl BoardingPass {
    pub fn assemble(
        rng: &mut impl Rng,
        passenger: String,
        airline: Airline,
        flight_digits: &str,
        origin: Airport,
        destination: Airport,
        plan: FlightPlan,
    ) -> BoardingPass {
        let boarding_time =
            boarding_time(&plan.departure_time_local).unwrap_or_else(|| plan.departure_time_local.clone());
        BoardingPass {
            passenger,
            flight_number: format!("{}{}", airline.code.to_uppercase(), flight_digits),
            airline,
            origin,
            destination,
            boarding_time,
            seat: generate_seat(rng),
            gate: generate_gate(rng),
            booking_reference: generate_booking_reference(rng),
            plan,
        }
    }
}

impl fmt::Display for BoardingPass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rule = "─".repeat(62);
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            " {}  {}    {}",
            self.airline.name.to_uppercase().bold(),
            self.flight_number.bold().cyan(),
            "BOARDING PASS".bold()
        )?;
        writeln!(f, " {}", self.passenger.to_uppercase())?;
        writeln!(
            f,
            " {} {}  →  {} {}",
            self.origin.code.to_string().bold(),
            self.origin.city,
            self.destination.code.to_string().bold(),
            self.destination.city
        )?;
        writeln!(
            f,
            " Date {}   Boarding {}   Departs {}",
            self.plan.departure_date_local,
            self.boarding_time.bold(),
            self.plan.departure_time_local.bold()
        )?;
        writeln!(
            f,
            " Arrives {} ({}, {})",
            self.plan.arrival_time_local.bold(),
            self.plan.arrival_date_local,
            self.plan.arrival_weekday
        )?;
        writeln!(
            f,
            " Seat {}   Gate {}   Ref {}",
            self.seat.bold().green(),
            self.gate.bold().green(),
            self.booking_reference.bold().green()
        )?;
        writeln!(
            f,
            " Duration {}   Distance {}   Time zones {}",
            self.plan.duration_formatted,
            plan::format_distance(self.plan.distance_km),
            self.plan.timezone_difference
        )?;
        write!(f, "{}", rule)
    }
}
