//! Slot availability calculator.
//!
//! Pure functions over a doctor's weekly availability window and a snapshot
//! of booked appointments. "Today" is always an explicit parameter so the
//! same inputs always produce the same output.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use shared_config::SlotSearchConfig;
use shared_models::booking::{BookedSlot, NextSlot, TimeSlot};

use crate::models::Doctor;

/// Wait-time sentinel used when no slot exists inside the search horizon.
/// Sorts such candidates last wherever wait time is a factor.
pub const NO_SLOT_WAIT_DAYS: i64 = 999;

/// The only weekday vocabulary in the system: lowercase full English names,
/// matching what the backend stores in a doctor's `available_days`.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

/// A date can host a booking iff its weekday is one of the doctor's
/// availability days and it is not in the past (today counts).
pub fn is_candidate_date(doctor: &Doctor, date: NaiveDate, today: NaiveDate) -> bool {
    doctor.is_available_on(date.weekday()) && date >= today
}

/// Generate the hourly slots for one date, flagging the hours already taken
/// by an occupying booking. Doctors without published hours get zero slots;
/// malformed bounds degrade the same way.
pub fn day_slots(doctor: &Doctor, date: NaiveDate, booked: &[BookedSlot]) -> Vec<TimeSlot> {
    let (Some(start), Some(end)) = (doctor.start_hour(), doctor.end_hour()) else {
        return Vec::new();
    };

    let taken: Vec<&str> = booked
        .iter()
        .filter(|b| {
            b.doctor_id == doctor.id && b.appointment_date == date && b.status.is_occupying()
        })
        .map(|b| b.appointment_time.as_str())
        .collect();

    // Half-open range: 09:00-17:00 publishes 09:00 through 16:00.
    (start..end)
        .map(|hour| {
            let time = format!("{:02}:00", hour);
            let available = !taken.iter().any(|t| *t == time);
            TimeSlot { time, available }
        })
        .collect()
}

/// Find the nearest day with spare capacity inside the search horizon.
///
/// This is a coarse per-day heuristic: a day qualifies when its occupying
/// booking count is under the daily capacity ceiling, without checking which
/// specific hour is free. The booking flow re-validates per hour.
pub fn next_available_slot(
    doctor: &Doctor,
    bookings: &[BookedSlot],
    today: NaiveDate,
    config: &SlotSearchConfig,
) -> Option<NextSlot> {
    for offset in 0..config.search_horizon_days.max(0) as u64 {
        let date = today.checked_add_days(Days::new(offset))?;

        if !doctor.is_available_on(date.weekday()) {
            continue;
        }

        let booked_count = bookings
            .iter()
            .filter(|b| {
                b.doctor_id == doctor.id && b.appointment_date == date && b.status.is_occupying()
            })
            .count();

        if booked_count < config.daily_capacity {
            let time = doctor
                .start_hour()
                .map(|h| format!("{:02}:00", h))
                .unwrap_or_else(|| "09:00".to_string());
            return Some(NextSlot { date, time });
        }
    }

    None
}

/// Whole calendar days between today and the found date.
pub fn wait_days(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn weekday_names_are_lowercase_full_names() {
        assert_eq!(weekday_name(Weekday::Mon), "monday");
        assert_eq!(weekday_name(Weekday::Sun), "sunday");
    }

    #[test]
    fn wait_days_counts_calendar_days() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(wait_days(today, today), 0);
        assert_eq!(
            wait_days(today, NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()),
            7
        );
    }
}
