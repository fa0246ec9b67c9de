use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of an appointment as stored by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Only scheduled and confirmed appointments reserve a (doctor, date, time)
    /// slot against new bookings. The other statuses free the slot.
    pub fn is_occupying(self) -> bool {
        matches!(self, AppointmentStatus::Scheduled | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
        }
    }
}

/// Minimal view of a booked appointment, enough to decide slot occupancy.
/// Times are on-the-hour "HH:MM" strings, dates are "YYYY-MM-DD".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookedSlot {
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub status: AppointmentStatus,
}

/// A bookable (or taken) hour on a specific day. Derived per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub time: String,
    pub available: bool,
}

/// The nearest open slot found by the capacity search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextSlot {
    pub date: NaiveDate,
    pub time: String,
}
