use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::services::slots::weekday_name;

/// The fixed set of practice areas. Stored by the backend as the
/// human-readable tag, e.g. "General Practice".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Specialization {
    Cardiology,
    Dermatology,
    Endocrinology,
    Gastroenterology,
    Neurology,
    Orthopedics,
    Pediatrics,
    Psychiatry,
    #[serde(rename = "General Practice")]
    GeneralPractice,
}

impl Specialization {
    pub const ALL: [Specialization; 9] = [
        Specialization::Cardiology,
        Specialization::Dermatology,
        Specialization::Endocrinology,
        Specialization::Gastroenterology,
        Specialization::Neurology,
        Specialization::Orthopedics,
        Specialization::Pediatrics,
        Specialization::Psychiatry,
        Specialization::GeneralPractice,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Specialization::Cardiology => "Cardiology",
            Specialization::Dermatology => "Dermatology",
            Specialization::Endocrinology => "Endocrinology",
            Specialization::Gastroenterology => "Gastroenterology",
            Specialization::Neurology => "Neurology",
            Specialization::Orthopedics => "Orthopedics",
            Specialization::Pediatrics => "Pediatrics",
            Specialization::Psychiatry => "Psychiatry",
            Specialization::GeneralPractice => "General Practice",
        }
    }
}

impl fmt::Display for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A doctor's directory entry together with the recurring weekly
/// availability window used by the slot calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub full_name: String,
    pub specialization: Specialization,
    pub consultation_fee: f64,
    /// Lowercase full English weekday names, e.g. ["monday", "wednesday"].
    #[serde(default)]
    pub available_days: Vec<String>,
    /// "HH:MM" on the hour; absent means no fixed hours published.
    pub available_hours_start: Option<String>,
    pub available_hours_end: Option<String>,
    pub bio: Option<String>,
    pub license_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Doctor {
    pub fn start_hour(&self) -> Option<u32> {
        self.available_hours_start.as_deref().and_then(parse_hour)
    }

    pub fn end_hour(&self) -> Option<u32> {
        self.available_hours_end.as_deref().and_then(parse_hour)
    }

    pub fn is_available_on(&self, weekday: Weekday) -> bool {
        let name = weekday_name(weekday);
        self.available_days
            .iter()
            .any(|day| day.eq_ignore_ascii_case(name))
    }
}

/// Parse the hour component out of an "HH:MM" string. Malformed values
/// degrade to `None` rather than an error.
pub fn parse_hour(time: &str) -> Option<u32> {
    let hour = time.split(':').next()?.parse::<u32>().ok()?;
    (hour < 24).then_some(hour)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub full_name: String,
    pub specialization: Specialization,
    pub consultation_fee: f64,
    pub available_days: Vec<String>,
    pub available_hours_start: Option<String>,
    pub available_hours_end: Option<String>,
    pub bio: Option<String>,
    pub license_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDoctorRequest {
    pub full_name: Option<String>,
    pub specialization: Option<Specialization>,
    pub consultation_fee: Option<f64>,
    pub available_days: Option<Vec<String>>,
    pub available_hours_start: Option<String>,
    pub available_hours_end: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DoctorSearchFilters {
    /// Case-insensitive substring match on the doctor's name.
    pub query: Option<String>,
    pub specialization: Option<Specialization>,
}

/// Response for the per-date slot listing on the booking page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySlotsResponse {
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub slots: Vec<shared_models::booking::TimeSlot>,
}
