use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::booking::AppointmentStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    /// On-the-hour "HH:MM" string, as produced by the slot calculator.
    pub appointment_time: String,
    pub reason_for_visit: String,
    pub status: AppointmentStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub doctor_id: Uuid,
    pub appointment_date: NaiveDate,
    pub appointment_time: String,
    pub reason_for_visit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: AppointmentStatus,
}

/// Role-scoped appointment listing, split the way the dashboards render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentLists {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
}

/// Status transitions the lifecycle endpoint accepts. Everything else is
/// rejected; completed, cancelled and no_show are terminal.
pub fn can_transition(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;
    matches!(
        (from, to),
        (Scheduled, Confirmed)
            | (Scheduled, Cancelled)
            | (Confirmed, Completed)
            | (Confirmed, Cancelled)
            | (Confirmed, NoShow)
    )
}

/// Split a snapshot of appointments into upcoming and past buckets.
/// Cancelled appointments never show as upcoming; completed ones always
/// count as past regardless of date.
pub fn categorize(appointments: Vec<Appointment>, today: NaiveDate) -> AppointmentLists {
    let mut upcoming = Vec::new();
    let mut past = Vec::new();

    for appointment in appointments {
        let is_upcoming = appointment.appointment_date >= today
            && appointment.status != AppointmentStatus::Cancelled
            && appointment.status != AppointmentStatus::Completed;

        if is_upcoming {
            upcoming.push(appointment);
        } else {
            past.push(appointment);
        }
    }

    upcoming.sort_by(|a, b| {
        (a.appointment_date, a.appointment_time.as_str())
            .cmp(&(b.appointment_date, b.appointment_time.as_str()))
    });
    past.sort_by(|a, b| {
        (b.appointment_date, b.appointment_time.as_str())
            .cmp(&(a.appointment_date, a.appointment_time.as_str()))
    });

    AppointmentLists { upcoming, past }
}
