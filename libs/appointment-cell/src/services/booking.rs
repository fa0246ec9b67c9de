use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use doctor_cell::services::slots;
use doctor_cell::services::DoctorService;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::booking::{AppointmentStatus, BookedSlot};

use crate::models::{can_transition, Appointment, BookAppointmentRequest, UpdateStatusRequest};

pub struct BookingService {
    supabase: SupabaseClient,
    doctor_service: DoctorService,
}

#[derive(Debug)]
pub enum BookingError {
    DoctorNotFound,
    InvalidSlot(String),
    SlotTaken,
    InvalidTransition(String),
    NotFound,
    Backend(anyhow::Error),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::DoctorNotFound => write!(f, "Doctor not found"),
            BookingError::InvalidSlot(msg) => write!(f, "Invalid slot: {}", msg),
            BookingError::SlotTaken => write!(f, "Slot no longer available"),
            BookingError::InvalidTransition(msg) => write!(f, "Invalid status change: {}", msg),
            BookingError::NotFound => write!(f, "Appointment not found"),
            BookingError::Backend(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for BookingError {}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            doctor_service: DoctorService::new(config),
        }
    }

    /// Book a slot for the calling patient. The slot is re-validated against
    /// live data here, but the authoritative guard against a concurrent
    /// double-booking is the backend's uniqueness constraint on
    /// (doctor, date, time) among occupying statuses.
    pub async fn book_appointment(
        &self,
        patient_id: &str,
        request: BookAppointmentRequest,
        today: NaiveDate,
        auth_token: &str,
    ) -> Result<Appointment, BookingError> {
        debug!(
            "Booking {} {} with doctor {} for patient {}",
            request.appointment_date, request.appointment_time, request.doctor_id, patient_id
        );

        if request.reason_for_visit.trim().is_empty() {
            return Err(BookingError::InvalidSlot(
                "Reason for visit is required".to_string(),
            ));
        }

        let doctor = self
            .doctor_service
            .get_doctor(&request.doctor_id.to_string())
            .await
            .map_err(|_| BookingError::DoctorNotFound)?;

        if !slots::is_candidate_date(&doctor, request.appointment_date, today) {
            return Err(BookingError::InvalidSlot(
                "Doctor is not available on this date".to_string(),
            ));
        }

        let day = self
            .doctor_service
            .get_available_slots(&request.doctor_id.to_string(), request.appointment_date, today)
            .await
            .map_err(BookingError::Backend)?;

        match day.iter().find(|s| s.time == request.appointment_time) {
            Some(slot) if slot.available => {}
            Some(_) => return Err(BookingError::SlotTaken),
            None => {
                return Err(BookingError::InvalidSlot(
                    "Time is outside the doctor's hours".to_string(),
                ))
            }
        }

        let appointment_data = json!({
            "patient_id": patient_id,
            "doctor_id": request.doctor_id,
            "appointment_date": request.appointment_date,
            "appointment_time": request.appointment_time,
            "reason_for_visit": request.reason_for_visit,
            "status": AppointmentStatus::Scheduled,
            "created_at": Utc::now().to_rfc3339(),
            "updated_at": Utc::now().to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(auth_token),
                Some(appointment_data),
                Some(headers),
            )
            .await
            .map_err(|e| {
                if shared_database::supabase::ApiError::is_conflict(&e) {
                    warn!("Lost the booking race for doctor {}", request.doctor_id);
                    BookingError::SlotTaken
                } else {
                    BookingError::Backend(e)
                }
            })?;

        let appointment = result
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::Backend(anyhow!("Failed to create appointment")))?;

        serde_json::from_value(appointment).map_err(|e| BookingError::Backend(e.into()))
    }

    pub async fn list_for_patient(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>> {
        let path = format!(
            "/rest/v1/appointments?patient_id=eq.{}&order=appointment_date.asc,appointment_time.asc",
            patient_id
        );
        self.fetch_appointments(&path, auth_token).await
    }

    pub async fn list_for_doctor(
        &self,
        doctor_id: &str,
        auth_token: &str,
    ) -> Result<Vec<Appointment>> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&order=appointment_date.asc,appointment_time.asc",
            doctor_id
        );
        self.fetch_appointments(&path, auth_token).await
    }

    /// Apply a lifecycle change (confirm, cancel, complete, no_show).
    /// Row-level authorization decides who may touch the row; we only check
    /// the transition itself.
    pub async fn update_status(
        &self,
        appointment_id: &str,
        request: UpdateStatusRequest,
        auth_token: &str,
    ) -> Result<Appointment, BookingError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let existing: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(BookingError::Backend)?;

        let current: Appointment = existing
            .into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| BookingError::Backend(e.into()))?
            .ok_or(BookingError::NotFound)?;

        if !can_transition(current.status, request.status) {
            return Err(BookingError::InvalidTransition(format!(
                "cannot move from {} to {}",
                current.status, request.status
            )));
        }

        let update_data = json!({
            "status": request.status,
            "updated_at": Utc::now().to_rfc3339()
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(auth_token),
                Some(update_data),
                Some(headers),
            )
            .await
            .map_err(BookingError::Backend)?;

        result
            .into_iter()
            .next()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| BookingError::Backend(e.into()))?
            .ok_or(BookingError::NotFound)
    }

    async fn fetch_appointments(&self, path: &str, auth_token: &str) -> Result<Vec<Appointment>> {
        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, path, Some(auth_token), None)
            .await?;

        let appointments = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Appointment>, _>>()?;

        Ok(appointments)
    }
}

/// Occupying bookings dated today or later, for recommendation scoring.
pub async fn future_occupying_bookings(
    supabase: &SupabaseClient,
    today: NaiveDate,
) -> Result<Vec<BookedSlot>> {
    let path = format!(
        "/rest/v1/appointments?appointment_date=gte.{}&status=in.(scheduled,confirmed)&select=doctor_id,appointment_date,appointment_time,status",
        today
    );

    let result: Vec<Value> = supabase.request(Method::GET, &path, None, None).await?;

    let booked = result
        .into_iter()
        .map(serde_json::from_value)
        .collect::<std::result::Result<Vec<BookedSlot>, _>>()?;

    Ok(booked)
}
