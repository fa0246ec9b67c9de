use anyhow::{anyhow, Result};
use chrono::{NaiveDate, Utc};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;
use shared_models::booking::{BookedSlot, TimeSlot};

use crate::models::{
    parse_hour, CreateDoctorRequest, Doctor, DoctorSearchFilters, UpdateDoctorRequest,
};
use crate::services::slots;

pub struct DoctorService {
    supabase: SupabaseClient,
}

impl DoctorService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Directory search. Public: row access is governed by the backend.
    pub async fn search_doctors(&self, filters: DoctorSearchFilters) -> Result<Vec<Doctor>> {
        let mut path = "/rest/v1/doctors?order=full_name.asc".to_string();

        if let Some(spec) = filters.specialization {
            path.push_str(&format!("&specialization=eq.{}", urlencode(spec.name())));
        }
        if let Some(query) = filters.query.as_deref() {
            let trimmed = query.trim();
            if !trimmed.is_empty() {
                path.push_str(&format!("&full_name=ilike.*{}*", urlencode(trimmed)));
            }
        }

        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        let doctors = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<Doctor>, _>>()?;

        debug!("Directory search returned {} doctors", doctors.len());
        Ok(doctors)
    }

    pub async fn get_doctor(&self, doctor_id: &str) -> Result<Doctor> {
        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        if result.is_empty() {
            return Err(anyhow!("Doctor not found"));
        }

        let doctor: Doctor = serde_json::from_value(result[0].clone())?;
        Ok(doctor)
    }

    /// Create the doctor profile for the authenticated user. The row id is
    /// the auth user's id so the backend can scope writes to the owner.
    pub async fn create_doctor(
        &self,
        user_id: &str,
        request: CreateDoctorRequest,
        auth_token: &str,
    ) -> Result<Doctor> {
        debug!("Creating doctor profile for user: {}", user_id);
        validate_availability_fields(
            &request.available_days,
            request.available_hours_start.as_deref(),
            request.available_hours_end.as_deref(),
        )?;
        if request.consultation_fee < 0.0 {
            return Err(anyhow!("Consultation fee must be non-negative"));
        }

        let doctor_data = json!({
            "id": user_id,
            "full_name": request.full_name,
            "specialization": request.specialization,
            "consultation_fee": request.consultation_fee,
            "available_days": request.available_days,
            "available_hours_start": request.available_hours_start,
            "available_hours_end": request.available_hours_end,
            "bio": request.bio,
            "license_number": request.license_number,
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
                "/rest/v1/doctors",
                Some(auth_token),
                Some(doctor_data),
                Some(headers),
            )
            .await?;

        if result.is_empty() {
            return Err(anyhow!("Failed to create doctor profile"));
        }

        let doctor: Doctor = serde_json::from_value(result[0].clone())?;
        Ok(doctor)
    }

    pub async fn update_doctor(
        &self,
        doctor_id: &str,
        request: UpdateDoctorRequest,
        auth_token: &str,
    ) -> Result<Doctor> {
        debug!("Updating doctor profile: {}", doctor_id);

        if let Some(days) = &request.available_days {
            validate_availability_fields(
                days,
                request.available_hours_start.as_deref(),
                request.available_hours_end.as_deref(),
            )?;
        }
        if let Some(fee) = request.consultation_fee {
            if fee < 0.0 {
                return Err(anyhow!("Consultation fee must be non-negative"));
            }
        }

        let mut update_data = serde_json::Map::new();
        if let Some(full_name) = request.full_name {
            update_data.insert("full_name".to_string(), json!(full_name));
        }
        if let Some(spec) = request.specialization {
            update_data.insert("specialization".to_string(), json!(spec));
        }
        if let Some(fee) = request.consultation_fee {
            update_data.insert("consultation_fee".to_string(), json!(fee));
        }
        if let Some(days) = request.available_days {
            update_data.insert("available_days".to_string(), json!(days));
        }
        if let Some(start) = request.available_hours_start {
            update_data.insert("available_hours_start".to_string(), json!(start));
        }
        if let Some(end) = request.available_hours_end {
            update_data.insert("available_hours_end".to_string(), json!(end));
        }
        if let Some(bio) = request.bio {
            update_data.insert("bio".to_string(), json!(bio));
        }
        update_data.insert("updated_at".to_string(), json!(Utc::now().to_rfc3339()));

        let path = format!("/rest/v1/doctors?id=eq.{}", doctor_id);
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
                Some(Value::Object(update_data)),
                Some(headers),
            )
            .await?;

        if result.is_empty() {
            return Err(anyhow!("Failed to update doctor profile"));
        }

        let doctor: Doctor = serde_json::from_value(result[0].clone())?;
        Ok(doctor)
    }

    /// Bookable slots for one doctor on one date, checked against the live
    /// occupying bookings. Dates outside the doctor's weekly availability or
    /// in the past yield an empty list.
    pub async fn get_available_slots(
        &self,
        doctor_id: &str,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<Vec<TimeSlot>> {
        let doctor = self.get_doctor(doctor_id).await?;

        if !slots::is_candidate_date(&doctor, date, today) {
            debug!("{} is not a candidate booking date for doctor {}", date, doctor_id);
            return Ok(Vec::new());
        }

        let booked = self.occupying_bookings_for_date(doctor_id, date).await?;
        Ok(slots::day_slots(&doctor, date, &booked))
    }

    async fn occupying_bookings_for_date(
        &self,
        doctor_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<BookedSlot>> {
        let path = format!(
            "/rest/v1/appointments?doctor_id=eq.{}&appointment_date=eq.{}&status=in.(scheduled,confirmed)&select=doctor_id,appointment_date,appointment_time,status",
            doctor_id, date
        );

        let result: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;

        let booked = result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<BookedSlot>, _>>()?;

        Ok(booked)
    }
}

fn validate_availability_fields(
    days: &[String],
    start: Option<&str>,
    end: Option<&str>,
) -> Result<()> {
    for day in days {
        if !slots::WEEKDAY_NAMES.contains(&day.to_lowercase().as_str()) {
            return Err(anyhow!("Unknown weekday: {}", day));
        }
    }

    if let (Some(start), Some(end)) = (start, end) {
        let start_hour = parse_hour(start).ok_or_else(|| anyhow!("Invalid start time: {}", start))?;
        let end_hour = parse_hour(end).ok_or_else(|| anyhow!("Invalid end time: {}", end))?;
        if start_hour >= end_hour {
            return Err(anyhow!("Start time must be before end time"));
        }
    }

    Ok(())
}

fn urlencode(value: &str) -> String {
    value.replace(' ', "%20")
}
