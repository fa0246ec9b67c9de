use anyhow::Result;
use chrono::NaiveDate;
use tracing::{debug, info};

use appointment_cell::services::booking::future_occupying_bookings;
use doctor_cell::models::DoctorSearchFilters;
use doctor_cell::services::DoctorService;
use shared_config::{AppConfig, SlotSearchConfig};
use shared_database::supabase::SupabaseClient;

use crate::models::{Recommendation, RecommendationRequest};
use crate::services::scoring;

pub struct RecommendationService {
    supabase: SupabaseClient,
    doctor_service: DoctorService,
    booking_config: SlotSearchConfig,
}

impl RecommendationService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            doctor_service: DoctorService::new(config),
            booking_config: config.booking,
        }
    }

    /// Rank the full roster against the patient's symptoms and preferences.
    /// Works on a fresh snapshot per request; an empty roster is a valid
    /// empty result, not an error.
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
        today: NaiveDate,
    ) -> Result<Vec<Recommendation>> {
        let doctors = self
            .doctor_service
            .search_doctors(DoctorSearchFilters::default())
            .await?;
        let bookings = future_occupying_bookings(&self.supabase, today).await?;

        debug!(
            "Scoring {} doctors against {} future bookings",
            doctors.len(),
            bookings.len()
        );

        let recommendations = scoring::rank(
            &request.symptoms,
            request.urgency,
            request.preferred_time,
            doctors,
            &bookings,
            today,
            &self.booking_config,
        );

        info!("Produced {} recommendations", recommendations.len());
        Ok(recommendations)
    }
}
