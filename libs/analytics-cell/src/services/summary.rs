use anyhow::Result;
use chrono::NaiveDate;
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{AnalyticsSummary, AppointmentRecord, Period};
use crate::services::reports;

pub struct AnalyticsService {
    supabase: SupabaseClient,
}

impl AnalyticsService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Pull the window's appointments (with the doctor and patient facts
    /// embedded) plus the patient headcount, then reduce them to a report.
    pub async fn summary(
        &self,
        period: Period,
        today: NaiveDate,
        auth_token: &str,
    ) -> Result<AnalyticsSummary> {
        let start = period.start_date(today);
        debug!("Building analytics summary from {}", start);

        let path = format!(
            "/rest/v1/appointments?select=appointment_date,status,\
             doctor:doctors(specialization,consultation_fee),\
             patient:patients(date_of_birth)&appointment_date=gte.{}",
            start
        );

        let appointments: Vec<AppointmentRecord> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let patients: Vec<Value> = self
            .supabase
            .request(
                Method::GET,
                "/rest/v1/patients?select=id",
                Some(auth_token),
                None,
            )
            .await?;

        Ok(reports::build_summary(&appointments, patients.len(), today))
    }
}
