use anyhow::{anyhow, Result};
use headers::{HeaderMap, HeaderValue};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{PatientProfile, UpdatePatientProfileRequest};

pub struct PatientService {
    supabase: SupabaseClient,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_profile(
        &self,
        patient_id: &str,
        auth_token: &str,
    ) -> Result<Option<PatientProfile>> {
        debug!("Fetching patient profile: {}", patient_id);

        let path = format!("/rest/v1/patients?id=eq.{}", patient_id);

        let rows: Vec<PatientProfile> = self
            .supabase
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        Ok(rows.into_iter().next())
    }

    /// Create-or-update for the caller's own row. The first save after
    /// sign-up inserts; later saves patch only the provided fields.
    pub async fn upsert_profile(
        &self,
        patient_id: &str,
        request: UpdatePatientProfileRequest,
        auth_token: &str,
    ) -> Result<PatientProfile> {
        let mut fields = serde_json::Map::new();
        if let Some(v) = request.date_of_birth {
            fields.insert("date_of_birth".to_string(), json!(v));
        }
        if let Some(ref v) = request.gender {
            fields.insert("gender".to_string(), json!(v));
        }
        if let Some(ref v) = request.phone {
            fields.insert("phone".to_string(), json!(v));
        }
        if let Some(ref v) = request.address {
            fields.insert("address".to_string(), json!(v));
        }
        if let Some(ref v) = request.emergency_contact_name {
            fields.insert("emergency_contact_name".to_string(), json!(v));
        }
        if let Some(ref v) = request.emergency_contact_phone {
            fields.insert("emergency_contact_phone".to_string(), json!(v));
        }
        if let Some(ref v) = request.medical_history {
            fields.insert("medical_history".to_string(), json!(v));
        }
        fields.insert(
            "updated_at".to_string(),
            json!(chrono::Utc::now().to_rfc3339()),
        );

        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        if self.get_profile(patient_id, auth_token).await?.is_some() {
            debug!("Updating patient profile: {}", patient_id);

            let path = format!("/rest/v1/patients?id=eq.{}", patient_id);
            let rows: Vec<PatientProfile> = self
                .supabase
                .request_with_headers(
                    Method::PATCH,
                    &path,
                    Some(auth_token),
                    Some(Value::Object(fields)),
                    Some(headers),
                )
                .await?;

            rows.into_iter()
                .next()
                .ok_or_else(|| anyhow!("Failed to update patient profile"))
        } else {
            debug!("Creating patient profile: {}", patient_id);

            fields.insert("id".to_string(), json!(patient_id));
            fields.insert(
                "created_at".to_string(),
                json!(chrono::Utc::now().to_rfc3339()),
            );

            let rows: Vec<PatientProfile> = self
                .supabase
                .request_with_headers(
                    Method::POST,
                    "/rest/v1/patients",
                    Some(auth_token),
                    Some(Value::Object(fields)),
                    Some(headers),
                )
                .await?;

            rows.into_iter()
                .next()
                .ok_or_else(|| anyhow!("Failed to create patient profile"))
        }
    }
}
