use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use doctor_cell::models::Specialization;
use shared_models::booking::AppointmentStatus;

/// Reporting window, counted back in whole calendar months from today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1month")]
    OneMonth,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    #[serde(rename = "1year")]
    OneYear,
}

impl Default for Period {
    fn default() -> Self {
        Period::SixMonths
    }
}

impl Period {
    pub fn months(self) -> u32 {
        match self {
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
            Period::OneYear => 12,
        }
    }

    /// First day of the month `months()` calendar months before today.
    pub fn start_date(self, today: NaiveDate) -> NaiveDate {
        let month_start = today.with_day(1).unwrap_or(today);
        month_start
            .checked_sub_months(Months::new(self.months()))
            .unwrap_or(month_start)
    }
}

/// Appointment row joined with the doctor and patient facts the report
/// needs, as returned by the backend's embedded select.
#[derive(Debug, Clone, Deserialize)]
pub struct AppointmentRecord {
    pub appointment_date: NaiveDate,
    pub status: AppointmentStatus,
    pub doctor: DoctorFacts,
    pub patient: PatientFacts,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DoctorFacts {
    pub specialization: Specialization,
    pub consultation_fee: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PatientFacts {
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub month: String,
    pub appointments: usize,
    pub revenue: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecializationCount {
    pub specialization: Specialization,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayCount {
    pub day: String,
    pub appointments: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgeGroupCount {
    pub age_group: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_patients: usize,
    pub total_appointments: usize,
    pub completed_appointments: usize,
    pub cancelled_appointments: usize,
    pub total_revenue: f64,
    pub appointments_by_month: Vec<MonthlyBucket>,
    pub appointments_by_status: Vec<StatusCount>,
    pub appointments_by_specialization: Vec<SpecializationCount>,
    pub busy_days: Vec<DayCount>,
    pub patient_demographics: Vec<AgeGroupCount>,
}
