use serde::{Deserialize, Serialize};
use std::fmt;

use doctor_cell::models::Doctor;
use shared_models::booking::NextSlot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Routine,
    Soon,
    Urgent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimePreference {
    Morning,
    Afternoon,
    Evening,
    Any,
}

impl fmt::Display for TimePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimePreference::Morning => write!(f, "morning"),
            TimePreference::Afternoon => write!(f, "afternoon"),
            TimePreference::Evening => write!(f, "evening"),
            TimePreference::Any => write!(f, "any"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRequest {
    /// Free-text symptoms or reason for visit.
    pub symptoms: String,
    pub urgency: Urgency,
    pub preferred_time: TimePreference,
}

/// One ranked candidate. The score is an additive accumulator over
/// independent heuristics; reasons keep the order the contributions were
/// evaluated in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub doctor: Doctor,
    pub score: f64,
    pub reasons: Vec<String>,
    pub next_available_slot: Option<NextSlot>,
    /// Whole days until the nearest open slot; 999 when none was found
    /// inside the search horizon.
    pub estimated_wait_days: i64,
}
