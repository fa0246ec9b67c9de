//! Candidate scoring engine.
//!
//! A fixed weighted-sum heuristic over a doctor roster: symptom keywords
//! against a specialization table, availability breadth, urgency, time-of-day
//! fit and cost. Pure over (inputs, today) like the slot calculator; the
//! caller supplies a fresh snapshot of doctors and future occupying bookings.

use chrono::NaiveDate;

use doctor_cell::models::{Doctor, Specialization};
use doctor_cell::services::slots::{next_available_slot, wait_days, NO_SLOT_WAIT_DAYS};
use shared_config::SlotSearchConfig;
use shared_models::booking::BookedSlot;

use crate::models::{Recommendation, TimePreference, Urgency};

const SPECIALIZATION_MATCH_POINTS: f64 = 30.0;
const GENERAL_PRACTICE_POINTS: f64 = 15.0;
const BASELINE_POINTS: f64 = 5.0;
const URGENCY_POINTS: f64 = 20.0;
const POINTS_PER_AVAILABLE_DAY: f64 = 3.0;
const LIGHT_LOAD_REASON_THRESHOLD: usize = 5;
const TOP_RESULTS: usize = 5;

/// Symptom keyword rules, tested in declared order; the first rule whose
/// keyword appears in the text and whose specialization matches the doctor
/// wins. No accumulation across rules.
const SYMPTOM_RULES: [(&[&str], Specialization); 8] = [
    (
        &["heart", "chest", "cardiac", "blood pressure"],
        Specialization::Cardiology,
    ),
    (
        &["skin", "rash", "acne", "dermatitis"],
        Specialization::Dermatology,
    ),
    (
        &["diabetes", "thyroid", "hormone"],
        Specialization::Endocrinology,
    ),
    (
        &["stomach", "digestive", "nausea", "gastro"],
        Specialization::Gastroenterology,
    ),
    (
        &["headache", "neurological", "seizure"],
        Specialization::Neurology,
    ),
    (
        &["bone", "joint", "fracture", "orthopedic"],
        Specialization::Orthopedics,
    ),
    (
        &["child", "pediatric", "infant"],
        Specialization::Pediatrics,
    ),
    (
        &["mental", "depression", "anxiety"],
        Specialization::Psychiatry,
    ),
];

/// Score every doctor in the roster and return the top five, sorted by
/// descending score. The sort is stable, so equal scores keep their
/// original roster order.
pub fn rank(
    symptoms: &str,
    urgency: Urgency,
    preferred_time: TimePreference,
    doctors: Vec<Doctor>,
    bookings: &[BookedSlot],
    today: NaiveDate,
    config: &SlotSearchConfig,
) -> Vec<Recommendation> {
    let symptoms_lower = symptoms.to_lowercase();

    let mut recommendations: Vec<Recommendation> = doctors
        .into_iter()
        .map(|doctor| score_doctor(&symptoms_lower, urgency, preferred_time, doctor, bookings, today, config))
        .collect();

    recommendations.sort_by(|a, b| b.score.total_cmp(&a.score));
    recommendations.truncate(TOP_RESULTS);
    recommendations
}

fn score_doctor(
    symptoms_lower: &str,
    urgency: Urgency,
    preferred_time: TimePreference,
    doctor: Doctor,
    bookings: &[BookedSlot],
    today: NaiveDate,
    config: &SlotSearchConfig,
) -> Recommendation {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let (spec_score, spec_reason) = specialization_match(symptoms_lower, doctor.specialization);
    score += spec_score;
    if let Some(reason) = spec_reason {
        reasons.push(reason);
    }

    let (availability, availability_reason) = availability_score(&doctor, bookings);
    score += availability;
    if let Some(reason) = availability_reason {
        reasons.push(reason.to_string());
    }

    if urgency == Urgency::Urgent {
        score += URGENCY_POINTS;
        reasons.push("Prioritized for urgent care".to_string());
    }

    let time_score = time_preference_score(&doctor, preferred_time);
    score += time_score;
    if time_score > 0.0 {
        reasons.push(format!(
            "Available during preferred {} hours",
            preferred_time
        ));
    }

    if urgency == Urgency::Routine {
        let cost_score = (20.0 - doctor.consultation_fee / 10.0).max(0.0);
        score += cost_score;
        if cost_score > 10.0 {
            reasons.push("Cost-effective option".to_string());
        }
    }

    let next_slot = next_available_slot(&doctor, bookings, today, config);
    let estimated_wait_days = next_slot
        .as_ref()
        .map(|slot| wait_days(today, slot.date))
        .unwrap_or(NO_SLOT_WAIT_DAYS);

    Recommendation {
        doctor,
        score,
        reasons,
        next_available_slot: next_slot,
        estimated_wait_days,
    }
}

/// First matching keyword rule wins; unmatched general practitioners get a
/// moderate score for any symptoms, everyone else a small baseline with no
/// stated reason.
fn specialization_match(
    symptoms_lower: &str,
    specialization: Specialization,
) -> (f64, Option<String>) {
    for (keywords, spec) in SYMPTOM_RULES {
        let keyword_hit = keywords.iter().any(|k| symptoms_lower.contains(k));
        if keyword_hit && specialization == spec {
            return (
                SPECIALIZATION_MATCH_POINTS,
                Some(format!("Specialized in {} for your symptoms", spec)),
            );
        }
    }

    if specialization == Specialization::GeneralPractice {
        return (
            GENERAL_PRACTICE_POINTS,
            Some("General practitioner suitable for various conditions".to_string()),
        );
    }

    (BASELINE_POINTS, None)
}

/// More declared days and a lighter future booking load both raise the
/// score. The booking count spans every supplied future occupying booking
/// for the doctor, not a single date.
fn availability_score(doctor: &Doctor, bookings: &[BookedSlot]) -> (f64, Option<&'static str>) {
    let booked_count = bookings
        .iter()
        .filter(|b| b.doctor_id == doctor.id && b.status.is_occupying())
        .count();

    let score = doctor.available_days.len() as f64 * POINTS_PER_AVAILABLE_DAY
        + (20.0 - booked_count as f64).max(0.0);

    let reason = (booked_count < LIGHT_LOAD_REASON_THRESHOLD).then_some("Good availability");
    (score, reason)
}

/// Zero unless both hour bounds are published and parseable.
fn time_preference_score(doctor: &Doctor, preference: TimePreference) -> f64 {
    let (Some(start), Some(end)) = (doctor.start_hour(), doctor.end_hour()) else {
        return 0.0;
    };

    match preference {
        TimePreference::Morning if start <= 9 => 10.0,
        TimePreference::Afternoon if start <= 14 && end >= 14 => 10.0,
        TimePreference::Evening if end >= 17 => 10.0,
        TimePreference::Any => 5.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_order_is_first_match_wins() {
        // "chest" appears in the cardiology rule only; a dermatology doctor
        // falls through to the baseline.
        let (score, reason) = specialization_match("chest pain", Specialization::Dermatology);
        assert_eq!(score, BASELINE_POINTS);
        assert!(reason.is_none());

        let (score, reason) = specialization_match("chest pain", Specialization::Cardiology);
        assert_eq!(score, SPECIALIZATION_MATCH_POINTS);
        assert!(reason.unwrap().contains("Cardiology"));
    }
}
