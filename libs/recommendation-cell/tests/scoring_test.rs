use chrono::NaiveDate;
use uuid::Uuid;

use doctor_cell::models::{Doctor, Specialization};
use recommendation_cell::models::{TimePreference, Urgency};
use recommendation_cell::services::scoring::rank;
use shared_config::SlotSearchConfig;
use shared_models::booking::{AppointmentStatus, BookedSlot};

fn doctor(name: &str, specialization: Specialization, fee: f64) -> Doctor {
    Doctor {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        specialization,
        consultation_fee: fee,
        available_days: vec!["monday".to_string(), "wednesday".to_string()],
        available_hours_start: Some("09:00".to_string()),
        available_hours_end: Some("17:00".to_string()),
        bio: None,
        license_number: None,
        created_at: None,
        updated_at: None,
    }
}

// 2026-03-02 is a Monday.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

fn config() -> SlotSearchConfig {
    SlotSearchConfig::default()
}

#[test]
fn cardiology_symptoms_rank_cardiologist_first() {
    let roster = vec![
        doctor("Derm Doctor", Specialization::Dermatology, 100.0),
        doctor("Heart Doctor", Specialization::Cardiology, 100.0),
    ];

    let results = rank(
        "chest pain and cardiac issues",
        Urgency::Routine,
        TimePreference::Morning,
        roster,
        &[],
        today(),
        &config(),
    );

    assert_eq!(results[0].doctor.full_name, "Heart Doctor");
    assert!(results[0].score > results[1].score);
    assert!(results[0]
        .reasons
        .iter()
        .any(|r| r.contains("Cardiology")));
    // The 30-point match beats the 5-point baseline by exactly 25,
    // everything else being equal.
    assert_eq!(results[0].score - results[1].score, 25.0);
}

#[test]
fn unmatched_general_practitioner_scores_above_unmatched_specialist() {
    let roster = vec![
        doctor("Specialist", Specialization::Neurology, 100.0),
        doctor("Generalist", Specialization::GeneralPractice, 100.0),
    ];

    let results = rank(
        "feeling tired lately",
        Urgency::Routine,
        TimePreference::Any,
        roster,
        &[],
        today(),
        &config(),
    );

    assert_eq!(results[0].doctor.full_name, "Generalist");
    assert!(results[0]
        .reasons
        .iter()
        .any(|r| r.contains("General practitioner")));
}

#[test]
fn urgent_adds_exactly_twenty_points() {
    // Fee of 200+ zeroes the routine-only cost contribution, isolating the
    // urgency delta.
    let make_roster = || vec![doctor("Heart Doctor", Specialization::Cardiology, 200.0)];

    let routine = rank(
        "chest pain",
        Urgency::Routine,
        TimePreference::Morning,
        make_roster(),
        &[],
        today(),
        &config(),
    );
    let urgent = rank(
        "chest pain",
        Urgency::Urgent,
        TimePreference::Morning,
        make_roster(),
        &[],
        today(),
        &config(),
    );

    assert_eq!(urgent[0].score - routine[0].score, 20.0);
    assert!(urgent[0]
        .reasons
        .iter()
        .any(|r| r.contains("urgent care")));
}

#[test]
fn equal_scores_keep_roster_order() {
    let roster = vec![
        doctor("First", Specialization::Neurology, 100.0),
        doctor("Second", Specialization::Neurology, 100.0),
        doctor("Third", Specialization::Neurology, 100.0),
    ];

    let results = rank(
        "no matching keywords",
        Urgency::Routine,
        TimePreference::Any,
        roster,
        &[],
        today(),
        &config(),
    );

    let names: Vec<&str> = results.iter().map(|r| r.doctor.full_name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Third"]);
}

#[test]
fn only_top_five_are_returned() {
    let roster: Vec<Doctor> = (0..8)
        .map(|i| doctor(&format!("Doctor {}", i), Specialization::GeneralPractice, 50.0))
        .collect();

    let results = rank(
        "anything",
        Urgency::Routine,
        TimePreference::Any,
        roster,
        &[],
        today(),
        &config(),
    );

    assert_eq!(results.len(), 5);
}

#[test]
fn empty_roster_yields_empty_list() {
    let results = rank(
        "chest pain",
        Urgency::Urgent,
        TimePreference::Any,
        Vec::new(),
        &[],
        today(),
        &config(),
    );
    assert!(results.is_empty());
}

#[test]
fn busy_doctor_loses_availability_points_and_reason() {
    let quiet = doctor("Quiet", Specialization::Neurology, 100.0);
    let busy = doctor("Busy", Specialization::Neurology, 100.0);

    let bookings: Vec<BookedSlot> = (0..6)
        .map(|i| BookedSlot {
            doctor_id: busy.id,
            appointment_date: today(),
            appointment_time: format!("{:02}:00", 9 + i),
            status: AppointmentStatus::Scheduled,
        })
        .collect();

    let results = rank(
        "no keywords",
        Urgency::Routine,
        TimePreference::Any,
        vec![busy, quiet],
        &bookings,
        today(),
        &config(),
    );

    assert_eq!(results[0].doctor.full_name, "Quiet");
    assert!(results[0].reasons.iter().any(|r| r == "Good availability"));
    assert!(!results[1].reasons.iter().any(|r| r == "Good availability"));
    // Six occupied slots cost six points off the 20-point load bonus.
    assert_eq!(results[0].score - results[1].score, 6.0);
}

#[test]
fn next_slot_and_wait_time_are_attached() {
    let roster = vec![doctor("Heart Doctor", Specialization::Cardiology, 100.0)];

    let results = rank(
        "chest pain",
        Urgency::Routine,
        TimePreference::Morning,
        roster,
        &[],
        today(),
        &config(),
    );

    let slot = results[0].next_available_slot.as_ref().unwrap();
    assert_eq!(slot.date, today());
    assert_eq!(slot.time, "09:00");
    assert_eq!(results[0].estimated_wait_days, 0);
}

#[test]
fn no_availability_days_uses_wait_sentinel() {
    let mut recluse = doctor("Recluse", Specialization::Neurology, 100.0);
    recluse.available_days.clear();

    let results = rank(
        "no keywords",
        Urgency::Routine,
        TimePreference::Any,
        vec![recluse],
        &[],
        today(),
        &config(),
    );

    assert!(results[0].next_available_slot.is_none());
    assert_eq!(results[0].estimated_wait_days, 999);
}

#[test]
fn scoring_is_deterministic() {
    let make_roster = || {
        vec![
            doctor("A", Specialization::Cardiology, 80.0),
            doctor("B", Specialization::GeneralPractice, 40.0),
        ]
    };

    let first = rank(
        "chest pain",
        Urgency::Soon,
        TimePreference::Evening,
        make_roster(),
        &[],
        today(),
        &config(),
    );
    let second = rank(
        "chest pain",
        Urgency::Soon,
        TimePreference::Evening,
        make_roster(),
        &[],
        today(),
        &config(),
    );

    let summary = |rs: &[recommendation_cell::models::Recommendation]| {
        rs.iter()
            .map(|r| (r.doctor.full_name.clone(), r.score, r.reasons.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&first), summary(&second));
}
