use chrono::NaiveDate;

use analytics_cell::models::{AppointmentRecord, DoctorFacts, PatientFacts, Period};
use analytics_cell::services::reports::build_summary;
use doctor_cell::models::Specialization;
use shared_models::booking::AppointmentStatus;

fn record(
    date: &str,
    status: AppointmentStatus,
    specialization: Specialization,
    fee: f64,
    dob: Option<&str>,
) -> AppointmentRecord {
    AppointmentRecord {
        appointment_date: date.parse().unwrap(),
        status,
        doctor: DoctorFacts {
            specialization,
            consultation_fee: fee,
        },
        patient: PatientFacts {
            date_of_birth: dob.map(|d| d.parse().unwrap()),
        },
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
}

#[test]
fn totals_and_revenue_count_only_completed_visits() {
    use AppointmentStatus::*;
    let rows = vec![
        record("2026-03-02", Completed, Specialization::Cardiology, 150.0, None),
        record("2026-03-03", Completed, Specialization::Cardiology, 150.0, None),
        record("2026-03-04", Cancelled, Specialization::Dermatology, 90.0, None),
        record("2026-03-05", Scheduled, Specialization::Dermatology, 90.0, None),
    ];

    let summary = build_summary(&rows, 12, today());

    assert_eq!(summary.total_patients, 12);
    assert_eq!(summary.total_appointments, 4);
    assert_eq!(summary.completed_appointments, 2);
    assert_eq!(summary.cancelled_appointments, 1);
    assert_eq!(summary.total_revenue, 300.0);
}

#[test]
fn status_breakdown_lists_every_status_including_zeroes() {
    let rows = vec![record(
        "2026-03-02",
        AppointmentStatus::Confirmed,
        Specialization::Neurology,
        100.0,
        None,
    )];

    let summary = build_summary(&rows, 1, today());

    let pairs: Vec<(&str, usize)> = summary
        .appointments_by_status
        .iter()
        .map(|s| (s.status.as_str(), s.count))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Completed", 0),
            ("Confirmed", 1),
            ("Scheduled", 0),
            ("Cancelled", 0),
            ("No Show", 0),
        ]
    );
}

#[test]
fn monthly_trend_covers_six_months_and_buckets_revenue() {
    use AppointmentStatus::*;
    let rows = vec![
        // Two in March 2026, one completed.
        record("2026-03-02", Completed, Specialization::Cardiology, 200.0, None),
        record("2026-03-09", Scheduled, Specialization::Cardiology, 200.0, None),
        // One completed in January 2026.
        record("2026-01-20", Completed, Specialization::Dermatology, 80.0, None),
        // Before the trend window entirely.
        record("2025-09-01", Completed, Specialization::Dermatology, 80.0, None),
    ];

    let summary = build_summary(&rows, 3, today());
    let trend = &summary.appointments_by_month;

    assert_eq!(trend.len(), 6);
    assert_eq!(trend[0].month, "Oct 2025");
    assert_eq!(trend[5].month, "Mar 2026");

    let march = &trend[5];
    assert_eq!(march.appointments, 2);
    assert_eq!(march.revenue, 200.0);

    let january = trend.iter().find(|b| b.month == "Jan 2026").unwrap();
    assert_eq!(january.appointments, 1);
    assert_eq!(january.revenue, 80.0);

    let october = &trend[0];
    assert_eq!(october.appointments, 0);
    assert_eq!(october.revenue, 0.0);
}

#[test]
fn busy_days_rank_highest_first_and_skip_empty_days() {
    use AppointmentStatus::*;
    // 2026-03-02 is a Monday, 2026-03-03 a Tuesday.
    let rows = vec![
        record("2026-03-03", Scheduled, Specialization::Neurology, 50.0, None),
        record("2026-03-10", Scheduled, Specialization::Neurology, 50.0, None),
        record("2026-03-02", Scheduled, Specialization::Neurology, 50.0, None),
    ];

    let summary = build_summary(&rows, 1, today());
    let ranking: Vec<(&str, usize)> = summary
        .busy_days
        .iter()
        .map(|d| (d.day.as_str(), d.appointments))
        .collect();

    assert_eq!(ranking, vec![("Tuesday", 2), ("Monday", 1)]);
}

#[test]
fn demographics_bucket_by_calendar_year_age() {
    use AppointmentStatus::*;
    let rows = vec![
        record("2026-03-02", Completed, Specialization::Pediatrics, 60.0, Some("2015-06-01")),
        record("2026-03-03", Completed, Specialization::Cardiology, 60.0, Some("1990-06-01")),
        record("2026-03-04", Completed, Specialization::Cardiology, 60.0, Some("1950-06-01")),
        // No birth date on record, skipped.
        record("2026-03-05", Completed, Specialization::Cardiology, 60.0, None),
    ];

    let summary = build_summary(&rows, 4, today());
    let buckets: Vec<(&str, usize)> = summary
        .patient_demographics
        .iter()
        .map(|g| (g.age_group.as_str(), g.count))
        .collect();

    assert_eq!(
        buckets,
        vec![("0-18", 1), ("19-30", 0), ("31-45", 1), ("46-60", 0), ("60+", 1)]
    );
}

#[test]
fn specialization_breakdown_omits_unused_specializations() {
    use AppointmentStatus::*;
    let rows = vec![
        record("2026-03-02", Scheduled, Specialization::Cardiology, 50.0, None),
        record("2026-03-03", Scheduled, Specialization::Cardiology, 50.0, None),
        record("2026-03-04", Scheduled, Specialization::GeneralPractice, 50.0, None),
    ];

    let summary = build_summary(&rows, 2, today());
    let pairs: Vec<(Specialization, usize)> = summary
        .appointments_by_specialization
        .iter()
        .map(|s| (s.specialization, s.count))
        .collect();

    assert_eq!(
        pairs,
        vec![
            (Specialization::Cardiology, 2),
            (Specialization::GeneralPractice, 1),
        ]
    );
}

#[test]
fn period_start_is_first_of_month_n_months_back() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
    assert_eq!(
        Period::OneMonth.start_date(today),
        NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
    );
    assert_eq!(
        Period::SixMonths.start_date(today),
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    );
    assert_eq!(
        Period::OneYear.start_date(today),
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    );
}
