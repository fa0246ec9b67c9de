//! Practice-report computation over a snapshot of appointment rows.
//! Everything here is pure; the service layer feeds it backend data and
//! an explicit `today` so reports are reproducible.

use chrono::{Datelike, Months, NaiveDate, Weekday};

use doctor_cell::models::Specialization;
use shared_models::booking::AppointmentStatus;

use crate::models::{
    AgeGroupCount, AnalyticsSummary, AppointmentRecord, DayCount, MonthlyBucket,
    SpecializationCount, StatusCount,
};

/// Trailing calendar months shown in the monthly trend, oldest first.
const TREND_MONTHS: u32 = 6;

const AGE_BRACKETS: [(&str, i32, i32); 5] = [
    ("0-18", 0, 18),
    ("19-30", 19, 30),
    ("31-45", 31, 45),
    ("46-60", 46, 60),
    ("60+", 61, i32::MAX),
];

pub fn build_summary(
    appointments: &[AppointmentRecord],
    total_patients: usize,
    today: NaiveDate,
) -> AnalyticsSummary {
    let completed = count_status(appointments, AppointmentStatus::Completed);
    let cancelled = count_status(appointments, AppointmentStatus::Cancelled);

    AnalyticsSummary {
        total_patients,
        total_appointments: appointments.len(),
        completed_appointments: completed,
        cancelled_appointments: cancelled,
        total_revenue: revenue(appointments),
        appointments_by_month: monthly_trend(appointments, today),
        appointments_by_status: status_breakdown(appointments),
        appointments_by_specialization: specialization_breakdown(appointments),
        busy_days: busy_days(appointments),
        patient_demographics: demographics(appointments, today),
    }
}

fn count_status(appointments: &[AppointmentRecord], status: AppointmentStatus) -> usize {
    appointments.iter().filter(|a| a.status == status).count()
}

/// Revenue counts completed visits only, at the doctor's listed fee.
fn revenue(appointments: &[AppointmentRecord]) -> f64 {
    appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .map(|a| a.doctor.consultation_fee)
        .sum()
}

fn monthly_trend(appointments: &[AppointmentRecord], today: NaiveDate) -> Vec<MonthlyBucket> {
    let current_month = today.with_day(1).unwrap_or(today);

    (0..TREND_MONTHS)
        .rev()
        .filter_map(|back| current_month.checked_sub_months(Months::new(back)))
        .map(|month_start| {
            let month_end = month_start
                .checked_add_months(Months::new(1))
                .unwrap_or(month_start);

            let in_month: Vec<&AppointmentRecord> = appointments
                .iter()
                .filter(|a| a.appointment_date >= month_start && a.appointment_date < month_end)
                .collect();

            let month_revenue = in_month
                .iter()
                .filter(|a| a.status == AppointmentStatus::Completed)
                .map(|a| a.doctor.consultation_fee)
                .sum();

            MonthlyBucket {
                month: month_start.format("%b %Y").to_string(),
                appointments: in_month.len(),
                revenue: month_revenue,
            }
        })
        .collect()
}

fn status_breakdown(appointments: &[AppointmentRecord]) -> Vec<StatusCount> {
    use AppointmentStatus::*;
    [Completed, Confirmed, Scheduled, Cancelled, NoShow]
        .into_iter()
        .map(|status| StatusCount {
            status: display_status(status).to_string(),
            count: count_status(appointments, status),
        })
        .collect()
}

fn display_status(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Scheduled => "Scheduled",
        AppointmentStatus::Confirmed => "Confirmed",
        AppointmentStatus::Completed => "Completed",
        AppointmentStatus::Cancelled => "Cancelled",
        AppointmentStatus::NoShow => "No Show",
    }
}

/// Specializations that saw no appointments are left out of the list.
fn specialization_breakdown(appointments: &[AppointmentRecord]) -> Vec<SpecializationCount> {
    Specialization::ALL
        .into_iter()
        .filter_map(|specialization| {
            let count = appointments
                .iter()
                .filter(|a| a.doctor.specialization == specialization)
                .count();
            (count > 0).then_some(SpecializationCount {
                specialization,
                count,
            })
        })
        .collect()
}

/// Weekday load ranking, busiest first. Ties keep week order starting
/// from Monday.
fn busy_days(appointments: &[AppointmentRecord]) -> Vec<DayCount> {
    const WEEK: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    let mut days: Vec<DayCount> = WEEK
        .into_iter()
        .filter_map(|weekday| {
            let count = appointments
                .iter()
                .filter(|a| a.appointment_date.weekday() == weekday)
                .count();
            (count > 0).then_some(DayCount {
                day: display_weekday(weekday).to_string(),
                appointments: count,
            })
        })
        .collect();

    days.sort_by(|a, b| b.appointments.cmp(&a.appointments));
    days
}

fn display_weekday(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Age brackets over the appointments in the window, one tally per visit.
/// Rows without a recorded birth date are skipped. Age is the calendar-year
/// difference, matching how the dashboards have always bucketed it.
fn demographics(appointments: &[AppointmentRecord], today: NaiveDate) -> Vec<AgeGroupCount> {
    let mut counts = [0usize; AGE_BRACKETS.len()];

    for appointment in appointments {
        let Some(dob) = appointment.patient.date_of_birth else {
            continue;
        };
        let age = today.year() - dob.year();
        if let Some(idx) = AGE_BRACKETS
            .iter()
            .position(|(_, low, high)| age >= *low && age <= *high)
        {
            counts[idx] += 1;
        }
    }

    AGE_BRACKETS
        .iter()
        .zip(counts)
        .map(|((label, _, _), count)| AgeGroupCount {
            age_group: label.to_string(),
            count,
        })
        .collect()
}
