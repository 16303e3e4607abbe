use std::fmt::Write;

use appointment_cell::models::Appointment;
use doctor_cell::services::WeeklyCalendar;
use shared_utils::date_format::long_french_date;

/// One line per grid day: open slots, then the ones already booked.
pub fn week_grid(calendar: &WeeklyCalendar) -> String {
    let mut out = String::new();

    for day in calendar.days() {
        let open = calendar
            .week_availability()
            .iter()
            .find(|availability| availability.date == Some(day.date))
            .map(|availability| availability.slots.join(" "))
            .unwrap_or_default();
        let booked = calendar
            .week_appointments()
            .iter()
            .find(|booked| booked.date == day.date)
            .map(|booked| booked.slots.join(" "))
            .unwrap_or_default();

        let _ = writeln!(
            out,
            "{:<4} {:<16} | libres: {:<40} | réservés: {}",
            day.short_label,
            long_french_date(day.date),
            dash_if_empty(&open),
            dash_if_empty(&booked)
        );
    }

    out
}

pub fn appointment_line(appointment: &Appointment) -> String {
    format!(
        "{} {} - {} ({})",
        long_french_date(appointment.date.date()),
        appointment.date.format("%H:%M"),
        appointment.appointment_type,
        appointment.status
    )
}

fn dash_if_empty(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use appointment_cell::models::AppointmentStatus;
    use chrono::NaiveDate;
    use doctor_cell::models::{Availability, BookedSlots};
    use doctor_cell::services::DoctorService;
    use shared_config::AppConfig;
    use shared_http::ApiClient;
    use shared_utils::navigation::LogNavigator;
    use shared_utils::notify::TracingNotifier;
    use shared_utils::storage::MemoryStorage;
    use tokio::sync::mpsc;

    #[test]
    fn test_week_grid_lists_open_and_booked_slots() {
        let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let api = ApiClient::new(
            &AppConfig::default(),
            Arc::new(MemoryStorage::new()),
            Arc::new(LogNavigator),
        );
        let (tx, _rx) = mpsc::unbounded_channel();
        let calendar = WeeklyCalendar::new(
            vec![Availability::new(Some(7), monday, vec!["09:00".into(), "10:00".into()])],
            vec![BookedSlots {
                date: monday,
                slots: vec!["11:00".into()],
            }],
            Arc::new(DoctorService::new(Arc::new(api))),
            Arc::new(TracingNotifier),
            tx,
        )
        .with_reference_date(monday);

        let grid = week_grid(&calendar);
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("Lun  4 mars 2024"));
        assert!(lines[0].contains("09:00 10:00"));
        assert!(lines[0].ends_with("réservés: 11:00"));
        assert!(lines[5].starts_with("Sam"));
        assert!(lines[5].ends_with("réservés: -"));
    }

    #[test]
    fn test_appointment_line() {
        let appointment = Appointment {
            id: "a-1".into(),
            doctor_id: Some("d-1".into()),
            doctor_name: None,
            date: NaiveDate::from_ymd_opt(2023, 11, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            appointment_type: "consultation".into(),
            status: AppointmentStatus::Scheduled,
        };

        assert_eq!(
            appointment_line(&appointment),
            "1 novembre 2023 10:00 - consultation (scheduled)"
        );
    }
}
