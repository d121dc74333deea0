use chrono::{Datelike, NaiveDate};
use std::fmt;

use crate::calendar::weekday_label;
use crate::diary::Appointment;

pub struct WeekView<'w, 'a> {
    days: &'w [(NaiveDate, Vec<&'a Appointment>)],
    today: Option<NaiveDate>,
    today_symbol: char,
}

impl<'w, 'a> WeekView<'w, 'a> {
    pub fn new(days: &'w [(NaiveDate, Vec<&'a Appointment>)]) -> Self {
        WeekView {
            days,
            today: None,
            today_symbol: '*',
        }
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn today_symbol(mut self, symbol: char) -> Self {
        self.today_symbol = symbol;
        self
    }
}

impl fmt::Display for WeekView<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (date, appointments) in self.days {
            let marker = if Some(*date) == self.today {
                self.today_symbol
            } else {
                ' '
            };

            write!(
                f,
                "{}{} {}",
                marker,
                weekday_label(date.weekday()),
                date.format("%Y-%m-%d")
            )?;

            if appointments.is_empty() {
                writeln!(f)?;
                continue;
            }

            writeln!(f, ":")?;
            for appointment in appointments {
                write!(f, "    {} {}", appointment.time, appointment.doctor)?;
                if let Some(status) = &appointment.status {
                    write!(f, " [{}]", status)?;
                }
                writeln!(f)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::week_agenda;
    use crate::diary::AppointmentStatus;

    #[test]
    fn lists_appointments_under_their_day() {
        let appointments = vec![
            Appointment::new("2025-07-15", "Dr. A", "09:00 A.M.")
                .with_status(AppointmentStatus::Attended),
            Appointment::new("2025-07-17", "Dr. B", "10:00 A.M."),
        ];
        let today = NaiveDate::from_ymd_opt(2025, 7, 17).unwrap();
        let days = week_agenda(today, &appointments).unwrap();

        let text = WeekView::new(&days).today(today).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], " Mon 2025-07-14");
        assert_eq!(lines[1], " Tue 2025-07-15:");
        assert_eq!(lines[2], "    09:00 A.M. Dr. A [Asistido]");
        assert_eq!(lines[4], "*Thu 2025-07-17:");
        assert_eq!(lines[5], "    10:00 A.M. Dr. B");
        assert_eq!(lines[8], " Sun 2025-07-20");
    }
}
