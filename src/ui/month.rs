use chrono::{Datelike, NaiveDate, Weekday};
use itertools::Itertools;
use std::fmt;

use crate::calendar::{weekday_label, CellTag, DayCell, MonthMatrix};

const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Plain-text month grid. Days from adjacent months are parenthesized.
pub struct MonthView<'m, 'a, T> {
    matrix: &'m MonthMatrix<'a, T>,
    today: Option<NaiveDate>,
    today_symbol: char,
    item_symbol: char,
}

impl<'m, 'a, T> MonthView<'m, 'a, T> {
    const CELL_WIDTH: usize = 5;

    pub fn new(matrix: &'m MonthMatrix<'a, T>) -> Self {
        MonthView {
            matrix,
            today: None,
            today_symbol: '*',
            item_symbol: '+',
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

    pub fn item_symbol(mut self, symbol: char) -> Self {
        self.item_symbol = symbol;
        self
    }

    fn is_today(&self, cell: &DayCell<'a, T>) -> bool {
        match (self.today, cell.number()) {
            (Some(today), Some(day)) => {
                cell.is_current()
                    && today.day() == day
                    && self.matrix.index().contains(&today)
            }
            _ => false,
        }
    }

    fn render_cell(&self, cell: &DayCell<'a, T>) -> String {
        let number = match (cell.tag(), cell.number()) {
            (CellTag::Current, Some(day)) => day.to_string(),
            (_, Some(day)) => format!("({})", day),
            (_, None) => String::new(),
        };

        let mut marks = String::new();
        if self.is_today(cell) {
            marks.push(self.today_symbol);
        }
        if !cell.items().is_empty() {
            marks.push(self.item_symbol);
        }

        format!("{}{}", marks, number)
    }
}

impl<T> fmt::Display for MonthView<'_, '_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = Self::CELL_WIDTH;

        writeln!(
            f,
            "{:^w$}",
            format!("{} {}", self.matrix.month().name(), self.matrix.year()),
            w = width * WEEK.len()
        )?;
        writeln!(
            f,
            "{}",
            WEEK.iter()
                .map(|day| format!("{:>w$}", weekday_label(*day), w = width))
                .join("")
        )?;

        for row in self.matrix.rows() {
            let line = row
                .iter()
                .map(|cell| format!("{:>w$}", self.render_cell(cell), w = width))
                .join("");
            writeln!(f, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::month_matrix;
    use crate::diary::Appointment;

    #[test]
    fn renders_july_2025() {
        let appointments = vec![Appointment::new("2025-07-15", "Dr. A", "09:00 A.M.")];
        let matrix = month_matrix(2025, 6, &appointments).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();

        let text = MonthView::new(&matrix).today(today).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("July 2025"));
        assert!(lines[1].trim_start().starts_with("Mon"));
        assert!(lines[1].ends_with("Sun"));
        // 2025-07-01 is a Tuesday
        assert!(lines[2].trim_start().starts_with("(30)"));
        assert!(lines[2].contains("*3"));
        assert!(lines[4].contains("+15"));
        assert!(lines[6].ends_with("(3)"));
    }

    #[test]
    fn today_outside_month_is_not_marked() {
        let empty: Vec<Appointment> = Vec::new();
        let matrix = month_matrix(2025, 6, &empty).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 8, 3).unwrap();

        let text = MonthView::new(&matrix).today(today).to_string();
        assert!(!text.contains('*'));
        assert!(!text.contains('+'));
    }

    #[test]
    fn custom_symbols_are_used() {
        let appointments = vec![Appointment::new("2025-07-03", "Dr. A", "09:00 A.M.")];
        let matrix = month_matrix(2025, 6, &appointments).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 7, 3).unwrap();

        let text = MonthView::new(&matrix)
            .today(today)
            .today_symbol('#')
            .item_symbol('!')
            .to_string();
        assert!(text.contains("#!3"));
        assert!(!text.contains('*'));
    }

    #[test]
    fn filler_rows_are_blank() {
        let empty: Vec<Appointment> = Vec::new();
        let matrix = month_matrix(2025, 1, &empty).unwrap();

        let text = MonthView::new(&matrix).to_string();
        assert_eq!(text.lines().last(), Some(""));
    }
}
