use chrono::{Datelike, Days, Local, Month, NaiveDate, Weekday};
use derive_more::Display;
use num_traits::FromPrimitive;
use std::collections::HashMap;
use std::convert::TryFrom;
use std::ops::{Add, Sub};

use crate::diary::Dated;
use crate::provider::error::*;
use crate::provider::Result;

pub const COLUMNS: usize = 7;
pub const ROWS: usize = 6;

// Next-month padding runs until at least this many rows exist.
const MIN_PADDED_ROWS: usize = 5;

/// `None` if the month or its successor lies outside chrono's range.
pub fn days_of_month(month: &Month, year: i32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)?;
    let next = match month.number_from_month() {
        12 => NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?,
        number => NaiveDate::from_ymd_opt(year, number + 1, 1)?,
    };

    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

fn week_out_of_range(date: NaiveDate) -> Error {
    Error::new(
        ErrorKind::InvalidDate,
        &format!("week of {} is out of range", date),
    )
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> Result<NaiveDate> {
    let shift = date.weekday().num_days_from_monday() as u64;
    date.checked_sub_days(Days::new(shift))
        .ok_or_else(|| week_out_of_range(date))
}

/// Monday through Sunday of the week containing `date`.
pub fn week_range(date: NaiveDate) -> Result<[NaiveDate; 7]> {
    let monday = week_start(date)?;
    let mut days = [monday; 7];
    for (offset, day) in days.iter_mut().enumerate() {
        *day = monday
            .checked_add_days(Days::new(offset as u64))
            .ok_or_else(|| week_out_of_range(date))?;
    }
    Ok(days)
}

/// Pairs each day of the week containing `date` with the items on that day.
pub fn week_agenda<'a, T: Dated>(
    date: NaiveDate,
    items: &'a [T],
) -> Result<Vec<(NaiveDate, Vec<&'a T>)>> {
    let days = week_range(date)?;
    let mut by_date = index_by_date(items);

    Ok(days
        .iter()
        .map(|day| (*day, by_date.remove(day).unwrap_or_default()))
        .collect())
}

fn index_by_date<T: Dated>(items: &[T]) -> HashMap<NaiveDate, Vec<&T>> {
    let mut by_date: HashMap<NaiveDate, Vec<&T>> = HashMap::new();

    for item in items {
        match item.date() {
            Some(date) => by_date.entry(date).or_default().push(item),
            None => log::debug!("Dropping item with malformed date '{}'", item.date_key()),
        }
    }

    by_date
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CellTag {
    #[display(fmt = "previous")]
    Previous,
    #[display(fmt = "current")]
    Current,
    #[display(fmt = "next")]
    Next,
    #[display(fmt = "filler")]
    Filler,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell<'a, T> {
    number: Option<u32>,
    tag: CellTag,
    items: Vec<&'a T>,
}

impl<'a, T> DayCell<'a, T> {
    fn new(number: u32, tag: CellTag) -> Self {
        DayCell {
            number: Some(number),
            tag,
            items: Vec::new(),
        }
    }

    fn filler() -> Self {
        DayCell {
            number: None,
            tag: CellTag::Filler,
            items: Vec::new(),
        }
    }

    pub fn number(&self) -> Option<u32> {
        self.number
    }

    pub fn tag(&self) -> CellTag {
        self.tag
    }

    pub fn items(&self) -> &[&'a T] {
        &self.items
    }

    pub fn is_current(&self) -> bool {
        self.tag == CellTag::Current
    }
}

/// A month laid out as 6 weeks of 7 days, Monday first.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthMatrix<'a, T> {
    index: MonthIndex,
    cells: Vec<DayCell<'a, T>>,
}

impl<'a, T> MonthMatrix<'a, T> {
    pub fn year(&self) -> i32 {
        self.index.year
    }

    pub fn month(&self) -> Month {
        self.index.month
    }

    pub fn index(&self) -> MonthIndex {
        self.index
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DayCell<'a, T>]> {
        self.cells.chunks(COLUMNS)
    }

    pub fn cells(&self) -> &[DayCell<'a, T>] {
        &self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&DayCell<'a, T>> {
        if row < ROWS && col < COLUMNS {
            self.cells.get(row * COLUMNS + col)
        } else {
            None
        }
    }

    pub fn current_days(&self) -> impl Iterator<Item = &DayCell<'a, T>> {
        self.cells.iter().filter(|cell| cell.is_current())
    }

    pub fn into_rows(self) -> Vec<Vec<DayCell<'a, T>>> {
        let mut cells = self.cells.into_iter();
        (0..ROWS)
            .map(|_| cells.by_ref().take(COLUMNS).collect())
            .collect()
    }
}

/// Builds the grid for a zero-indexed `month0` (0 = January).
pub fn month_matrix<T: Dated>(
    year: i32,
    month0: u32,
    items: &[T],
) -> Result<MonthMatrix<'_, T>> {
    let month = month0
        .checked_add(1)
        .and_then(Month::from_u32)
        .ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidMonth,
                &format!("expected 0..=11, got {}", month0),
            )
        })?;

    month_matrix_at(MonthIndex::new(month, year), items)
}

pub fn month_matrix_at<T: Dated>(
    index: MonthIndex,
    items: &[T],
) -> Result<MonthMatrix<'_, T>> {
    let out_of_range = || {
        Error::new(
            ErrorKind::InvalidDate,
            &format!("{} {} is out of range", index.month.name(), index.year),
        )
    };

    let first = index.first_day().ok_or_else(out_of_range)?;
    let offset = first.weekday().num_days_from_monday();
    let num_days = days_of_month(&index.month, index.year).ok_or_else(out_of_range)?;

    let prev = index.prev();
    let prev_days = days_of_month(&prev.month, prev.year).ok_or_else(out_of_range)?;

    let mut by_date = index_by_date(items);
    let mut cells = Vec::with_capacity(ROWS * COLUMNS);

    let leading = (prev_days + 1).saturating_sub(offset)..=prev_days;
    cells.extend(leading.map(|day| DayCell::new(day, CellTag::Previous)));

    for day in 1..=num_days {
        let mut cell = DayCell::new(day, CellTag::Current);
        if let Some(items) = first.with_day(day).and_then(|date| by_date.remove(&date)) {
            cell.items = items;
        }
        cells.push(cell);
    }

    let mut next_day = 1;
    while cells.len() % COLUMNS != 0 || cells.len() < MIN_PADDED_ROWS * COLUMNS {
        cells.push(DayCell::new(next_day, CellTag::Next));
        next_day += 1;
    }

    while cells.len() < ROWS * COLUMNS {
        cells.push(DayCell::filler());
    }

    Ok(MonthMatrix { index, cells })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    pub month: Month,
    pub year: i32,
}

impl MonthIndex {
    pub fn new(month: Month, year: i32) -> Self {
        MonthIndex { month, year }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        MonthIndex {
            month: Month::from_u32(date.month()).unwrap_or(Month::January),
            year: date.year(),
        }
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month.number_from_month(), 1)
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month.number_from_month()
    }

    pub fn next(&self) -> Self {
        *self + 1
    }

    pub fn prev(&self) -> Self {
        *self - 1
    }

    fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + self.month.number_from_month() as i64 - 1
    }

    /// Saturates at January of `i32::MIN` and December of `i32::MAX`.
    fn from_ordinal(ordinal: i64) -> Self {
        let ordinal = ordinal.clamp(i32::MIN as i64 * 12, i32::MAX as i64 * 12 + 11);

        MonthIndex {
            month: Month::from_i64(ordinal.rem_euclid(12) + 1).unwrap_or(Month::January),
            year: i32::try_from(ordinal.div_euclid(12)).unwrap_or_default(),
        }
    }
}

impl Default for MonthIndex {
    fn default() -> Self {
        MonthIndex::of(&Local::now().date_naive())
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() + rhs as i64)
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() - rhs as i64)
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.ordinal().partial_cmp(&other.ordinal())
    }
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}
