//! Month grid layout.
//!
//! A month is laid out as a grid of seven columns (Monday to Sunday) and as
//! many rows as the month spans weeks. Every day is placed directly at its
//! column and row; leading and trailing blanks are never materialized.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use num_traits::FromPrimitive;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::Error;

pub const COLUMNS: u8 = 7;

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    match month {
        Month::February => {
            if NaiveDate::from_ymd_opt(year, 2, 29).is_some() {
                29
            } else {
                28
            }
        }
        Month::April | Month::June | Month::September | Month::November => 30,
        _ => 31,
    }
}

/// Column of a weekday in the grid. Weeks start on Monday, so Sunday is the
/// last column.
pub fn column_of(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

/// A month of a particular year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthIndex {
    first: NaiveDate,
}

impl MonthIndex {
    pub fn new(month: Month, year: i32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
            .map(|first| MonthIndex { first })
    }

    pub fn month(&self) -> Month {
        Month::from_u32(self.first.month()).unwrap_or(Month::January)
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn num_days(&self) -> u32 {
        days_of_month(&self.month(), self.year())
    }

    pub fn contains<T: Datelike>(&self, date: &T) -> bool {
        date.year() == self.year() && date.month() == self.first.month()
    }

    /// Following month. Saturates at the last representable month.
    pub fn next(&self) -> Self {
        *self + 1
    }

    /// Preceding month. Saturates at the first representable month.
    pub fn prev(&self) -> Self {
        *self - 1
    }

    fn ordinal(&self) -> i64 {
        self.year() as i64 * 12 + self.first.month0() as i64
    }

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        let year = ordinal.div_euclid(12);
        let month0 = ordinal.rem_euclid(12) as u32;

        if year < i32::MIN as i64 || year > i32::MAX as i64 {
            return None;
        }

        NaiveDate::from_ymd_opt(year as i32, month0 + 1, 1).map(|first| MonthIndex { first })
    }
}

impl<T: Datelike> From<&T> for MonthIndex {
    fn from(date: &T) -> Self {
        // Any representable date has a representable first of its month
        let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1);

        MonthIndex {
            first: first.unwrap_or(NaiveDate::MIN),
        }
    }
}

impl Add<u32> for MonthIndex {
    type Output = MonthIndex;
    fn add(self, rhs: u32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() + rhs as i64)
            .unwrap_or_else(|| MonthIndex::from(&NaiveDate::MAX))
    }
}

impl Sub<u32> for MonthIndex {
    type Output = MonthIndex;
    fn sub(self, rhs: u32) -> Self::Output {
        MonthIndex::from_ordinal(self.ordinal() - rhs as i64)
            .unwrap_or_else(|| MonthIndex::from(&NaiveDate::MIN))
    }
}

impl PartialOrd for MonthIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MonthIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.first.month())
    }
}

impl FromStr for MonthIndex {
    type Err = Error;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")?;
        Ok(MonthIndex { first })
    }
}

/// Placement of a single day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    pub date: NaiveDate,
    pub column: u8,
    pub row: u8,
    pub is_today: bool,
    pub is_past: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    month: MonthIndex,
    cells: Vec<GridCell>,
}

impl MonthGrid {
    /// Lays out the month containing `reference`.
    pub fn new<T: Datelike>(reference: &T, today: &NaiveDate) -> Self {
        let month = MonthIndex::from(reference);
        let mut cells = Vec::with_capacity(month.num_days() as usize);

        // Rows are counted by the Sundays passed so far
        let mut row = 0;
        for date in month
            .first_day()
            .iter_days()
            .take_while(|date| month.contains(date))
        {
            let weekday = date.weekday();

            cells.push(GridCell {
                date,
                column: column_of(weekday),
                row,
                is_today: date == *today,
                is_past: date < *today,
            });

            if weekday == Weekday::Sun {
                row += 1;
            }
        }

        log::trace!("laid out {} with {} days", month, cells.len());

        MonthGrid { month, cells }
    }

    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.cells.iter().map(|cell| cell.date)
    }

    /// Number of week rows the month spans.
    pub fn num_weeks(&self) -> u8 {
        self.cells.last().map(|cell| cell.row + 1).unwrap_or(0)
    }

    pub fn cell_of(&self, date: &NaiveDate) -> Option<&GridCell> {
        if !self.month.contains(date) {
            return None;
        }
        self.cells.get(date.day0() as usize)
    }

    pub fn today(&self) -> Option<&GridCell> {
        self.cells.iter().find(|cell| cell.is_today)
    }

    /// Left and top offset of `cell` in percent of the grid area.
    pub fn position(&self, cell: &GridCell) -> (f32, f32) {
        let weeks = self.num_weeks().max(1) as f32;
        (
            cell.column as f32 * 100.0 / COLUMNS as f32,
            cell.row as f32 * 100.0 / weeks,
        )
    }
}
