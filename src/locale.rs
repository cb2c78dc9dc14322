use chrono::{Datelike, Month, NaiveDate, Weekday};
use serde::Deserialize;

use crate::grid::MonthIndex;

const MONTHS_FR: [&str; 12] = [
    "Janvier",
    "Février",
    "Mars",
    "Avril",
    "Mai",
    "Juin",
    "Juillet",
    "Août",
    "Septembre",
    "Octobre",
    "Novembre",
    "Décembre",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

// Monday first, matching the grid columns
const DAYS_FR: [&str; 7] = [
    "Lundi", "Mardi", "Mercredi", "Jeudi", "Vendredi", "Samedi", "Dimanche",
];

const DAYS_EN: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Fr,
    En,
}

impl Default for Locale {
    fn default() -> Self {
        Locale::Fr
    }
}

impl Locale {
    pub fn month_name(&self, month: Month) -> &'static str {
        let idx = month.number_from_month() as usize - 1;
        match self {
            Locale::Fr => MONTHS_FR[idx],
            Locale::En => MONTHS_EN[idx],
        }
    }

    pub fn weekday_name(&self, weekday: Weekday) -> &'static str {
        let idx = weekday.num_days_from_monday() as usize;
        match self {
            Locale::Fr => DAYS_FR[idx],
            Locale::En => DAYS_EN[idx],
        }
    }

    /// Weekday labels in column order, e.g. `Lun.`.
    pub fn weekday_labels(&self) -> Vec<String> {
        [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .iter()
        .map(|&weekday| abbreviate(self.weekday_name(weekday), 3))
        .collect()
    }

    /// `Octobre 2026`
    pub fn month_label(&self, month: &MonthIndex) -> String {
        format!("{} {}", self.month_name(month.month()), month.year())
    }

    /// Panel header, e.g. `Dim. 18 octobre`.
    pub fn panel_date(&self, date: &NaiveDate) -> String {
        let month = self.month_name(month_of(date));
        format!(
            "{} {} {}",
            abbreviate(self.weekday_name(date.weekday()), 3),
            date.day(),
            month.to_lowercase()
        )
    }
}

fn month_of(date: &NaiveDate) -> Month {
    MonthIndex::from(date).month()
}

/// Cuts `name` to `len` characters and appends a dot.
pub fn abbreviate(name: &str, len: usize) -> String {
    let mut short: String = name.chars().take(len).collect();
    short.push('.');
    short
}
